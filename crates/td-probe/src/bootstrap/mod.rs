//! Process bootstrap: logging and configuration.

pub mod config;
pub mod tracing;
