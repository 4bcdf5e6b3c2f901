//! # td-infra
//!
//! Native implementations of the trackdash ports. The browser build uses
//! `td-web` instead; these adapters back the probe CLI and the tests.

pub mod http;
pub mod storage;
pub mod time;

pub use http::ReqwestHttpClient;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore, DEFAULT_STORE_FILE};
pub use time::TokioSleeper;
