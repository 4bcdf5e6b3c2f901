//! # td-web
//!
//! Browser platform for trackdash. On `wasm32` this crate implements every
//! port over `web-sys`, binds the page's events and boots the dashboard.
//! The platform-independent decisions (boot configuration, click filtering,
//! form behaviors) live outside the `wasm` module and are tested natively.

pub mod boot_config;
pub mod click;
pub mod form_rules;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::start;
