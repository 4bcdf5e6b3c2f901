//! trackdash
//!
//! Facade over the workspace. The browser build links this crate as a
//! `cdylib`; `wasm-bindgen` picks up the entry point from [`web`]. Native
//! users get the domain, the use cases and the native adapters.

pub use td_app as app;
pub use td_core as domain;
pub use td_web as web;

#[cfg(not(target_arch = "wasm32"))]
pub use td_infra as infra;

pub use td_app::{AppDeps, Dashboard};
pub use td_core::DashboardConfig;

#[cfg(target_arch = "wasm32")]
pub use td_web::start;
