//! trackdash application layer
//!
//! Use cases and orchestrators that drive the domain rules of `td-core`
//! through its ports.

pub mod dashboard;
pub mod deps;
pub mod usecases;

pub use dashboard::Dashboard;
pub use deps::AppDeps;
