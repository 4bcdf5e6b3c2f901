//! # td-core
//!
//! Core domain models and business rules for trackdash.
//!
//! This crate contains the navigation, wizard and draft rules of the
//! dashboard without any infrastructure dependencies. Everything that touches
//! the DOM, the network, browser history or storage is expressed as a port in
//! [`ports`].

pub mod config;
pub mod customer;
pub mod draft;
pub mod fragment;
pub mod navigation;
pub mod notifications;
pub mod ports;
pub mod render;
pub mod theme;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::DashboardConfig;
pub use draft::{DraftRecord, DraftValue, FieldKind, FormField};
pub use fragment::{PageFragment, ScriptSpec};
pub use navigation::{HistoryEntry, LinkDecision, NavigationState, REQUESTED_WITH_HEADER};
pub use theme::ThemeMode;
pub use wizard::{StepResponse, WizardStep};
