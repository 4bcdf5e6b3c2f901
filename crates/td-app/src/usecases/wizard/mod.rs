//! Registration wizard use cases.

mod context;
mod duplicate_check;
mod orchestrator;
mod step_nav;

pub use context::WizardContext;
pub use duplicate_check::{CheckDuplicateCustomer, DuplicateVerdict};
pub use orchestrator::{WizardError, WizardOrchestrator};
pub use step_nav::StepNavigation;
