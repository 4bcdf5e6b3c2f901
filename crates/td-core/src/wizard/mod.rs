//! Registration wizard domain.
//!
//! This module defines the step pointer, the server's step response
//! contract, and the pure wizard state machine.

pub mod response;
pub mod state_machine;
pub mod step;

pub use response::{FieldErrors, StepOutcome, StepResponse};
pub use state_machine::{
    WizardAction, WizardEvent, WizardPhase, WizardState, WizardStateMachine,
    NETWORK_ERROR_MESSAGE,
};
pub use step::{StepLink, StepLinkState, WizardStep};
