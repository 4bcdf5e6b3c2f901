//! Wizard state machine.
//!
//! Defines a pure transition function for the registration wizard. Every
//! side effect is returned as a [`WizardAction`] for the orchestrator.

use crate::customer::DuplicateCustomer;
use crate::fragment::read_step_field;
use crate::render::NoticeKind;

use super::response::{StepOutcome, StepResponse};
use super::step::WizardStep;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again";

/// What the wizard is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    Idle,
    /// A step load (GET) is in flight.
    Loading { target: WizardStep },
    /// The duplicate-customer lookup runs before the step-1 POST.
    CheckingDuplicate,
    /// The step POST is in flight.
    Submitting,
    /// A hard navigation was issued; the page is going away.
    Departed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub current: WizardStep,
    pub phase: WizardPhase,
}

impl WizardState {
    pub fn idle(current: WizardStep) -> Self {
        Self {
            current,
            phase: WizardPhase::Idle,
        }
    }
}

/// Events that drive the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// A step-navigation link was clicked.
    StepLinkClicked { target: WizardStep },
    /// The step load returned markup.
    StepFetched { form_html: String },
    StepFetchFailed,
    /// The user submitted the current step.
    SubmitRequested,
    DuplicateFound { customer: DuplicateCustomer },
    /// No duplicate, the check was skipped, or the check failed open.
    DuplicateCleared,
    /// The POST returned a parseable response.
    SubmitResolved { response: StepResponse },
    /// Transport error, non-2xx status or unparseable body.
    SubmitFailed,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StepLinkClicked { .. } => "step_link_clicked",
            Self::StepFetched { .. } => "step_fetched",
            Self::StepFetchFailed => "step_fetch_failed",
            Self::SubmitRequested => "submit_requested",
            Self::DuplicateFound { .. } => "duplicate_found",
            Self::DuplicateCleared => "duplicate_cleared",
            Self::SubmitResolved { .. } => "submit_resolved",
            Self::SubmitFailed => "submit_failed",
        }
    }
}

/// Side effects produced by transitions, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    FetchStep { target: WizardStep },
    CheckDuplicate,
    PostForm,
    ShowNotice { kind: NoticeKind, message: String },
    ShowDuplicateModal { customer: DuplicateCustomer },
    /// Replace the wizard container and re-run its scripts.
    RenderMarkup { form_html: String },
    /// Write the hidden step field, mirror it and refresh step links.
    SetStep { step: WizardStep },
    RebindHandlers,
    MarkInvalid { fields: Vec<String> },
    ScrollToFirstInvalid,
    ClearDraft,
    HardNavigate { url: String },
}

/// Pure wizard state machine.
#[derive(Debug, Clone)]
pub struct WizardStateMachine {
    duplicate_check_step: WizardStep,
    step_field: String,
}

impl WizardStateMachine {
    pub fn new(duplicate_check_step: WizardStep, step_field: impl Into<String>) -> Self {
        Self {
            duplicate_check_step,
            step_field: step_field.into(),
        }
    }

    pub fn transition(
        &self,
        state: WizardState,
        event: WizardEvent,
    ) -> (WizardState, Vec<WizardAction>) {
        let current = state.current;
        match (state.phase, event) {
            (WizardPhase::Idle, WizardEvent::StepLinkClicked { target }) => {
                if !current.permits_visit(target) {
                    return (WizardState::idle(current), Vec::new());
                }
                (
                    WizardState {
                        current,
                        phase: WizardPhase::Loading { target },
                    },
                    vec![WizardAction::FetchStep { target }],
                )
            }
            (WizardPhase::Loading { target }, WizardEvent::StepFetched { form_html }) => (
                WizardState::idle(target),
                vec![
                    WizardAction::RenderMarkup { form_html },
                    WizardAction::SetStep { step: target },
                    WizardAction::RebindHandlers,
                ],
            ),
            (WizardPhase::Loading { .. }, WizardEvent::StepFetchFailed) => {
                (WizardState::idle(current), Vec::new())
            }
            (WizardPhase::Idle, WizardEvent::SubmitRequested) => {
                if current == self.duplicate_check_step {
                    (
                        WizardState {
                            current,
                            phase: WizardPhase::CheckingDuplicate,
                        },
                        vec![WizardAction::CheckDuplicate],
                    )
                } else {
                    (
                        WizardState {
                            current,
                            phase: WizardPhase::Submitting,
                        },
                        vec![WizardAction::PostForm],
                    )
                }
            }
            (WizardPhase::CheckingDuplicate, WizardEvent::DuplicateFound { customer }) => (
                WizardState::idle(current),
                vec![WizardAction::ShowDuplicateModal { customer }],
            ),
            (WizardPhase::CheckingDuplicate, WizardEvent::DuplicateCleared) => (
                WizardState {
                    current,
                    phase: WizardPhase::Submitting,
                },
                vec![WizardAction::PostForm],
            ),
            (WizardPhase::Submitting, WizardEvent::SubmitFailed) => (
                WizardState::idle(current),
                vec![WizardAction::ShowNotice {
                    kind: NoticeKind::Error,
                    message: NETWORK_ERROR_MESSAGE.to_string(),
                }],
            ),
            (WizardPhase::Submitting, WizardEvent::SubmitResolved { response }) => {
                self.resolve_submission(current, response)
            }
            (phase, _event) => (WizardState { current, phase }, Vec::new()),
        }
    }

    fn resolve_submission(
        &self,
        current: WizardStep,
        response: StepResponse,
    ) -> (WizardState, Vec<WizardAction>) {
        let mut actions = Vec::new();
        // A notice shown before the wizard markup is replaced would be wiped
        // with it, so it follows the swap whenever there is one.
        let notice = response
            .notice()
            .map(|(kind, message)| WizardAction::ShowNotice { kind, message });

        match response.outcome() {
            StepOutcome::Redirect { url, terminal } => {
                actions.extend(notice);
                if terminal {
                    actions.push(WizardAction::ClearDraft);
                }
                actions.push(WizardAction::HardNavigate { url });
                (
                    WizardState {
                        current,
                        phase: WizardPhase::Departed,
                    },
                    actions,
                )
            }
            StepOutcome::Advance { form_html } => {
                let next = read_step_field(&form_html, &self.step_field)
                    .unwrap_or_else(|| current.next());
                actions.push(WizardAction::RenderMarkup { form_html });
                actions.push(WizardAction::SetStep { step: next });
                actions.push(WizardAction::RebindHandlers);
                actions.extend(notice);
                (WizardState::idle(next), actions)
            }
            StepOutcome::Rejected {
                form_html,
                invalid_fields,
            } => {
                if let Some(form_html) = form_html {
                    actions.push(WizardAction::RenderMarkup { form_html });
                    actions.push(WizardAction::RebindHandlers);
                }
                actions.extend(notice);
                if !invalid_fields.is_empty() {
                    actions.push(WizardAction::MarkInvalid {
                        fields: invalid_fields,
                    });
                    actions.push(WizardAction::ScrollToFirstInvalid);
                }
                (WizardState::idle(current), actions)
            }
            StepOutcome::Accepted => {
                actions.extend(notice);
                (WizardState::idle(current), actions)
            }
        }
    }
}
