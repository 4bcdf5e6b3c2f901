use crate::draft::{FieldAssignment, FormField};
use crate::wizard::{StepLink, StepLinkState};

/// The live registration wizard form.
pub trait WizardViewPort {
    /// Whether the wizard container is on the page at all.
    fn is_present(&self) -> bool;

    /// Raw value of the hidden step input, `None` when it is absent.
    fn step_field(&self, name: &str) -> Option<String>;

    /// Write the hidden step input. Returns false when it is absent.
    fn set_step_field(&self, name: &str, value: &str) -> bool;

    fn step_links(&self) -> Vec<StepLink>;

    fn set_step_link_state(&self, index: usize, state: StepLinkState);

    /// Named controls of the wizard form, in document order.
    fn form_fields(&self) -> Vec<FormField>;

    fn apply_field(&self, assignment: &FieldAssignment);

    /// Add the invalid marker to the control called `name`. Returns false
    /// when no such control exists.
    fn mark_invalid(&self, name: &str) -> bool;

    /// Scroll the first invalid control into view and return its name.
    fn scroll_to_first_invalid(&self) -> Option<String>;

    /// Returns false when no element has `id`.
    fn set_control_disabled(&self, id: &str, disabled: bool) -> bool;
}
