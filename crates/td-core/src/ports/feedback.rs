use crate::render::{DuplicateModalView, Node, PopupView};

/// Transient user feedback: notices, the duplicate modal, the popup.
pub trait FeedbackPort {
    /// Prepend a dismissible notice to the wizard.
    fn show_notice(&self, notice: &Node);

    fn show_duplicate_modal(&self, view: &DuplicateModalView);

    fn show_popup(&self, view: &PopupView);

    fn hide_popup(&self);
}
