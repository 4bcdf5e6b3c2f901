use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use td_core::ports::{FeedbackPort, SleepPort};
use td_core::render::PopupView;
use tracing::debug;

/// Centered transient popup. A newer popup restarts the dismiss timer.
pub struct ActionPopup {
    feedback: Rc<dyn FeedbackPort>,
    sleeper: Rc<dyn SleepPort>,
    dismiss_after: Duration,
    generation: Cell<u64>,
}

impl ActionPopup {
    pub fn new(
        feedback: Rc<dyn FeedbackPort>,
        sleeper: Rc<dyn SleepPort>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            feedback,
            sleeper,
            dismiss_after,
            generation: Cell::new(0),
        }
    }

    pub async fn flash(&self, level: &str, message: &str) {
        self.show(PopupView::flash(level, message)).await;
    }

    /// Turn the last server-rendered alert into a popup.
    pub async fn upgrade_alert(&self, class_name: &str, text: &str) {
        self.show(PopupView::from_alert(class_name, text)).await;
    }

    /// Show `view` and hide it after the dismiss delay unless another popup
    /// replaced it meanwhile. Resolves once the delay elapsed.
    pub async fn show(&self, view: PopupView) {
        let ticket = self.next_generation();
        debug!(kind = view.kind.as_str(), "showing action popup");
        self.feedback.show_popup(&view);

        self.sleeper.sleep(self.dismiss_after).await;
        if self.generation.get() == ticket {
            self.feedback.hide_popup();
        }
    }

    /// Overlay click.
    pub fn dismiss(&self) {
        self.next_generation();
        self.feedback.hide_popup();
    }

    fn next_generation(&self) -> u64 {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);
        ticket
    }
}
