use std::rc::Rc;

use td_core::config::ForwardGate;
use td_core::ports::{BrowserPort, WizardViewPort};
use td_core::wizard::{StepLinkState, WizardStep};
use td_core::FormField;
use tracing::trace;

/// Step-link states and forward-button gates of the live wizard.
pub struct StepNavigation {
    view: Rc<dyn WizardViewPort>,
    browser: Rc<dyn BrowserPort>,
    gates: Vec<ForwardGate>,
}

impl StepNavigation {
    pub fn new(
        view: Rc<dyn WizardViewPort>,
        browser: Rc<dyn BrowserPort>,
        gates: Vec<ForwardGate>,
    ) -> Self {
        Self {
            view,
            browser,
            gates,
        }
    }

    /// Disable links to steps ahead of `current` and mark `current` active.
    pub fn refresh(&self, current: WizardStep) {
        let base = self.browser.current_url();
        for link in self.view.step_links() {
            let target = WizardStep::from_link(&link.href, &base);
            self.view
                .set_step_link_state(link.index, StepLinkState::for_target(target, current));
        }
    }

    /// Keep each gated button disabled until one of its radios is checked.
    /// Gates whose radios are not on the current step are left alone.
    pub fn evaluate_gates(&self) {
        let fields = self.view.form_fields();
        for gate in &self.gates {
            let has_radios = fields.iter().any(|field| field.name == gate.radio_name);
            if !has_radios {
                continue;
            }
            let enabled = FormField::radio_checked(&fields, &gate.radio_name);
            if !self.view.set_control_disabled(&gate.button_id, !enabled) {
                trace!(button = %gate.button_id, "gated button not on this step");
            }
        }
    }
}
