//! Wizard orchestrator.
//!
//! This module drives the wizard state machine and executes its side
//! effects through the ports.

use std::rc::Rc;

use td_core::config::WizardConfig;
use async_trait::async_trait;
use td_core::ports::{
    BrowserPort, ContentSwapHandler, DomError, FeedbackPort, HandlerBinderPort, HttpPort,
    HttpRequest, Region, WizardViewPort,
};
use td_core::render::{render_notice, DuplicateModalView};
use td_core::wizard::{
    WizardAction, WizardEvent, WizardPhase, WizardState, WizardStateMachine, WizardStep,
};
use td_core::{FormField, StepResponse};
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

use crate::usecases::draft::DraftPersistence;
use crate::usecases::navigation::ActivateFragment;
use crate::usecases::wizard::context::WizardContext;
use crate::usecases::wizard::duplicate_check::{CheckDuplicateCustomer, DuplicateVerdict};
use crate::usecases::wizard::step_nav::StepNavigation;

/// Errors the caller has to know about. Network failures are recovered
/// inside the orchestrator and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("wizard markup could not be applied: {0}")]
    Dom(#[from] DomError),
    #[error("wizard container is not on this page")]
    NotPresent,
}

pub struct WizardOrchestrator {
    context: Rc<WizardContext>,
    machine: WizardStateMachine,
    step_field: String,

    activate: Rc<ActivateFragment>,
    draft: Rc<DraftPersistence>,
    step_nav: StepNavigation,
    duplicate_check: CheckDuplicateCustomer,

    http: Rc<dyn HttpPort>,
    browser: Rc<dyn BrowserPort>,
    view: Rc<dyn WizardViewPort>,
    binder: Rc<dyn HandlerBinderPort>,
    feedback: Rc<dyn FeedbackPort>,
}

impl WizardOrchestrator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &WizardConfig,
        activate: Rc<ActivateFragment>,
        draft: Rc<DraftPersistence>,
        step_nav: StepNavigation,
        duplicate_check: CheckDuplicateCustomer,
        http: Rc<dyn HttpPort>,
        browser: Rc<dyn BrowserPort>,
        view: Rc<dyn WizardViewPort>,
        binder: Rc<dyn HandlerBinderPort>,
        feedback: Rc<dyn FeedbackPort>,
    ) -> Self {
        let duplicate_check_step =
            WizardStep::new(config.duplicate_check_step).unwrap_or(WizardStep::FIRST);
        Self {
            context: Rc::new(WizardContext::default()),
            machine: WizardStateMachine::new(duplicate_check_step, config.step_field.clone()),
            step_field: config.step_field.clone(),
            activate,
            draft,
            step_nav,
            duplicate_check,
            http,
            browser,
            view,
            binder,
            feedback,
        }
    }

    /// Setup of an already rendered wizard, at boot or after navigation
    /// swapped one in: restore the draft, sync step links and gates.
    pub async fn initialize(&self) -> Result<WizardState, WizardError> {
        if !self.view.is_present() {
            return Err(WizardError::NotPresent);
        }
        let span = info_span!("usecase.wizard_orchestrator.initialize");
        async {
            let _dispatch_guard = self.context.acquire_dispatch_lock().await;

            match self.draft.restored_step().await {
                Ok(Some(mirrored)) => debug!(mirrored = %mirrored, "step mirror from previous load"),
                Ok(None) => {}
                Err(err) => warn!(error = %err, "step mirror unreadable"),
            }
            if let Err(err) = self.draft.restore().await {
                warn!(error = %err, "draft restore failed");
            }

            let previous = self.context.get_state().await;
            let state = WizardState::idle(self.read_current_step(previous.current));
            self.step_nav.refresh(state.current);
            self.step_nav.evaluate_gates();
            self.context.set_state(state.clone()).await;
            info!(step = %state.current, "wizard initialized");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    /// A `[data-step-link]` anchor was clicked.
    pub async fn on_step_link(&self, href: &str) -> Result<WizardState, WizardError> {
        let target = WizardStep::from_link(href, &self.browser.current_url());
        self.load_step(target).await
    }

    /// Load `target` if it does not lie ahead of the current step. Loads
    /// queue behind any dispatch in flight.
    pub async fn load_step(&self, target: WizardStep) -> Result<WizardState, WizardError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        self.dispatch(WizardEvent::StepLinkClicked { target }).await
    }

    /// Submit the current step. Returns `None` when a submission is already
    /// in flight; the request is dropped.
    pub async fn submit(&self) -> Result<Option<WizardState>, WizardError> {
        let Some(_dispatch_guard) = self.context.try_acquire_dispatch_lock() else {
            info!("submission already in flight, ignoring submit");
            return Ok(None);
        };
        self.dispatch(WizardEvent::SubmitRequested).await.map(Some)
    }

    /// Any input inside the wizard: save the draft and re-check gates.
    pub async fn on_input(&self) {
        self.step_nav.evaluate_gates();
        if let Err(err) = self.draft.save().await {
            warn!(error = %err, "draft save failed");
        }
    }

    pub async fn get_state(&self) -> WizardState {
        self.context.get_state().await
    }

    /// Whether the wizard issued a hard navigation and is waiting to unload.
    pub async fn has_departed(&self) -> bool {
        self.get_state().await.phase == WizardPhase::Departed
    }

    /// Must be called with the dispatch lock held.
    async fn dispatch(&self, event: WizardEvent) -> Result<WizardState, WizardError> {
        let span = info_span!("usecase.wizard_orchestrator.dispatch", event = event.name());
        async {
            let mut current = self.context.get_state().await;
            current.current = self.read_current_step(current.current);
            let initial = current.clone();
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = current.clone();
                let event_name = event.name();
                let (next, actions) = self.machine.transition(current, event);
                info!(from = ?from, to = ?next, event = %event_name, "wizard state transition");
                self.context.set_state(next.clone()).await;
                let follow_up_events = match self.execute_actions(actions).await {
                    Ok(events) => events,
                    Err(err) => {
                        warn!(
                            error = %err,
                            restored = ?initial,
                            "wizard action failed, restoring state"
                        );
                        self.context.set_state(initial).await;
                        return Err(err);
                    }
                };
                current = next;
                pending_events.extend(follow_up_events);
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction>,
    ) -> Result<Vec<WizardEvent>, WizardError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::FetchStep { target } => {
                    follow_up_events.push(self.fetch_step(target).await);
                }
                WizardAction::CheckDuplicate => {
                    let fields = self.view.form_fields();
                    let event = match self.duplicate_check.execute(&fields).await {
                        DuplicateVerdict::Found(customer) => WizardEvent::DuplicateFound { customer },
                        DuplicateVerdict::Clear | DuplicateVerdict::Skipped => {
                            WizardEvent::DuplicateCleared
                        }
                    };
                    follow_up_events.push(event);
                }
                WizardAction::PostForm => {
                    follow_up_events.push(self.post_form().await);
                }
                WizardAction::ShowNotice { kind, message } => {
                    self.feedback.show_notice(&render_notice(kind, &message));
                }
                WizardAction::ShowDuplicateModal { customer } => {
                    self.feedback
                        .show_duplicate_modal(&DuplicateModalView::from_customer(&customer));
                }
                WizardAction::RenderMarkup { form_html } => {
                    self.activate.execute(Region::Wizard, &form_html)?;
                }
                WizardAction::SetStep { step } => {
                    self.set_step(step).await;
                }
                WizardAction::RebindHandlers => {
                    self.binder.rebind();
                    if let Err(err) = self.draft.refill().await {
                        warn!(error = %err, "draft refill failed");
                    }
                    self.step_nav.evaluate_gates();
                }
                WizardAction::MarkInvalid { fields } => {
                    for name in &fields {
                        if !self.view.mark_invalid(name) {
                            debug!(field = %name, "invalid field not present in form");
                        }
                    }
                }
                WizardAction::ScrollToFirstInvalid => {
                    if let Some(name) = self.view.scroll_to_first_invalid() {
                        debug!(field = %name, "scrolled to first invalid field");
                    }
                }
                WizardAction::ClearDraft => {
                    if let Err(err) = self.draft.clear().await {
                        warn!(error = %err, "draft clear failed");
                    }
                }
                WizardAction::HardNavigate { url } => {
                    info!(url = %url, "wizard leaving the page");
                    self.browser.hard_navigate(&url);
                }
            }
        }
        Ok(follow_up_events)
    }

    /// The hidden step field is the source of truth; `fallback` is used
    /// only when the field is missing from the form.
    fn read_current_step(&self, fallback: WizardStep) -> WizardStep {
        match self.view.step_field(&self.step_field) {
            Some(raw) => WizardStep::parse_or_first(Some(&raw)),
            None => fallback,
        }
    }

    async fn set_step(&self, step: WizardStep) {
        if !self.view.set_step_field(&self.step_field, &step.to_string()) {
            debug!(step = %step, "no hidden step field in wizard markup");
        }
        if let Err(err) = self.draft.mirror_step(step).await {
            warn!(error = %err, "step mirror write failed");
        }
        self.step_nav.refresh(step);
    }

    fn page_url(&self) -> Url {
        let mut url = self.browser.current_url();
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    async fn fetch_step(&self, target: WizardStep) -> WizardEvent {
        let mut url = self.page_url();
        url.query_pairs_mut()
            .append_pair("step", &target.to_string())
            .append_pair("load_step", "1");

        let response = match self.http.send(HttpRequest::get(url).ajax()).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!(status = response.status, target = %target, "step load rejected");
                return WizardEvent::StepFetchFailed;
            }
            Err(err) => {
                warn!(error = %err, target = %target, "step load failed");
                return WizardEvent::StepFetchFailed;
            }
        };

        match StepResponse::from_json(&response.body) {
            Ok(StepResponse {
                form_html: Some(form_html),
                ..
            }) if !form_html.trim().is_empty() => WizardEvent::StepFetched { form_html },
            Ok(_) => {
                warn!(target = %target, "step load returned no markup");
                WizardEvent::StepFetchFailed
            }
            Err(err) => {
                warn!(error = %err, target = %target, "step load returned invalid json");
                WizardEvent::StepFetchFailed
            }
        }
    }

    async fn post_form(&self) -> WizardEvent {
        let pairs = FormField::submission_pairs(&self.view.form_fields());
        let request = HttpRequest::post_multipart(self.page_url(), pairs).ajax();

        let response = match self.http.send(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                warn!(status = response.status, "step submission rejected");
                return WizardEvent::SubmitFailed;
            }
            Err(err) => {
                warn!(error = %err, "step submission failed");
                return WizardEvent::SubmitFailed;
            }
        };

        match StepResponse::from_json(&response.body) {
            Ok(response) => WizardEvent::SubmitResolved { response },
            Err(err) => {
                warn!(error = %err, "step submission returned invalid json");
                WizardEvent::SubmitFailed
            }
        }
    }
}

#[async_trait(?Send)]
impl ContentSwapHandler for WizardOrchestrator {
    async fn on_content_swapped(&self, url: &Url) {
        if !self.view.is_present() {
            return;
        }
        self.binder.rebind();
        match self.initialize().await {
            Ok(state) => debug!(url = %url, step = %state.current, "wizard set up after navigation"),
            Err(err) => warn!(error = %err, url = %url, "wizard setup after navigation failed"),
        }
    }
}
