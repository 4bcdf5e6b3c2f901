//! Hand-written fakes for the page, the network and time.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use td_app::AppDeps;
use td_core::draft::{FieldAssignment, FieldChange};
use td_core::fragment::read_step_field;
use td_core::navigation::{ActiveMarker, SidebarAnchor};
use td_core::ports::*;
use td_core::render::{BadgeView, DuplicateModalView, Node, NotificationView, PopupView};
use td_core::wizard::{StepLink, StepLinkState};
use td_core::{DashboardConfig, FormField, HistoryEntry, ScriptSpec};
use td_infra::InMemoryKeyValueStore;
use url::Url;

pub const ORIGIN: &str = "https://pos.example";

pub fn page_url(path: &str) -> Url {
    Url::parse(ORIGIN).unwrap().join(path).unwrap()
}

/// The live page: document, sidebar, wizard form, feedback surfaces and
/// browser location, with an ordered journal of every mutation.
pub struct FakePage {
    pub location: RefCell<Url>,
    pub journal: RefCell<Vec<String>>,

    pub content_present: Cell<bool>,
    pub wizard_present: Cell<bool>,
    pub content_html: RefCell<String>,
    pub wizard_html: RefCell<String>,
    pub title: RefCell<Option<String>>,
    /// Inline scripts whose text contains this marker fail to run.
    pub failing_script_marker: RefCell<Option<String>>,
    pub scripts_run: RefCell<Vec<ScriptSpec>>,
    pub scripts_removed: RefCell<Vec<ScriptHandle>>,
    next_script: Cell<u64>,
    pub body_classes: RefCell<BTreeSet<String>>,

    pub history: RefCell<Vec<HistoryEntry>>,
    pub hard_navigations: RefCell<Vec<String>>,

    pub anchors: RefCell<Vec<SidebarAnchor>>,
    pub active: RefCell<Option<ActiveMarker>>,

    pub step_value: RefCell<Option<String>>,
    pub step_links: RefCell<Vec<StepLink>>,
    pub link_states: RefCell<BTreeMap<usize, StepLinkState>>,
    pub fields: RefCell<Vec<FormField>>,
    pub invalid: RefCell<Vec<String>>,
    pub scrolled_to: RefCell<Option<String>>,
    pub buttons: RefCell<BTreeMap<String, bool>>,
    pub rebinds: Cell<usize>,

    pub notices: RefCell<Vec<String>>,
    pub modals: RefCell<Vec<DuplicateModalView>>,
    pub popups: RefCell<Vec<PopupView>>,
    pub popup_hides: Cell<usize>,
    pub notification_views: RefCell<Vec<NotificationView>>,
    pub badges: RefCell<Vec<BadgeView>>,
    pub search_boxes: RefCell<Vec<Option<String>>>,
}

impl FakePage {
    pub fn at(path: &str) -> Rc<Self> {
        Rc::new(Self {
            location: RefCell::new(page_url(path)),
            journal: RefCell::default(),
            content_present: Cell::new(true),
            wizard_present: Cell::new(false),
            content_html: RefCell::default(),
            wizard_html: RefCell::default(),
            title: RefCell::default(),
            failing_script_marker: RefCell::default(),
            scripts_run: RefCell::default(),
            scripts_removed: RefCell::default(),
            next_script: Cell::new(0),
            body_classes: RefCell::default(),
            history: RefCell::default(),
            hard_navigations: RefCell::default(),
            anchors: RefCell::default(),
            active: RefCell::default(),
            step_value: RefCell::default(),
            step_links: RefCell::default(),
            link_states: RefCell::default(),
            fields: RefCell::default(),
            invalid: RefCell::default(),
            scrolled_to: RefCell::default(),
            buttons: RefCell::default(),
            rebinds: Cell::new(0),
            notices: RefCell::default(),
            modals: RefCell::default(),
            popups: RefCell::default(),
            popup_hides: Cell::new(0),
            notification_views: RefCell::default(),
            badges: RefCell::default(),
            search_boxes: RefCell::default(),
        })
    }

    /// A registration page on `step` with links to steps 1..=`links`.
    pub fn wizard_at(step: u32, links: u32) -> Rc<Self> {
        let page = Self::at("/customers/register/");
        page.wizard_present.set(true);
        *page.step_value.borrow_mut() = Some(step.to_string());
        *page.step_links.borrow_mut() = (1..=links)
            .map(|n| StepLink {
                index: (n - 1) as usize,
                href: format!("/customers/register/?step={n}"),
            })
            .collect();
        page
    }

    pub fn set_fields(&self, fields: Vec<FormField>) {
        *self.fields.borrow_mut() = fields;
    }

    pub fn field(&self, name: &str) -> Option<FormField> {
        self.fields.borrow().iter().find(|f| f.name == name).cloned()
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }

    fn log(&self, entry: impl Into<String>) {
        self.journal.borrow_mut().push(entry.into());
    }
}

impl DocumentPort for FakePage {
    fn replace_region(&self, region: Region, html: &str) -> Result<(), DomError> {
        match region {
            Region::Content if self.content_present.get() => {
                *self.content_html.borrow_mut() = html.to_string();
            }
            Region::Wizard if self.wizard_present.get() => {
                *self.wizard_html.borrow_mut() = html.to_string();
                *self.step_value.borrow_mut() =
                    read_step_field(html, "step").map(|step| step.to_string());
            }
            _ => return Err(DomError::RegionMissing(region)),
        }
        self.log(format!("replace:{region:?}"));
        Ok(())
    }

    fn run_script(&self, script: &ScriptSpec) -> Result<ScriptHandle, DomError> {
        if let Some(marker) = self.failing_script_marker.borrow().as_deref() {
            if script.text.contains(marker) {
                self.log("script-failed");
                return Err(DomError::Script(format!("boom in {}", script.text)));
            }
        }
        self.scripts_run.borrow_mut().push(script.clone());
        self.log(format!("script:{}", script.src.as_deref().unwrap_or(script.text.as_str())));
        let id = self.next_script.get() + 1;
        self.next_script.set(id);
        Ok(ScriptHandle(id))
    }

    fn remove_script(&self, handle: ScriptHandle) {
        self.scripts_removed.borrow_mut().push(handle);
    }

    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = Some(title.to_string());
    }

    fn prepend_to_region(&self, region: Region, html: &str) -> Result<(), DomError> {
        self.log(format!("prepend:{region:?}:{html}"));
        Ok(())
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.borrow().contains(class)
    }

    fn set_body_class(&self, class: &str, present: bool) {
        let mut classes = self.body_classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}

impl SidebarPort for FakePage {
    fn anchors(&self) -> Vec<SidebarAnchor> {
        self.anchors.borrow().clone()
    }

    fn clear_active(&self) {
        *self.active.borrow_mut() = None;
    }

    fn mark_active(&self, marker: &ActiveMarker) {
        *self.active.borrow_mut() = Some(*marker);
    }
}

impl BrowserPort for FakePage {
    fn current_url(&self) -> Url {
        self.location.borrow().clone()
    }

    fn hard_navigate(&self, url: &str) {
        self.log(format!("hard:{url}"));
        self.hard_navigations.borrow_mut().push(url.to_string());
    }

    fn push_history(&self, entry: &HistoryEntry) {
        self.log(format!("push:{}", entry.url));
        self.history.borrow_mut().push(entry.clone());
        if let Ok(url) = Url::parse(&entry.url) {
            *self.location.borrow_mut() = url;
        }
    }
}

impl WizardViewPort for FakePage {
    fn is_present(&self) -> bool {
        self.wizard_present.get()
    }

    fn step_field(&self, _name: &str) -> Option<String> {
        self.step_value.borrow().clone()
    }

    fn set_step_field(&self, _name: &str, value: &str) -> bool {
        let mut step = self.step_value.borrow_mut();
        if step.is_none() {
            return false;
        }
        *step = Some(value.to_string());
        true
    }

    fn step_links(&self) -> Vec<StepLink> {
        self.step_links.borrow().clone()
    }

    fn set_step_link_state(&self, index: usize, state: StepLinkState) {
        self.link_states.borrow_mut().insert(index, state);
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.fields.borrow().clone()
    }

    fn apply_field(&self, assignment: &FieldAssignment) {
        let mut fields = self.fields.borrow_mut();
        if let Some(field) = fields.iter_mut().find(|f| f.index == assignment.index) {
            match &assignment.change {
                FieldChange::Value(value) => field.value = value.clone(),
                FieldChange::Checked(checked) => field.checked = *checked,
            }
        }
    }

    fn mark_invalid(&self, name: &str) -> bool {
        if !self.fields.borrow().iter().any(|f| f.name == name) {
            return false;
        }
        self.log(format!("invalid:{name}"));
        self.invalid.borrow_mut().push(name.to_string());
        true
    }

    fn scroll_to_first_invalid(&self) -> Option<String> {
        let invalid = self.invalid.borrow();
        let first = self
            .fields
            .borrow()
            .iter()
            .find(|f| invalid.contains(&f.name))
            .map(|f| f.name.clone());
        if let Some(name) = &first {
            self.log(format!("scroll:{name}"));
        }
        *self.scrolled_to.borrow_mut() = first.clone();
        first
    }

    fn set_control_disabled(&self, id: &str, disabled: bool) -> bool {
        let mut buttons = self.buttons.borrow_mut();
        match buttons.get_mut(id) {
            Some(state) => {
                *state = disabled;
                true
            }
            None => false,
        }
    }
}

impl HandlerBinderPort for FakePage {
    fn rebind(&self) {
        self.log("rebind");
        self.rebinds.set(self.rebinds.get() + 1);
    }
}

impl FeedbackPort for FakePage {
    fn show_notice(&self, notice: &Node) {
        self.log(format!("notice:{}", notice.text_content()));
        self.notices.borrow_mut().push(notice.to_html());
    }

    fn show_duplicate_modal(&self, view: &DuplicateModalView) {
        self.log("modal");
        self.modals.borrow_mut().push(view.clone());
    }

    fn show_popup(&self, view: &PopupView) {
        self.popups.borrow_mut().push(view.clone());
    }

    fn hide_popup(&self) {
        self.popup_hides.set(self.popup_hides.get() + 1);
    }
}

impl WidgetPort for FakePage {
    fn render_notifications(&self, view: &NotificationView) {
        self.notification_views.borrow_mut().push(view.clone());
    }

    fn show_notification_badge(&self, badge: &BadgeView) {
        self.badges.borrow_mut().push(badge.clone());
    }

    fn render_search(&self, results: Option<&Node>) {
        self.search_boxes
            .borrow_mut()
            .push(results.map(Node::to_html));
    }
}

/// Scripted HTTP: responses are queued per method and path; the last one
/// for a route is repeated. Unknown routes answer 404.
#[derive(Default)]
pub struct FakeHttp {
    routes: RefCell<Vec<(HttpMethod, String, VecDeque<Result<HttpResponse, HttpError>>)>>,
    pub requests: RefCell<Vec<HttpRequest>>,
    gate: RefCell<Option<Rc<Notify>>>,
}

impl FakeHttp {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Err(HttpError::Transport("connection reset".to_string())),
        );
    }

    fn push(&self, method: HttpMethod, path: &str, result: Result<HttpResponse, HttpError>) {
        let mut routes = self.routes.borrow_mut();
        match routes
            .iter_mut()
            .find(|(m, p, _)| *m == method && p == path)
        {
            Some((_, _, queue)) => queue.push_back(result),
            None => routes.push((method, path.to_string(), VecDeque::from([result]))),
        }
    }

    /// Hold the next request's response until the returned gate is notified.
    pub fn hold_next(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.gate.borrow_mut() = Some(gate.clone());
        gate
    }

    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url.path() == path)
            .cloned()
            .collect()
    }
}

#[async_trait(?Send)]
impl HttpPort for FakeHttp {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(request.clone());
        let result = self.next_result(&request);
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(gate) => gate.notified().await,
            None => tokio::task::yield_now().await,
        }
        result
    }
}

impl FakeHttp {
    fn next_result(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut routes = self.routes.borrow_mut();
        let Some((_, _, queue)) = routes
            .iter_mut()
            .find(|(m, p, _)| *m == request.method && p == request.url.path())
        else {
            return Ok(HttpResponse {
                status: 404,
                body: String::new(),
            });
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

/// Records requested delays and yields once instead of waiting.
#[derive(Default)]
pub struct YieldingSleeper {
    pub slept: RefCell<Vec<Duration>>,
    /// Called with the number of sleeps so far, before yielding.
    pub on_sleep: RefCell<Option<Box<dyn Fn(usize)>>>,
}

impl YieldingSleeper {
    pub fn count(&self) -> usize {
        self.slept.borrow().len()
    }
}

#[async_trait(?Send)]
impl SleepPort for YieldingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
        if let Some(hook) = self.on_sleep.borrow().as_ref() {
            hook(self.count());
        }
        tokio::task::yield_now().await;
    }
}

pub struct Harness {
    pub page: Rc<FakePage>,
    pub http: Rc<FakeHttp>,
    pub store: Rc<InMemoryKeyValueStore>,
    pub sleeper: Rc<YieldingSleeper>,
}

static TRACE_INIT: Once = Once::new();

/// Route engine logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

impl Harness {
    pub fn new(page: Rc<FakePage>) -> Self {
        init_tracing();
        Self {
            page,
            http: FakeHttp::new(),
            store: Rc::new(InMemoryKeyValueStore::new()),
            sleeper: Rc::new(YieldingSleeper::default()),
        }
    }

    pub fn deps(&self) -> AppDeps {
        AppDeps {
            document: self.page.clone(),
            sidebar: self.page.clone(),
            wizard_view: self.page.clone(),
            binder: self.page.clone(),
            feedback: self.page.clone(),
            widgets: self.page.clone(),
            browser: self.page.clone(),
            http: self.http.clone(),
            storage: self.store.clone(),
            sleeper: self.sleeper.clone(),
            config: DashboardConfig::default(),
        }
    }

    pub fn dashboard(&self) -> td_app::Dashboard {
        td_app::Dashboard::new(self.deps())
    }
}
