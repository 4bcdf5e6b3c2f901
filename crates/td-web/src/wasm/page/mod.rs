//! The live document behind every page-facing port.
//!
//! One [`WebPage`] is created at boot and shared as `Rc<dyn Port>` for the
//! document, sidebar, wizard view, feedback, widget and browser ports.

mod feedback;
mod sidebar;
mod widgets;
mod wizard_view;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use td_core::config::SelectorConfig;
use td_core::ports::{BrowserPort, DocumentPort, DomError, Region, ScriptHandle};
use td_core::{HistoryEntry, ScriptSpec};
use tracing::{debug, warn};
use url::Url;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlScriptElement, Window};

pub struct WebPage {
    window: Window,
    document: Document,
    selectors: SelectorConfig,
    /// Location at boot, used when `location.href` cannot be read.
    boot_url: Url,
    scripts: RefCell<HashMap<ScriptHandle, Element>>,
    next_script: Cell<u64>,
}

fn dom_error(err: JsValue) -> DomError {
    DomError::Operation(format!("{err:?}"))
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
pub(crate) fn css_attr_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub(crate) fn set_display(element: &Element, display: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("display", display);
    }
}

impl WebPage {
    pub fn new(window: Window, document: Document, selectors: SelectorConfig) -> Option<Self> {
        let href = window.location().href().ok()?;
        let boot_url = Url::parse(&href).ok()?;
        Some(Self {
            window,
            document,
            selectors,
            boot_url,
            scripts: RefCell::new(HashMap::new()),
            next_script: Cell::new(0),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn query(&self, selector: &str) -> Option<Element> {
        if selector.trim().is_empty() {
            return None;
        }
        self.document.query_selector(selector).ok().flatten()
    }

    pub(crate) fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.get(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                warn!(selector, error = ?err, "selector rejected by the document");
                Vec::new()
            }
        }
    }

    pub(crate) fn query_within(root: &Element, selector: &str) -> Vec<Element> {
        match root.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.get(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub(crate) fn region(&self, region: Region) -> Option<Element> {
        match region {
            Region::Content => self
                .query(&self.selectors.content)
                .or_else(|| self.query(&self.selectors.content_fallback)),
            Region::Wizard => self.query(&self.selectors.wizard_container),
        }
    }

    pub(crate) fn wizard_form(&self) -> Option<Element> {
        self.region(Region::Wizard)?.query_selector("form").ok().flatten()
    }

    pub fn sidebar_selector(&self) -> &str {
        &self.selectors.sidebar
    }

    /// Class list and text of the last server-rendered `.alert`.
    pub fn last_alert(&self) -> Option<(String, String)> {
        let alert = self.query_all(".alert").pop()?;
        let text = alert.text_content().unwrap_or_default();
        Some((alert.class_name(), text.trim().to_string()))
    }
}

impl DocumentPort for WebPage {
    fn replace_region(&self, region: Region, html: &str) -> Result<(), DomError> {
        let element = self.region(region).ok_or(DomError::RegionMissing(region))?;
        element.set_inner_html(html);
        Ok(())
    }

    fn run_script(&self, script: &ScriptSpec) -> Result<ScriptHandle, DomError> {
        let element = self
            .document
            .create_element("script")
            .map_err(|err| DomError::Script(format!("{err:?}")))?;
        let script_element = element
            .dyn_ref::<HtmlScriptElement>()
            .ok_or_else(|| DomError::Script("not a script element".to_string()))?;
        if let Some(script_type) = script.script_type.as_deref() {
            script_element.set_type(script_type);
        }
        if script.is_external() {
            script_element.set_src(script.src.as_deref().unwrap_or_default());
        } else {
            script_element.set_text(&script.text)
                .map_err(|err| DomError::Script(format!("{err:?}")))?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| DomError::Operation("document has no body".to_string()))?;
        body.append_child(&element)
            .map_err(|err| DomError::Script(format!("{err:?}")))?;

        let handle = ScriptHandle(self.next_script.get());
        self.next_script.set(handle.0.wrapping_add(1));
        self.scripts.borrow_mut().insert(handle, element);
        Ok(handle)
    }

    fn remove_script(&self, handle: ScriptHandle) {
        if let Some(element) = self.scripts.borrow_mut().remove(&handle) {
            element.remove();
        }
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn prepend_to_region(&self, region: Region, html: &str) -> Result<(), DomError> {
        let element = self.region(region).ok_or(DomError::RegionMissing(region))?;
        element
            .insert_adjacent_html("afterbegin", html)
            .map_err(dom_error)
    }

    fn has_body_class(&self, class: &str) -> bool {
        self.document
            .body()
            .is_some_and(|body| body.class_list().contains(class))
    }

    fn set_body_class(&self, class: &str, present: bool) {
        if let Some(body) = self.document.body() {
            if let Err(err) = body.class_list().toggle_with_force(class, present) {
                warn!(class, error = ?err, "body class update failed");
            }
        }
    }
}

impl BrowserPort for WebPage {
    fn current_url(&self) -> Url {
        self.window
            .location()
            .href()
            .ok()
            .and_then(|href| Url::parse(&href).ok())
            .unwrap_or_else(|| self.boot_url.clone())
    }

    fn hard_navigate(&self, url: &str) {
        debug!(url, "full page load");
        if let Err(err) = self.window.location().set_href(url) {
            warn!(url, error = ?err, "hard navigation rejected");
        }
    }

    fn push_history(&self, entry: &HistoryEntry) {
        let Ok(history) = self.window.history() else {
            warn!("history api unavailable");
            return;
        };
        let state = js_sys::JSON::parse(&entry.to_json()).unwrap_or(JsValue::NULL);
        if let Err(err) = history.push_state_with_url(&state, "", Some(&entry.url)) {
            warn!(url = %entry.url, error = ?err, "history push failed");
        }
    }
}
