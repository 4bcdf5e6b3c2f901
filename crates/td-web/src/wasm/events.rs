//! Delegated DOM listeners.
//!
//! Every listener sits on the document (or the window for `popstate`), so
//! markup swapped in later is covered without re-attaching anything.

use std::cell::RefCell;
use std::rc::Rc;

use td_app::Dashboard;
use td_core::LinkDecision;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlSelectElement, MouseEvent, PopStateEvent,
    Window,
};

use crate::click::{leaves_current_tab, ClickModifiers};

use super::binder::{PageBinder, CUSTOMER_TYPE_SELECTOR, ITEM_SELECT_ID, PHONE_SELECTOR};

const STEP_LINK_SELECTOR: &str = "[data-step-link=\"true\"]";
const MODE_SELECTOR: &str = ".mode";
const POPUP_ID: &str = "actionPopup";
const SEARCH_BOX_ID: &str = "global-search-results";
const SEARCH_INPUTS: [(&str, &str); 2] = [
    (
        ".nav-menus .search-form input[type=search]",
        "Search customers by name, phone, email, code",
    ),
    ("#searchInput input[type=search]", "Search customers"),
];

type Listener = Closure<dyn FnMut(Event)>;

thread_local! {
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
    static FLASH: RefCell<Option<Closure<dyn Fn(JsValue, JsValue)>>> = const { RefCell::new(None) };
}

/// Everything the handlers need, cloned into each closure.
#[derive(Clone)]
pub struct EventContext {
    pub dashboard: Rc<Dashboard>,
    pub binder: Rc<PageBinder>,
    pub document: Document,
}

impl EventContext {
    fn wizard_selector(&self) -> &str {
        &self.dashboard.config.selectors.wizard_container
    }

    fn sidebar_anchor_selector(&self) -> String {
        format!("{} a", self.dashboard.config.selectors.sidebar)
    }
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(element: &Element, selector: &str) -> Option<Element> {
    if selector.trim().is_empty() {
        return None;
    }
    element.closest(selector).ok().flatten()
}

fn is_search_input(element: &Element) -> bool {
    SEARCH_INPUTS
        .iter()
        .any(|(selector, _)| element.matches(selector).unwrap_or(false))
}

fn listen(target: &web_sys::EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(handler));
    match target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()) {
        Ok(()) => LISTENERS.with(|slot| slot.borrow_mut().push(callback)),
        Err(err) => warn!(kind, error = ?err, "listener registration failed"),
    }
}

/// Reflect the theme on every `.mode` toggle.
pub fn sync_mode_toggles(document: &Document, dark: bool) {
    if let Ok(toggles) = document.query_selector_all(MODE_SELECTOR) {
        for toggle in (0..toggles.length()).filter_map(|i| toggles.get(i)) {
            if let Ok(toggle) = toggle.dyn_into::<Element>() {
                let _ = toggle.class_list().toggle_with_force("active", dark);
            }
        }
    }
}

pub fn install(window: &Window, context: EventContext) {
    for (selector, placeholder) in SEARCH_INPUTS {
        if let Ok(Some(input)) = context.document.query_selector(selector) {
            let _ = input.set_attribute("placeholder", placeholder);
        }
    }

    let document_target: &web_sys::EventTarget = context.document.as_ref();

    let ctx = context.clone();
    listen(document_target, "click", move |event| on_click(&ctx, event));

    let ctx = context.clone();
    listen(document_target, "submit", move |event| on_submit(&ctx, event));

    let ctx = context.clone();
    listen(document_target, "input", move |event| on_input(&ctx, event));

    let ctx = context.clone();
    listen(document_target, "change", move |event| on_change(&ctx, event));

    let ctx = context.clone();
    listen(window.as_ref(), "popstate", move |event| {
        let state = event
            .dyn_ref::<PopStateEvent>()
            .map(PopStateEvent::state)
            .filter(|state| !state.is_null() && !state.is_undefined())
            .and_then(|state| js_sys::JSON::stringify(&state).ok())
            .and_then(|json| json.as_string());
        let navigation = ctx.dashboard.navigation.clone();
        spawn_local(async move {
            navigation.on_pop_state(state.as_deref()).await;
        });
    });

    expose_flash(window, context.dashboard);
}

/// `window.flash(level, message)` for inline page scripts.
fn expose_flash(window: &Window, dashboard: Rc<Dashboard>) {
    let callback = Closure::<dyn Fn(JsValue, JsValue)>::wrap(Box::new(
        move |level: JsValue, message: JsValue| {
            let level = level.as_string().unwrap_or_default();
            let message = message.as_string().unwrap_or_default();
            let popup = dashboard.popup.clone();
            spawn_local(async move { popup.flash(&level, &message).await });
        },
    ));
    let installed = js_sys::Reflect::set(
        window.as_ref(),
        &JsValue::from_str("flash"),
        callback.as_ref(),
    );
    match installed {
        Ok(_) => FLASH.with(|slot| *slot.borrow_mut() = Some(callback)),
        Err(err) => warn!(error = ?err, "window.flash not installed"),
    }
}

fn on_click(ctx: &EventContext, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };

    if target.id() == POPUP_ID {
        ctx.dashboard.popup.dismiss();
        return;
    }

    if let Some(search_box) = ctx.document.get_element_by_id(SEARCH_BOX_ID) {
        let clicked: &web_sys::Node = &target;
        if !search_box.contains(Some(clicked)) && !is_search_input(&target) {
            ctx.dashboard.search.dismiss();
        }
    }

    if closest(&target, MODE_SELECTOR).is_some() {
        let theme = ctx.dashboard.theme.clone();
        let document = ctx.document.clone();
        spawn_local(async move {
            let mode = theme.execute().await;
            sync_mode_toggles(&document, mode.is_dark());
        });
        return;
    }

    let modifiers = event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| ClickModifiers {
            button: mouse.button(),
            meta: mouse.meta_key(),
            ctrl: mouse.ctrl_key(),
            shift: mouse.shift_key(),
            alt: mouse.alt_key(),
        })
        .unwrap_or_default();

    if let Some(link) = closest(&target, STEP_LINK_SELECTOR) {
        if !modifiers.is_plain() {
            return;
        }
        event.prevent_default();
        let href = link.get_attribute("href").unwrap_or_default();
        let wizard = ctx.dashboard.wizard.clone();
        spawn_local(async move {
            if let Err(err) = wizard.on_step_link(&href).await {
                warn!(error = %err, "step load failed");
            }
        });
        return;
    }

    let Some(anchor) = closest(&target, &ctx.sidebar_anchor_selector()) else {
        return;
    };
    if event.default_prevented() || !modifiers.is_plain() {
        return;
    }
    let target_attr = anchor.get_attribute("target");
    if leaves_current_tab(target_attr.as_deref(), anchor.has_attribute("download")) {
        return;
    }
    let href = anchor.get_attribute("href");
    match ctx.dashboard.navigation.should_intercept(href.as_deref()) {
        LinkDecision::PassThrough => {}
        LinkDecision::SamePage => event.prevent_default(),
        LinkDecision::Intercept(_) => {
            event.prevent_default();
            let navigation = ctx.dashboard.navigation.clone();
            spawn_local(async move {
                navigation.on_link_click(href.as_deref()).await;
            });
        }
    }
}

fn on_submit(ctx: &EventContext, event: Event) {
    let Some(form) = target_element(&event) else {
        return;
    };
    if closest(&form, ctx.wizard_selector()).is_none() {
        return;
    }
    event.prevent_default();
    let wizard = ctx.dashboard.wizard.clone();
    spawn_local(async move {
        match wizard.submit().await {
            Ok(Some(state)) => debug!(step = %state.current, "step submitted"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "step submission failed"),
        }
    });
}

fn on_input(ctx: &EventContext, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };

    if is_search_input(&target) {
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            let search = ctx.dashboard.search.clone();
            let raw = input.value();
            spawn_local(async move {
                search.on_input(&raw).await;
            });
        }
        return;
    }

    if closest(&target, ctx.wizard_selector()).is_none() {
        return;
    }
    if target.matches(PHONE_SELECTOR).unwrap_or(false) {
        if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
            ctx.binder.mask_phone_input(input);
        }
    }
    save_draft(ctx);
}

fn on_change(ctx: &EventContext, event: Event) {
    let Some(target) = target_element(&event) else {
        return;
    };
    if closest(&target, ctx.wizard_selector()).is_none() {
        return;
    }
    if target.matches(CUSTOMER_TYPE_SELECTOR).unwrap_or(false) {
        ctx.binder.apply_customer_type();
    }
    if target.id() == ITEM_SELECT_ID {
        if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
            ctx.binder.apply_brand(select);
        }
    }
    save_draft(ctx);
}

fn save_draft(ctx: &EventContext) {
    let wizard = ctx.dashboard.wizard.clone();
    spawn_local(async move { wizard.on_input().await });
}
