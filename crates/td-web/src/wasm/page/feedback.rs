use js_sys::{Function, Reflect};
use td_core::ports::{FeedbackPort, Region};
use td_core::render::{DuplicateModalView, Node, PopupView};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use super::{set_display, WebPage};

const POPUP_ID: &str = "actionPopup";
const POPUP_MARKUP: &str = r#"<div class="action-popup-card action-popup-enter"><div class="action-popup-icon" id="actionPopupIcon"></div><div class="action-popup-title" id="actionPopupTitle"></div><p class="action-popup-message" id="actionPopupMessage"></p></div>"#;

/// `bootstrap.Modal.getOrCreateInstance(element).show()`.
fn show_bootstrap_modal(window: &JsValue, element: &Element) -> Result<(), JsValue> {
    let bootstrap = Reflect::get(window, &JsValue::from_str("bootstrap"))?;
    let modal = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?;
    let get_instance: Function =
        Reflect::get(&modal, &JsValue::from_str("getOrCreateInstance"))?.dyn_into()?;
    let instance = get_instance.call1(&modal, element)?;
    let show: Function = Reflect::get(&instance, &JsValue::from_str("show"))?.dyn_into()?;
    show.call0(&instance)?;
    Ok(())
}

impl WebPage {
    fn ensure_popup(&self) -> Option<Element> {
        if let Some(overlay) = self.document().get_element_by_id(POPUP_ID) {
            return Some(overlay);
        }
        let overlay = self.document().create_element("div").ok()?;
        overlay.set_id(POPUP_ID);
        overlay.set_class_name("action-popup-overlay");
        let _ = overlay.set_attribute("role", "dialog");
        let _ = overlay.set_attribute("aria-live", "polite");
        let _ = overlay.set_attribute("aria-atomic", "true");
        overlay.set_inner_html(POPUP_MARKUP);
        self.document().body()?.append_child(&overlay).ok()?;
        Some(overlay)
    }

    fn set_text_by_id(&self, id: &str, text: &str) {
        match self.document().get_element_by_id(id) {
            Some(element) => element.set_text_content(Some(text)),
            None => debug!(id, "element missing"),
        }
    }
}

impl FeedbackPort for WebPage {
    fn show_notice(&self, notice: &Node) {
        match self.region(Region::Wizard) {
            Some(wizard) => {
                if let Err(err) = wizard.insert_adjacent_html("afterbegin", &notice.to_html()) {
                    warn!(error = ?err, "notice insertion failed");
                }
            }
            None => warn!(notice = %notice.text_content(), "no wizard to attach notice to"),
        }
    }

    fn show_duplicate_modal(&self, view: &DuplicateModalView) {
        for (id, value) in &view.fields {
            self.set_text_by_id(id, value);
        }
        let buttons = [
            (DuplicateModalView::VIEW_BUTTON_ID, &view.view_href),
            (DuplicateModalView::CREATE_ORDER_BUTTON_ID, &view.create_order_href),
        ];
        for (id, href) in buttons {
            if let Some(button) = self.document().get_element_by_id(id) {
                let _ = button.set_attribute("href", href);
            }
        }

        let Some(modal) = self.document().get_element_by_id(DuplicateModalView::MODAL_ID) else {
            warn!("duplicate customer modal missing from page");
            return;
        };
        if let Err(err) = show_bootstrap_modal(self.window.as_ref(), &modal) {
            debug!(error = ?err, "bootstrap modal api unavailable, showing modal directly");
            let _ = modal.class_list().add_1("show");
            set_display(&modal, "block");
        }
    }

    fn show_popup(&self, view: &PopupView) {
        let Some(overlay) = self.ensure_popup() else {
            warn!("action popup could not be created");
            return;
        };
        if let Some(icon) = self.document().get_element_by_id("actionPopupIcon") {
            icon.set_class_name(&format!("action-popup-icon {}", view.kind.as_str()));
            icon.set_inner_html(&format!(r#"<i class="{}"></i>"#, view.kind.icon_class()));
        }
        self.set_text_by_id("actionPopupTitle", &view.title);
        self.set_text_by_id("actionPopupMessage", &view.message);
        set_display(&overlay, "flex");
    }

    fn hide_popup(&self) {
        if let Some(overlay) = self.document().get_element_by_id(POPUP_ID) {
            set_display(&overlay, "none");
        }
    }
}
