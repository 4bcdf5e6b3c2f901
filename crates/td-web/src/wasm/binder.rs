//! Page behaviors re-applied whenever wizard markup is replaced.

use js_sys::{Array, Function, Reflect};
use td_core::ports::HandlerBinderPort;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, Window};

use crate::form_rules::{mask_phone, visible_sections, BrandMapping, TypeSection};

use super::page::set_display;

pub const CUSTOMER_TYPE_SELECTOR: &str = "select[name=\"customer_type\"]";
pub const PHONE_SELECTOR: &str = "input[name=\"phone\"]";
pub const ITEM_SELECT_ID: &str = "id_item_name";
const BRAND_SELECT_ID: &str = "id_brand";
const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

/// Listeners are delegated at the document, so rebinding only re-applies
/// state derived from the new markup.
pub struct PageBinder {
    window: Window,
    document: Document,
}

impl PageBinder {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Show the sections matching the selected customer type and move the
    /// `required` flags with them.
    pub fn apply_customer_type(&self) {
        let Some(select) = self
            .document
            .query_selector(CUSTOMER_TYPE_SELECTOR)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let selected = select.value();
        let visible = visible_sections(&selected);

        for section in TypeSection::ALL {
            let Some(container) = self.document.get_element_by_id(section.element_id()) else {
                continue;
            };
            if let Ok(controls) = container.query_selector_all("input, select, textarea") {
                for control in (0..controls.length()).filter_map(|i| controls.get(i)) {
                    if let Ok(control) = control.dyn_into::<web_sys::Element>() {
                        let _ = control.remove_attribute("required");
                    }
                }
            }
            if visible.contains(&section) {
                set_display(&container, "block");
                if let Ok(Some(control)) = container.query_selector(section.required_control()) {
                    let _ = control.set_attribute("required", "required");
                }
            } else {
                set_display(&container, "none");
            }
        }
        debug!(customer_type = %selected, sections = visible.len(), "customer type sections applied");
    }

    /// Select the brand the picked item maps to.
    pub fn apply_brand(&self, item_select: &HtmlSelectElement) {
        let mapping = BrandMapping::parse(item_select.get_attribute("data-brands").as_deref());
        let Some(brand_select) = self
            .document
            .get_element_by_id(BRAND_SELECT_ID)
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let options: Vec<(String, String)> = (0..brand_select.length())
            .filter_map(|index| brand_select.item(index))
            .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| (option.text(), option.value()))
            .collect();
        let borrowed = options.iter().map(|(text, value)| (text.as_str(), value.as_str()));
        if let Some(index) = mapping.option_for(&item_select.value(), borrowed) {
            brand_select.set_selected_index(index as i32);
        }
    }

    pub fn mask_phone_input(&self, input: &HtmlInputElement) {
        let masked = mask_phone(&input.value());
        if masked != input.value() {
            input.set_value(&masked);
        }
    }

    /// `new bootstrap.Tooltip(element)` for every tooltip trigger.
    fn init_tooltips(&self) -> Result<(), JsValue> {
        let bootstrap = Reflect::get(self.window.as_ref(), &JsValue::from_str("bootstrap"))?;
        if bootstrap.is_undefined() {
            return Ok(());
        }
        let tooltip: Function = Reflect::get(&bootstrap, &JsValue::from_str("Tooltip"))?.dyn_into()?;
        let triggers = self.document.query_selector_all(TOOLTIP_SELECTOR)?;
        for trigger in (0..triggers.length()).filter_map(|i| triggers.get(i)) {
            Reflect::construct(&tooltip, &Array::of1(&trigger))?;
        }
        Ok(())
    }
}

impl HandlerBinderPort for PageBinder {
    fn rebind(&self) {
        self.apply_customer_type();
        if let Err(err) = self.init_tooltips() {
            debug!(error = ?err, "tooltip initialization skipped");
        }
    }
}
