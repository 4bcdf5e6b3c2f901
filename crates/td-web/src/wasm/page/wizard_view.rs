use td_core::draft::{FieldAssignment, FieldChange};
use td_core::ports::{Region, WizardViewPort};
use td_core::wizard::{StepLink, StepLinkState};
use td_core::{FieldKind, FormField};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use super::{css_attr_value, WebPage};

const CONTROLS: &str = "input[name], select[name], textarea[name], button[name]";
const STEP_LINKS: &str = "[data-step-link=\"true\"]";

fn read_field(index: usize, control: &Element) -> Option<FormField> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        let kind = FieldKind::from_input_type(&input.type_());
        return Some(FormField {
            index,
            name: input.name(),
            kind,
            value: input.value(),
            checked: kind.is_checkable() && input.checked(),
        });
    }
    if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        return Some(FormField {
            index,
            name: select.name(),
            kind: FieldKind::Select,
            value: select.value(),
            checked: false,
        });
    }
    if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        return Some(FormField {
            index,
            name: area.name(),
            kind: FieldKind::TextArea,
            value: area.value(),
            checked: false,
        });
    }
    Some(FormField {
        index,
        name: control.get_attribute("name")?,
        kind: FieldKind::Button,
        value: control.get_attribute("value").unwrap_or_default(),
        checked: false,
    })
}

fn write_value(control: &Element, value: &str) {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

impl WebPage {
    fn wizard_controls(&self) -> Vec<Element> {
        self.wizard_form()
            .map(|form| Self::query_within(&form, CONTROLS))
            .unwrap_or_default()
    }

    fn named_control(&self, name: &str) -> Option<Element> {
        let selector = format!("[name=\"{}\"]", css_attr_value(name));
        self.wizard_form()?.query_selector(&selector).ok().flatten()
    }
}

impl WizardViewPort for WebPage {
    fn is_present(&self) -> bool {
        self.region(Region::Wizard).is_some()
    }

    fn step_field(&self, name: &str) -> Option<String> {
        let control = self.named_control(name)?;
        control.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn set_step_field(&self, name: &str, value: &str) -> bool {
        match self.named_control(name) {
            Some(control) => {
                write_value(&control, value);
                true
            }
            None => false,
        }
    }

    fn step_links(&self) -> Vec<StepLink> {
        self.query_all(STEP_LINKS)
            .into_iter()
            .enumerate()
            .map(|(index, link)| StepLink {
                index,
                href: link.get_attribute("href").unwrap_or_default(),
            })
            .collect()
    }

    fn set_step_link_state(&self, index: usize, state: StepLinkState) {
        if let Some(link) = self.query_all(STEP_LINKS).into_iter().nth(index) {
            let classes = link.class_list();
            let _ = classes.toggle_with_force("disabled", state.disabled);
            let _ = classes.toggle_with_force("active", state.active);
        }
    }

    fn form_fields(&self) -> Vec<FormField> {
        self.wizard_controls()
            .iter()
            .enumerate()
            .filter_map(|(index, control)| read_field(index, control))
            .filter(|field| !field.name.is_empty())
            .collect()
    }

    fn apply_field(&self, assignment: &FieldAssignment) {
        let Some(control) = self.wizard_controls().into_iter().nth(assignment.index) else {
            return;
        };
        match &assignment.change {
            FieldChange::Value(value) => write_value(&control, value),
            FieldChange::Checked(checked) => {
                if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
                    input.set_checked(*checked);
                }
            }
        }
    }

    fn mark_invalid(&self, name: &str) -> bool {
        match self.named_control(name) {
            Some(control) => control.class_list().add_1("is-invalid").is_ok(),
            None => false,
        }
    }

    fn scroll_to_first_invalid(&self) -> Option<String> {
        let invalid = self
            .region(Region::Wizard)?
            .query_selector(".is-invalid")
            .ok()
            .flatten()?;
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        invalid.scroll_into_view_with_scroll_into_view_options(&options);
        invalid.get_attribute("name")
    }

    fn set_control_disabled(&self, id: &str, disabled: bool) -> bool {
        match self.document().get_element_by_id(id) {
            Some(control) => control.toggle_attribute_with_force("disabled", disabled).is_ok(),
            None => false,
        }
    }
}
