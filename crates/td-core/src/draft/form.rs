use serde::{Deserialize, Serialize};

/// Form control kinds that matter for capture, restore and submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Any value-carrying input: text, email, tel, number, date, hidden...
    Text,
    TextArea,
    Select,
    Checkbox,
    Radio,
    File,
    /// submit, button, reset and image inputs.
    Button,
}

impl FieldKind {
    /// Map an `<input type=...>` attribute.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "file" => Self::File,
            "submit" | "button" | "reset" | "image" => Self::Button,
            _ => Self::Text,
        }
    }

    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Whether the control takes part in draft capture and restore.
    pub fn is_persistable(self) -> bool {
        !matches!(self, Self::File | Self::Button)
    }
}

/// Snapshot of one named form control, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Position among the wizard form's controls.
    pub index: usize,
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
}

impl FormField {
    pub fn text(index: usize, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            kind: FieldKind::Text,
            value: value.into(),
            checked: false,
        }
    }

    pub fn checkable(
        index: usize,
        kind: FieldKind,
        name: impl Into<String>,
        value: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            kind,
            value: value.into(),
            checked,
        }
    }

    /// Successful controls of a submission: checkables only when checked,
    /// buttons and files never (files are not part of this wizard).
    pub fn submission_pairs(fields: &[FormField]) -> Vec<(String, String)> {
        fields
            .iter()
            .filter(|field| !field.name.is_empty() && field.kind.is_persistable())
            .filter(|field| !field.kind.is_checkable() || field.checked)
            .map(|field| {
                let value = if field.kind.is_checkable() && field.value.is_empty() {
                    "on".to_string()
                } else {
                    field.value.clone()
                };
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Trimmed value of the first field called `name`.
    pub fn value_of<'a>(fields: &'a [FormField], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.trim())
    }

    /// Whether any radio called `name` is checked.
    pub fn radio_checked(fields: &[FormField], name: &str) -> bool {
        fields
            .iter()
            .any(|field| field.name == name && field.kind == FieldKind::Radio && field.checked)
    }
}
