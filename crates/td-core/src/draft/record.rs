use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::form::{FieldKind, FormField};

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("malformed draft record: {0}")]
    Malformed(String),
    #[error("failed to encode draft record: {0}")]
    Encode(String),
}

/// A stored field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DraftValue {
    Flag(bool),
    Text(String),
    Many(Vec<String>),
}

impl DraftValue {
    /// Whether a checkbox or radio carrying `own_value` should be checked.
    pub fn checks(&self, own_value: &str) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => text == "true" || text == own_value,
            Self::Many(values) => values.iter().any(|value| value == own_value),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Flag(flag) => flag.to_string(),
            Self::Text(text) => text.clone(),
            Self::Many(values) => values.join(","),
        }
    }
}

/// How one field is updated on restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Value(String),
    Checked(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub index: usize,
    pub change: FieldChange,
}

/// Field name to value, stored as one JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord(BTreeMap<String, DraftValue>);

fn is_captured(field: &FormField, excluded: &[String]) -> bool {
    !field.name.is_empty()
        && field.kind.is_persistable()
        && !excluded.iter().any(|name| name == &field.name)
}

impl DraftRecord {
    /// Capture every persistable field. A lone checkbox becomes a flag, a
    /// checkbox group sharing a name becomes the list of checked values and
    /// a radio group becomes the checked value (omitted when none is).
    pub fn capture(fields: &[FormField], excluded: &[String]) -> Self {
        let mut groups: BTreeMap<&str, Vec<&FormField>> = BTreeMap::new();
        for field in fields.iter().filter(|field| is_captured(field, excluded)) {
            groups.entry(field.name.as_str()).or_default().push(field);
        }

        let mut values = BTreeMap::new();
        for (name, members) in groups {
            let value = match members[0].kind {
                FieldKind::Checkbox if members.len() == 1 => Some(DraftValue::Flag(members[0].checked)),
                FieldKind::Checkbox => Some(DraftValue::Many(
                    members
                        .iter()
                        .filter(|member| member.checked)
                        .map(|member| member.value.clone())
                        .collect(),
                )),
                FieldKind::Radio => members
                    .iter()
                    .find(|member| member.checked)
                    .map(|member| DraftValue::Text(member.value.clone())),
                _ => members
                    .last()
                    .map(|member| DraftValue::Text(member.value.clone())),
            };
            if let Some(value) = value {
                values.insert(name.to_string(), value);
            }
        }
        Self(values)
    }

    /// Assignments that bring `fields` back to the stored values. Fields
    /// without a stored value are left alone.
    pub fn restore_plan(&self, fields: &[FormField], excluded: &[String]) -> Vec<FieldAssignment> {
        fields
            .iter()
            .filter(|field| is_captured(field, excluded))
            .filter_map(|field| {
                let stored = self.0.get(&field.name)?;
                let change = if field.kind.is_checkable() {
                    FieldChange::Checked(stored.checks(&field.value))
                } else {
                    FieldChange::Value(stored.as_text())
                };
                Some(FieldAssignment {
                    index: field.index,
                    change,
                })
            })
            .collect()
    }

    /// Like [`restore_plan`](Self::restore_plan), but only for fields the
    /// freshly rendered markup left blank: empty values and groups with
    /// nothing checked. Values the server rendered win.
    pub fn fill_plan(&self, fields: &[FormField], excluded: &[String]) -> Vec<FieldAssignment> {
        let is_blank = |field: &FormField| {
            if field.kind.is_checkable() {
                !fields
                    .iter()
                    .any(|other| other.name == field.name && other.checked)
            } else {
                field.value.is_empty()
            }
        };
        let blank: Vec<FormField> = fields.iter().filter(|f| is_blank(f)).cloned().collect();
        self.restore_plan(&blank, excluded)
    }

    pub fn get(&self, name: &str) -> Option<&DraftValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        serde_json::from_str(raw).map_err(|e| DraftError::Malformed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DraftError> {
        serde_json::to_string(self).map_err(|e| DraftError::Encode(e.to_string()))
    }
}
