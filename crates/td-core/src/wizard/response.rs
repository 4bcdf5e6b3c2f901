//! Server response to a wizard step load or submission.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::render::NoticeKind;

/// Validation messages for one field: the server sends either a single
/// string or the list Django produces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldErrors {
    One(String),
    Many(Vec<String>),
}

impl FieldErrors {
    pub fn first_message(&self) -> Option<&str> {
        match self {
            Self::One(message) => Some(message.as_str()),
            Self::Many(messages) => messages.first().map(String::as_str),
        }
    }
}

/// JSON payload returned by the registration view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StepResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub form_html: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, FieldErrors>>,
}

/// What a submission response asks the client to do, message aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Leave the page. `terminal` is set when the submission succeeded.
    Redirect { url: String, terminal: bool },
    /// Render the next step.
    Advance { form_html: String },
    /// Stay on the step and annotate the listed fields.
    Rejected {
        form_html: Option<String>,
        invalid_fields: Vec<String>,
    },
    /// Accepted with nothing to render or follow.
    Accepted,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl StepResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Inline notice to show before anything else, `info` when untyped.
    pub fn notice(&self) -> Option<(NoticeKind, String)> {
        let message = non_empty(&self.message)?;
        let kind = self
            .message_type
            .as_deref()
            .map(NoticeKind::from_level)
            .unwrap_or(NoticeKind::Info);
        Some((kind, message.to_string()))
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        self.errors
            .as_ref()
            .map(|errors| errors.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// A redirect wins over everything else, whatever `success` says.
    pub fn outcome(&self) -> StepOutcome {
        if let Some(url) = non_empty(&self.redirect_url) {
            return StepOutcome::Redirect {
                url: url.to_string(),
                terminal: self.success,
            };
        }
        let form_html = non_empty(&self.form_html).map(str::to_string);
        if !self.success {
            return StepOutcome::Rejected {
                form_html,
                invalid_fields: self.invalid_fields(),
            };
        }
        match form_html {
            Some(form_html) => StepOutcome::Advance { form_html },
            None => StepOutcome::Accepted,
        }
    }
}
