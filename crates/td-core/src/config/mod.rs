//! # Dashboard configuration DTO
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! Every field defaults to the contract the server-rendered dashboard ships
//! with, so an empty file (or no file at all) yields a working configuration.
//! No validation happens here: an empty selector is a fact, not an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Top level configuration for the navigation engine and widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub selectors: SelectorConfig,
    pub storage: StorageKeys,
    pub endpoints: EndpointConfig,
    pub timing: TimingConfig,
    pub wizard: WizardConfig,
}

/// CSS selectors of the page regions the engine swaps or inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Primary content region replaced on sidebar navigation.
    pub content: String,
    /// Generic fallback region when the primary one is absent.
    pub content_fallback: String,
    /// Sidebar container whose anchors are intercepted.
    pub sidebar: String,
    /// Container holding the registration wizard form.
    pub wizard_container: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            content: ".page-body".to_string(),
            content_fallback: "main".to_string(),
            sidebar: ".sidebar-wrapper".to_string(),
            wizard_container: "#registrationWizard".to_string(),
        }
    }
}

/// Keys of the durable client-side entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub draft: String,
    pub current_step: String,
    pub theme_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            draft: "customerRegistrationData".to_string(),
            current_step: "customerRegCurrentStep".to_string(),
            theme_mode: "mode".to_string(),
        }
    }
}

/// Server endpoints used by the wizard and the widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub duplicate_check: String,
    pub customer_search: String,
    pub notifications: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            duplicate_check: "/api/customers/check-duplicate/".to_string(),
            customer_search: "/customers/search/".to_string(),
            notifications: "/api/notifications/summary/".to_string(),
        }
    }
}

/// Timer settings, in milliseconds on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub notification_poll_ms: u64,
    pub search_debounce_ms: u64,
    pub search_min_chars: usize,
    pub popup_dismiss_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_poll_ms: 60_000,
            search_debounce_ms: 250,
            search_min_chars: 2,
            popup_dismiss_ms: 2_600,
        }
    }
}

impl TimingConfig {
    pub fn notification_poll(&self) -> Duration {
        Duration::from_millis(self.notification_poll_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn popup_dismiss(&self) -> Duration {
        Duration::from_millis(self.popup_dismiss_ms)
    }
}

/// A "Next" control that stays disabled until a radio of `radio_name` is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardGate {
    pub button_id: String,
    pub radio_name: String,
}

impl ForwardGate {
    pub fn new(button_id: impl Into<String>, radio_name: impl Into<String>) -> Self {
        Self {
            button_id: button_id.into(),
            radio_name: radio_name.into(),
        }
    }
}

/// Wizard-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Name of the hidden field holding the authoritative step number.
    pub step_field: String,
    /// The step whose submission is preceded by the duplicate-customer check.
    pub duplicate_check_step: u32,
    pub forward_gates: Vec<ForwardGate>,
    /// Field names never captured into the draft record.
    pub draft_excluded_fields: Vec<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            step_field: "step".to_string(),
            duplicate_check_step: 1,
            forward_gates: vec![
                ForwardGate::new("nextStepBtn", "intent"),
                ForwardGate::new("nextServiceBtn", "service_type"),
            ],
            draft_excluded_fields: vec!["step".to_string(), "csrfmiddlewaretoken".to_string()],
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document; missing sections and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse a JSON document (used by the browser build).
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
