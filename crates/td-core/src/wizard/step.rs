use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// A wizard stage, 1-based. The total number of steps is owned by the
/// server-rendered form and never known here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WizardStep(u32);

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep(1);

    pub fn new(value: u32) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Parse with `parseInt` leniency: leading whitespace and trailing
    /// garbage are tolerated, zero and negatives are not steps.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
        digits.parse::<u32>().ok().and_then(Self::new)
    }

    /// Read a DOM value: missing, empty or unparseable values mean step 1.
    pub fn parse_or_first(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(Self::FIRST)
    }

    /// Target of a step-navigation link, taken from its `step` query
    /// parameter (step 1 when absent).
    pub fn from_link(href: &str, base: &Url) -> Self {
        let value = base.join(href).ok().and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "step")
                .map(|(_, value)| value.into_owned())
        });
        Self::parse_or_first(value.as_deref())
    }

    /// Gating rule: completed steps may be revisited, later ones only
    /// reached through a successful submission.
    pub fn permits_visit(self, target: WizardStep) -> bool {
        target <= self
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for WizardStep {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("wizard step must be >= 1, got {value}"))
    }
}

impl From<WizardStep> for u32 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

/// A `[data-step-link="true"]` anchor in the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLink {
    pub index: usize,
    pub href: String,
}

/// Visual state of a step link relative to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepLinkState {
    pub disabled: bool,
    pub active: bool,
}

impl StepLinkState {
    pub fn for_target(target: WizardStep, current: WizardStep) -> Self {
        Self {
            disabled: target > current,
            active: target == current,
        }
    }
}
