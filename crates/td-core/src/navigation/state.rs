use serde::{Deserialize, Serialize};
use url::Url;

/// One SPA navigation. Ephemeral: only `url` survives, inside the history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub url: Url,
    /// Whether this navigation pushes a history entry. `false` for
    /// back/forward driven navigations.
    pub pushed: bool,
}

impl NavigationState {
    pub fn push(url: Url) -> Self {
        Self { url, pushed: true }
    }

    pub fn replay(url: Url) -> Self {
        Self { url, pushed: false }
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            url: self.url.to_string(),
        }
    }
}

/// State payload stored with each pushed history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
}

impl HistoryEntry {
    /// Parse a raw history state payload. Anything that is not an object
    /// with a string `url` yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "url": self.url }).to_string()
    }
}
