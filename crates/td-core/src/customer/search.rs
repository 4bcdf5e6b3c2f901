use serde::Deserialize;

/// One row of the header quick search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomerHit {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl CustomerHit {
    pub fn href(&self) -> String {
        format!("/customers/{}/", self.id)
    }

    pub fn kind_label(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|kind| !kind.is_empty())
            .unwrap_or("personal")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CustomerSearchResponse {
    #[serde(default)]
    pub results: Vec<CustomerHit>,
}

/// A search term that is long enough to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim the raw input; `None` when shorter than `min_chars` characters.
    pub fn normalize(raw: &str, min_chars: usize) -> Option<Self> {
        let term = raw.trim();
        (term.chars().count() >= min_chars).then(|| Self(term.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
