//! HTML fragment extraction.
//!
//! Parses fetched pages and step markup without touching the live DOM:
//! locating the content region, collecting embedded scripts and reading the
//! hidden step field out of server-rendered wizard markup.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SelectorConfig;
use crate::wizard::WizardStep;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// The part of a fetched page that replaces the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFragment {
    pub inner_html: String,
    pub title: Option<String>,
}

/// An embedded `<script>` to be recreated so the browser executes it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScriptSpec {
    pub src: Option<String>,
    pub text: String,
    pub script_type: Option<String>,
}

impl ScriptSpec {
    /// External scripts stay attached after execution; inline ones are
    /// removed once they ran.
    pub fn is_external(&self) -> bool {
        self.src.as_deref().is_some_and(|src| !src.is_empty())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, FragmentError> {
    Selector::parse(selector).map_err(|e| FragmentError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn first_match<'a>(
    document: &'a Html,
    selector: &str,
) -> Result<Option<ElementRef<'a>>, FragmentError> {
    if selector.trim().is_empty() {
        return Ok(None);
    }
    let parsed = parse_selector(selector)?;
    Ok(document.select(&parsed).next())
}

/// Locate the content region of a full page: the primary container, else
/// the fallback container, else the body.
pub fn extract_page(html: &str, selectors: &SelectorConfig) -> Result<PageFragment, FragmentError> {
    let document = Html::parse_document(html);

    let region = match first_match(&document, &selectors.content)? {
        Some(region) => Some(region),
        None => first_match(&document, &selectors.content_fallback)?,
    };
    let inner_html = match region {
        Some(region) => region.inner_html(),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                primary = %selectors.content,
                fallback = %selectors.content_fallback,
                "no content region in fetched page, using body"
            );
            match first_match(&document, "body")? {
                Some(body) => body.inner_html(),
                None => document.root_element().inner_html(),
            }
        }
    };

    let title = first_match(&document, "title")?
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    Ok(PageFragment { inner_html, title })
}

/// Every `<script>` in `markup`, in document order.
pub fn collect_scripts(markup: &str) -> Vec<ScriptSpec> {
    let fragment = Html::parse_fragment(markup);
    let Ok(selector) = Selector::parse("script") else {
        return Vec::new();
    };
    fragment
        .select(&selector)
        .map(|script| ScriptSpec {
            src: script.value().attr("src").map(str::to_string),
            text: script.text().collect(),
            script_type: script.value().attr("type").map(str::to_string),
        })
        .collect()
}

/// Value of the hidden step input named `field_name` inside `markup`.
pub fn read_step_field(markup: &str, field_name: &str) -> Option<WizardStep> {
    let fragment = Html::parse_fragment(markup);
    let escaped = field_name.replace('\\', "\\\\").replace('"', "\\\"");
    let selector = Selector::parse(&format!("input[name=\"{escaped}\"]")).ok()?;
    fragment
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .and_then(WizardStep::parse)
}
