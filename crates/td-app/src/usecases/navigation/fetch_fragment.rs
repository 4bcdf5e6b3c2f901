//! Use case for fetching the content fragment of a page.

use std::rc::Rc;

use td_core::config::SelectorConfig;
use td_core::fragment::{extract_page, FragmentError};
use td_core::ports::{HttpError, HttpPort, HttpRequest};
use td_core::PageFragment;
use thiserror::Error;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

#[derive(Debug)]
pub enum FetchOutcome {
    Fragment(PageFragment),
    /// The caller must fall back to a full page load of the same URL.
    Fallback(NavigationError),
}

/// Fetches a page with the AJAX marker header and extracts the part that
/// replaces the current view. Never touches the document.
pub struct FetchFragment {
    http: Rc<dyn HttpPort>,
    selectors: SelectorConfig,
}

impl FetchFragment {
    pub fn new(http: Rc<dyn HttpPort>, selectors: SelectorConfig) -> Self {
        Self { http, selectors }
    }

    pub async fn execute(&self, url: &Url) -> FetchOutcome {
        let span = info_span!("usecase.fetch_fragment.execute", url = %url);
        async {
            match self.fetch(url).await {
                Ok(fragment) => {
                    debug!(
                        bytes = fragment.inner_html.len(),
                        has_title = fragment.title.is_some(),
                        "fragment extracted"
                    );
                    FetchOutcome::Fragment(fragment)
                }
                Err(failure) => {
                    warn!(error = %failure, "navigation fetch failed, falling back to full load");
                    FetchOutcome::Fallback(failure)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, url: &Url) -> Result<PageFragment, NavigationError> {
        let response = self.http.send(HttpRequest::get(url.clone()).ajax()).await?;
        if !response.is_success() {
            return Err(HttpError::Status {
                status: response.status,
                url: url.to_string(),
            }
            .into());
        }
        Ok(extract_page(&response.body, &self.selectors)?)
    }
}
