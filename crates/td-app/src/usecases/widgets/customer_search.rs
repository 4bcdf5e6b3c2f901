//! Header customer quick search with debounce.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use td_core::customer::{CustomerSearchResponse, SearchQuery};
use td_core::ports::{BrowserPort, HttpError, HttpPort, HttpRequest, SleepPort, WidgetPort};
use td_core::render::render_search_results;
use tracing::{debug, warn};

use crate::usecases::endpoint_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Newer input arrived while this one was pending.
    Superseded,
    /// Term too short; the results box was hidden.
    Hidden,
    Rendered { hits: usize },
    /// The lookup failed; the results box was hidden.
    Failed,
}

pub struct CustomerSearch {
    http: Rc<dyn HttpPort>,
    browser: Rc<dyn BrowserPort>,
    widgets: Rc<dyn WidgetPort>,
    sleeper: Rc<dyn SleepPort>,
    endpoint: String,
    debounce: Duration,
    min_chars: usize,
    generation: Cell<u64>,
}

impl CustomerSearch {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        http: Rc<dyn HttpPort>,
        browser: Rc<dyn BrowserPort>,
        widgets: Rc<dyn WidgetPort>,
        sleeper: Rc<dyn SleepPort>,
        endpoint: String,
        debounce: Duration,
        min_chars: usize,
    ) -> Self {
        Self {
            http,
            browser,
            widgets,
            sleeper,
            endpoint,
            debounce,
            min_chars,
            generation: Cell::new(0),
        }
    }

    /// Handle one input event. Every call supersedes the ones still
    /// waiting out the debounce delay.
    pub async fn on_input(&self, raw: &str) -> SearchOutcome {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);

        self.sleeper.sleep(self.debounce).await;
        if self.generation.get() != ticket {
            return SearchOutcome::Superseded;
        }

        let Some(query) = SearchQuery::normalize(raw, self.min_chars) else {
            self.widgets.render_search(None);
            return SearchOutcome::Hidden;
        };

        match self.lookup(&query).await {
            Ok(_) if self.generation.get() != ticket => SearchOutcome::Superseded,
            Ok(response) => {
                let hits = response.results.len();
                debug!(term = query.as_str(), hits, "customer search results");
                self.widgets
                    .render_search(Some(&render_search_results(&response.results)));
                SearchOutcome::Rendered { hits }
            }
            Err(err) => {
                warn!(error = %err, "customer search failed");
                self.widgets.render_search(None);
                SearchOutcome::Failed
            }
        }
    }

    /// Click outside the box.
    pub fn dismiss(&self) {
        self.widgets.render_search(None);
    }

    async fn lookup(&self, query: &SearchQuery) -> anyhow::Result<CustomerSearchResponse> {
        let mut url = endpoint_url(&self.browser.current_url(), &self.endpoint)?;
        url.query_pairs_mut().clear().append_pair("q", query.as_str());
        let response = self.http.send(HttpRequest::get(url.clone())).await?;
        if !response.is_success() {
            return Err(HttpError::Status {
                status: response.status,
                url: url.to_string(),
            }
            .into());
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}
