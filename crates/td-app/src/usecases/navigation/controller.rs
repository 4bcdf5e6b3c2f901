//! Navigation controller: sidebar interception, history and active links.

use std::rc::Rc;

use td_core::navigation::{classify_link, resolve_active, resolve_href, same_origin};
use td_core::ports::{BrowserPort, ContentSwapHandler, DocumentPort, Region, SidebarPort};
use td_core::{HistoryEntry, LinkDecision, NavigationState};
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

use super::activate_fragment::{ActivateFragment, ActivationReport};
use super::fetch_fragment::{FetchFragment, FetchOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Content swapped in place.
    Swapped { report: ActivationReport },
    /// A full page load was issued instead.
    HardNavigated,
    /// Nothing to do.
    Ignored,
}

/// Owns SPA navigation for one page. Constructed once at boot with its
/// ports and shared by the event handlers.
pub struct NavigationController {
    fetch: FetchFragment,
    activate: Rc<ActivateFragment>,
    browser: Rc<dyn BrowserPort>,
    document: Rc<dyn DocumentPort>,
    sidebar: Rc<dyn SidebarPort>,
    /// Notified in order after every successful swap.
    swap_handlers: Vec<Rc<dyn ContentSwapHandler>>,
}

impl NavigationController {
    pub fn new(
        fetch: FetchFragment,
        activate: Rc<ActivateFragment>,
        browser: Rc<dyn BrowserPort>,
        document: Rc<dyn DocumentPort>,
        sidebar: Rc<dyn SidebarPort>,
        swap_handlers: Vec<Rc<dyn ContentSwapHandler>>,
    ) -> Self {
        Self {
            fetch,
            activate,
            browser,
            document,
            sidebar,
            swap_handlers,
        }
    }

    /// Decide what a click on a sidebar anchor does. Anything but
    /// [`LinkDecision::PassThrough`] suppresses the browser's default action.
    pub fn should_intercept(&self, href: Option<&str>) -> LinkDecision {
        classify_link(href, &self.browser.current_url())
    }

    pub async fn on_link_click(&self, href: Option<&str>) -> NavigationOutcome {
        match self.should_intercept(href) {
            LinkDecision::Intercept(url) => self.navigate(url, true).await,
            LinkDecision::SamePage => {
                debug!(href = ?href, "link targets the current page, nothing to fetch");
                NavigationOutcome::Ignored
            }
            LinkDecision::PassThrough => NavigationOutcome::Ignored,
        }
    }

    /// Swap the content for `url`. History is pushed only when `push` is set
    /// and only after the swap succeeded.
    pub async fn navigate(&self, url: Url, push: bool) -> NavigationOutcome {
        let state = if push {
            NavigationState::push(url)
        } else {
            NavigationState::replay(url)
        };
        let span = info_span!(
            "usecase.navigation.navigate",
            url = %state.url,
            push = state.pushed
        );
        self.swap(state).instrument(span).await
    }

    async fn swap(&self, state: NavigationState) -> NavigationOutcome {
        if !same_origin(&state.url, &self.browser.current_url()) {
            info!("cross-origin navigation, leaving the page");
            self.browser.hard_navigate(state.url.as_str());
            return NavigationOutcome::HardNavigated;
        }

        let fragment = match self.fetch.execute(&state.url).await {
            FetchOutcome::Fragment(fragment) => fragment,
            FetchOutcome::Fallback(_) => {
                self.browser.hard_navigate(state.url.as_str());
                return NavigationOutcome::HardNavigated;
            }
        };

        let report = match self.activate.execute(Region::Content, &fragment.inner_html) {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "content swap failed, falling back to full load");
                self.browser.hard_navigate(state.url.as_str());
                return NavigationOutcome::HardNavigated;
            }
        };

        if let Some(title) = fragment.title.as_deref() {
            self.document.set_title(title);
        }
        if state.pushed {
            self.browser.push_history(&state.history_entry());
        }
        self.mark_active(&state.url);
        for handler in &self.swap_handlers {
            handler.on_content_swapped(&state.url).await;
        }

        info!(
            scripts = report.executed,
            failed_scripts = report.failed,
            "navigation completed"
        );
        NavigationOutcome::Swapped { report }
    }

    /// Back/forward: the URL comes from the history payload when it has
    /// one, otherwise from the location the browser already moved to.
    pub async fn on_pop_state(&self, state: Option<&str>) -> NavigationOutcome {
        let current = self.browser.current_url();
        let url = state
            .and_then(HistoryEntry::from_json)
            .and_then(|entry| resolve_href(&entry.url, &current))
            .unwrap_or(current);
        self.navigate(url, false).await
    }

    pub fn mark_active(&self, url: &Url) {
        self.sidebar.clear_active();
        match resolve_active(&self.sidebar.anchors(), url) {
            Some(marker) => self.sidebar.mark_active(&marker),
            None => debug!(path = url.path(), "no sidebar entry for path"),
        }
    }
}
