//! Headless stand-ins for the page-facing ports the probed use cases need.

use std::cell::RefCell;

use td_core::ports::{BrowserPort, WidgetPort};
use td_core::render::{BadgeView, Node, NotificationView};
use td_core::HistoryEntry;
use tracing::info;
use url::Url;

/// A browser parked on one URL. Navigation requests are recorded, not
/// followed.
pub struct ProbeBrowser {
    location: Url,
    departures: RefCell<Vec<String>>,
}

impl ProbeBrowser {
    pub fn new(location: Url) -> Self {
        Self {
            location,
            departures: RefCell::new(Vec::new()),
        }
    }

    pub fn departures(&self) -> Vec<String> {
        self.departures.borrow().clone()
    }
}

impl BrowserPort for ProbeBrowser {
    fn current_url(&self) -> Url {
        self.location.clone()
    }

    fn hard_navigate(&self, url: &str) {
        info!(url, "page would be left for a full load");
        self.departures.borrow_mut().push(url.to_string());
    }

    fn push_history(&self, entry: &HistoryEntry) {
        info!(url = %entry.url, "history entry would be pushed");
    }
}

/// Keeps whatever the widgets were last asked to show.
#[derive(Default)]
pub struct CapturedWidgets {
    pub notifications: RefCell<Option<NotificationView>>,
    pub badge: RefCell<Option<BadgeView>>,
    /// `Some(None)` when the results box was hidden.
    pub search: RefCell<Option<Option<Node>>>,
}

impl WidgetPort for CapturedWidgets {
    fn render_notifications(&self, view: &NotificationView) {
        *self.badge.borrow_mut() = Some(view.total.clone());
        *self.notifications.borrow_mut() = Some(view.clone());
    }

    fn show_notification_badge(&self, badge: &BadgeView) {
        *self.badge.borrow_mut() = Some(badge.clone());
    }

    fn render_search(&self, results: Option<&Node>) {
        *self.search.borrow_mut() = Some(results.cloned());
    }
}
