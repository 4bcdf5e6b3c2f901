//! Notification badge refresher.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use td_core::notifications::NotificationSummary;
use td_core::ports::{BrowserPort, HttpError, HttpPort, HttpRequest, SleepPort, WidgetPort};
use td_core::render::{BadgeView, NotificationView};
use tracing::{debug, error, info_span, warn, Instrument};

use crate::usecases::endpoint_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered,
    /// The server answered `success: false`; nothing changed.
    Ignored,
    /// The badge now shows the error marker.
    Failed,
}

pub struct NotificationRefresher {
    http: Rc<dyn HttpPort>,
    browser: Rc<dyn BrowserPort>,
    widgets: Rc<dyn WidgetPort>,
    sleeper: Rc<dyn SleepPort>,
    endpoint: String,
    interval: Duration,
    stopped: Cell<bool>,
}

impl NotificationRefresher {
    pub fn new(
        http: Rc<dyn HttpPort>,
        browser: Rc<dyn BrowserPort>,
        widgets: Rc<dyn WidgetPort>,
        sleeper: Rc<dyn SleepPort>,
        endpoint: String,
        interval: Duration,
    ) -> Self {
        Self {
            http,
            browser,
            widgets,
            sleeper,
            endpoint,
            interval,
            stopped: Cell::new(false),
        }
    }

    /// Refresh now, then once per interval until [`stop`](Self::stop).
    pub async fn run(&self) {
        while !self.stopped.get() {
            self.refresh().await;
            self.sleeper.sleep(self.interval).await;
        }
        debug!("notification refresher stopped");
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let span = info_span!("usecase.notification_refresher.refresh");
        async {
            match self.fetch().await {
                Ok(summary) if summary.success => {
                    self.widgets
                        .render_notifications(&NotificationView::from_summary(&summary));
                    debug!(total = summary.counts.badge_total(), "notifications rendered");
                    RefreshOutcome::Rendered
                }
                Ok(_) => {
                    warn!("notification summary without success flag, ignoring");
                    RefreshOutcome::Ignored
                }
                Err(err) => {
                    error!(error = %err, "loading notifications failed");
                    self.widgets.show_notification_badge(&BadgeView::failed());
                    RefreshOutcome::Failed
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self) -> anyhow::Result<NotificationSummary> {
        let url = endpoint_url(&self.browser.current_url(), &self.endpoint)?;
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
