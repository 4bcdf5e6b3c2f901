//! One function per subcommand. Each returns a JSON report for stdout.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use serde_json::{json, Value};
use td_app::usecases::wizard::{CheckDuplicateCustomer, DuplicateVerdict};
use td_app::usecases::{CustomerSearch, FetchFragment, FetchOutcome, NotificationRefresher};
use td_core::fragment::{collect_scripts, read_step_field};
use td_core::ports::{HttpPort, HttpRequest};
use td_core::{DashboardConfig, FormField, StepResponse};
use td_infra::TokioSleeper;
use tracing::{info, info_span, Instrument};
use url::Url;

use crate::cli::DuplicateArgs;
use crate::ports::{CapturedWidgets, ProbeBrowser};

pub struct Probe {
    base: Url,
    http: Rc<dyn HttpPort>,
    browser: Rc<ProbeBrowser>,
    widgets: Rc<CapturedWidgets>,
    config: DashboardConfig,
}

fn stamped(mut report: Value) -> Value {
    if let Value::Object(fields) = &mut report {
        fields.insert("checked_at".into(), json!(Utc::now().to_rfc3339()));
    }
    report
}

impl Probe {
    pub fn new(base: Url, http: Rc<dyn HttpPort>, config: DashboardConfig) -> Self {
        Self {
            browser: Rc::new(ProbeBrowser::new(base.clone())),
            widgets: Rc::new(CapturedWidgets::default()),
            base,
            http,
            config,
        }
    }

    fn resolve(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid path `{path}` for {}", self.base))
    }

    pub async fn fetch(&self, path: &str, include_html: bool) -> anyhow::Result<Value> {
        let url = self.resolve(path)?;
        let fetch = FetchFragment::new(self.http.clone(), self.config.selectors.clone());
        let report = match fetch.execute(&url).await {
            FetchOutcome::Fragment(fragment) => {
                let scripts = collect_scripts(&fragment.inner_html);
                let mut report = json!({
                    "url": url.as_str(),
                    "swappable": true,
                    "title": fragment.title,
                    "bytes": fragment.inner_html.len(),
                    "scripts": scripts.len(),
                    "external_scripts": scripts.iter().filter(|s| s.is_external()).count(),
                });
                if include_html {
                    report["html"] = json!(fragment.inner_html);
                }
                report
            }
            FetchOutcome::Fallback(err) => json!({
                "url": url.as_str(),
                "swappable": false,
                "reason": err.to_string(),
            }),
        };
        Ok(stamped(report))
    }

    pub async fn step(&self, path: &str, step: u32) -> anyhow::Result<Value> {
        let mut url = self.resolve(path)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("step", &step.to_string())
            .append_pair("load_step", "1");

        let span = info_span!("probe.step", url = %url);
        let response = self
            .http
            .send(HttpRequest::get(url.clone()).ajax())
            .instrument(span)
            .await?;
        if !response.is_success() {
            return Ok(stamped(json!({
                "url": url.as_str(),
                "status": response.status,
                "loaded": false,
            })));
        }

        let parsed = StepResponse::from_json(&response.body)
            .context("step response is not the wizard JSON payload")?;
        let rendered_step = parsed
            .form_html
            .as_deref()
            .and_then(|html| read_step_field(html, &self.config.wizard.step_field))
            .map(u32::from);
        Ok(stamped(json!({
            "url": url.as_str(),
            "status": response.status,
            "loaded": parsed.form_html.is_some(),
            "success": parsed.success,
            "rendered_step": rendered_step,
            "notice": parsed.notice().map(|(kind, message)| json!({
                "kind": kind.as_str(),
                "message": message,
            })),
        })))
    }

    pub async fn duplicate(&self, args: &DuplicateArgs) -> anyhow::Result<Value> {
        let fields = [
            ("full_name", &args.full_name),
            ("phone", &args.phone),
            ("customer_type", &args.customer_type),
            ("organization_name", &args.organization_name),
            ("tax_number", &args.tax_number),
        ]
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| FormField::text(index, name, value.trim()))
        .collect::<Vec<_>>();

        let check = CheckDuplicateCustomer::new(
            self.http.clone(),
            self.browser.clone(),
            self.config.endpoints.duplicate_check.clone(),
        );
        let report = match check.execute(&fields).await {
            DuplicateVerdict::Skipped => json!({ "verdict": "skipped" }),
            DuplicateVerdict::Clear => json!({ "verdict": "clear" }),
            DuplicateVerdict::Found(customer) => json!({
                "verdict": "found",
                "customer": customer,
                "detail_href": customer.detail_href(),
            }),
        };
        Ok(stamped(report))
    }

    pub async fn search(&self, term: &str) -> anyhow::Result<Value> {
        let search = CustomerSearch::new(
            self.http.clone(),
            self.browser.clone(),
            self.widgets.clone(),
            Rc::new(TokioSleeper),
            self.config.endpoints.customer_search.clone(),
            Duration::ZERO,
            self.config.timing.search_min_chars,
        );
        let outcome = search.on_input(term).await;
        info!(?outcome, "search finished");

        let shown = self.widgets.search.borrow().clone().flatten();
        Ok(stamped(json!({
            "term": term,
            "outcome": format!("{outcome:?}"),
            "results_text": shown.as_ref().map(|node| node.text_content()),
            "results_html": shown.as_ref().map(|node| node.to_html()),
        })))
    }

    pub async fn notifications(&self) -> anyhow::Result<Value> {
        let refresher = NotificationRefresher::new(
            self.http.clone(),
            self.browser.clone(),
            self.widgets.clone(),
            Rc::new(TokioSleeper),
            self.config.endpoints.notifications.clone(),
            self.config.timing.notification_poll(),
        );
        let outcome = refresher.refresh().await;

        let badge = self.widgets.badge.borrow().clone();
        let view = self.widgets.notifications.borrow().clone();
        Ok(stamped(json!({
            "outcome": format!("{outcome:?}"),
            "badge": badge.map(|badge| json!({
                "text": badge.text,
                "visible": badge.visible,
                "error": badge.error,
            })),
            "counts": view.as_ref().map(|view| json!({
                "today_visitors": view.today_visitors.text,
                "low_stock": view.low_stock.text,
                "overdue_orders": view.overdue_orders.text,
            })),
        })))
    }

    /// URLs a use case tried to leave for.
    pub fn departures(&self) -> Vec<String> {
        self.browser.departures()
    }
}
