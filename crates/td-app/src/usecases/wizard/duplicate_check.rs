//! Duplicate-customer lookup run before the first step is posted.

use std::rc::Rc;

use td_core::customer::{DuplicateCheckResponse, DuplicateCustomer, DuplicateQuery};
use td_core::ports::{BrowserPort, HttpError, HttpPort, HttpRequest};
use td_core::FormField;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::usecases::endpoint_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateVerdict {
    /// Name or phone is blank; nothing was asked.
    Skipped,
    /// No match, or the lookup failed.
    Clear,
    Found(DuplicateCustomer),
}

/// Fails open: any lookup failure lets the submission proceed.
pub struct CheckDuplicateCustomer {
    http: Rc<dyn HttpPort>,
    browser: Rc<dyn BrowserPort>,
    endpoint: String,
}

impl CheckDuplicateCustomer {
    pub fn new(http: Rc<dyn HttpPort>, browser: Rc<dyn BrowserPort>, endpoint: String) -> Self {
        Self {
            http,
            browser,
            endpoint,
        }
    }

    pub async fn execute(&self, fields: &[FormField]) -> DuplicateVerdict {
        let Some(query) = DuplicateQuery::from_fields(fields) else {
            debug!("duplicate check skipped, name or phone empty");
            return DuplicateVerdict::Skipped;
        };

        let span = info_span!("usecase.check_duplicate_customer.execute");
        async {
            match self.lookup(&query).await {
                Ok(Some(customer)) => {
                    info!(customer_id = customer.id, "existing customer matches submission");
                    DuplicateVerdict::Found(customer)
                }
                Ok(None) => DuplicateVerdict::Clear,
                Err(err) => {
                    warn!(error = %err, "duplicate check failed, continuing with submission");
                    DuplicateVerdict::Clear
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn lookup(&self, query: &DuplicateQuery) -> anyhow::Result<Option<DuplicateCustomer>> {
        let mut url = endpoint_url(&self.browser.current_url(), &self.endpoint)?;
        url.query_pairs_mut().clear().extend_pairs(query.query_pairs());

        let request = HttpRequest::get(url.clone()).header("Accept", "application/json");
        let response = self.http.send(request).await?;
        if !response.is_success() {
            return Err(HttpError::Status {
                status: response.status,
                url: url.to_string(),
            }
            .into());
        }
        let parsed: DuplicateCheckResponse = serde_json::from_str(&response.body)?;
        Ok(parsed.into_match())
    }
}
