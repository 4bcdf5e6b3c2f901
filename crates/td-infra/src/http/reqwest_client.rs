//! reqwest-backed [`HttpPort`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::Method;
use td_core::ports::{HttpError, HttpMethod, HttpPort, HttpRequest, HttpResponse, RequestBody};
use tracing::{debug, instrument};

pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with a cookie jar, so a session obtained once is sent with
    /// every later request like the browser's credentialed fetches.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| HttpError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        match request.body {
            Some(RequestBody::Multipart(fields)) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
            None => builder,
        }
    }
}

#[async_trait(?Send)]
impl HttpPort for ReqwestHttpClient {
    #[instrument(skip_all, fields(method = ?request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Transport(format!("failed to read response body: {e}")))?;
        debug!(status, bytes = body.len(), "http response received");

        Ok(HttpResponse { status, body })
    }
}
