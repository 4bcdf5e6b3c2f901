//! `fetch` through gloo-net.

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};
use td_core::ports::{HttpError, HttpMethod, HttpPort, HttpRequest, HttpResponse, RequestBody};
use tracing::instrument;
use web_sys::{FormData, RequestCredentials};

/// Same-origin credentialed requests, so the session cookie and CSRF
/// cookie travel with every call.
pub struct FetchHttpClient;

fn transport(err: impl std::fmt::Debug) -> HttpError {
    HttpError::Transport(format!("{err:?}"))
}

fn form_data(pairs: &[(String, String)]) -> Result<FormData, HttpError> {
    let form = FormData::new().map_err(transport)?;
    for (name, value) in pairs {
        form.append_with_str(name, value).map_err(transport)?;
    }
    Ok(form)
}

#[async_trait(?Send)]
impl HttpPort for FetchHttpClient {
    #[instrument(skip_all, fields(method = ?request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = RequestBuilder::new(request.url.as_str())
            .method(method)
            .credentials(RequestCredentials::SameOrigin);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            Some(RequestBody::Multipart(pairs)) => builder.body(form_data(pairs)?),
            None => builder.build(),
        }
        .map_err(transport)?;

        let response = prepared.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        Ok(HttpResponse { status, body })
    }
}
