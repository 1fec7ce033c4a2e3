//! Network transports.
//!
//! `ApiClient` never performs I/O itself; it hands a fully intercepted
//! `HttpRequest` to a [`Transport`] and gets an `HttpResponse` back.
//! [`UreqTransport`] is the production implementation. Tests swap in a
//! scripted transport.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::{new_boundary, MultipartForm};

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses are returned as data, not as `Err`; status
/// interpretation belongs to the response interceptor.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.timeout)
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn send(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let url = request.path.as_str();
    let result = match request.method {
        HttpMethod::Get => with_parts(agent.get(url), &request).call(),
        HttpMethod::Delete => with_parts(agent.delete(url), &request).call(),
        HttpMethod::Post => send_body(with_parts(agent.post(url), &request), request.body.as_ref()),
        HttpMethod::Put => send_body(with_parts(agent.put(url), &request), request.body.as_ref()),
    };

    let mut response = result.map_err(|e| {
        warn!(method = request.method.as_str(), url, error = %e, "transport failure");
        map_ureq_error(e)
    })?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_parts<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&RequestBody>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(RequestBody::Json(text)) => builder.send(text.as_bytes()),
        Some(RequestBody::Multipart(form)) => {
            let boundary = new_boundary();
            builder
                .header("content-type", MultipartForm::content_type(&boundary).as_str())
                .send(&form.encode(&boundary)[..])
        }
        None => builder.send_empty(),
    }
}

fn map_ureq_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        ureq::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => ApiError::Timeout,
        other => ApiError::Transport(other.to_string()),
    }
}
