//! The configured entry point for every API call.
//!
//! # Design
//! `ApiClient` holds an immutable [`ClientConfig`] and a shared
//! [`Transport`]; cloning it is cheap and clones share both. Each call is
//! split the same way:
//!
//! 1. `build_request` produces an `HttpRequest` with the default headers and
//!    runs the request interceptor over it (no I/O).
//! 2. `send` executes it through the transport under the configured timeout
//!    and runs the response interceptor.
//! 3. `parse` deserializes the body.
//!
//! The generic verbs `get`, `post`, `put` and `remove` chain the three.
//! Errors are propagated unchanged; nothing here retries or caches.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::interceptor::{intercept_request, intercept_response};
use crate::multipart::MultipartForm;
use crate::transport::{Transport, UreqTransport};

/// Request payload as declared by the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(MultipartForm),
}

impl Payload {
    /// Serialize `value` into a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| ApiError::SerializationError(e.to_string()))
    }

    /// `{}`; used by action endpoints that take no input.
    pub fn empty() -> Self {
        Payload::Json(Value::Object(Default::default()))
    }

    fn into_body(self) -> Result<RequestBody, ApiError> {
        match self {
            Payload::Json(value) => serde_json::to_string(&value)
                .map(RequestBody::Json)
                .map_err(|e| ApiError::SerializationError(e.to_string())),
            Payload::Multipart(form) => Ok(RequestBody::Multipart(form)),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    /// Client backed by a [`UreqTransport`] with the config's timeout.
    pub fn with_ureq(config: ClientConfig) -> Self {
        let transport = UreqTransport::from_config(&config);
        Self::new(config, Arc::new(transport))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build and intercept a request without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        payload: Option<Payload>,
    ) -> Result<HttpRequest, ApiError> {
        let body = payload.map(Payload::into_body).transpose()?;
        let request = HttpRequest {
            method,
            path: self.config.endpoint(path),
            query,
            headers: self.config.default_headers.clone(),
            body,
        };
        Ok(intercept_request(request))
    }

    /// Execute `request` under the configured timeout.
    ///
    /// Returns only 2xx responses; everything else comes back through the
    /// response interceptor as an `ApiError`.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.path.clone();
        debug!(method = method.as_str(), url = %url, "sending request");

        let response = tokio::time::timeout(self.config.timeout, self.transport.execute(request))
            .await
            .map_err(|_| {
                warn!(method = method.as_str(), url = %url, timeout = ?self.config.timeout, "request timed out");
                ApiError::Timeout
            })??;

        debug!(method = method.as_str(), url = %url, status = response.status, "received response");
        intercept_response(response)
    }

    /// Deserialize a successful response body.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub async fn get<T, Q>(&self, path: &str, params: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Get, path, query_pairs(params)?, None)?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, payload: Payload) -> Result<T, ApiError> {
        let request = self.build_request(HttpMethod::Post, path, Vec::new(), Some(payload))?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, payload: Payload) -> Result<T, ApiError> {
        let request = self.build_request(HttpMethod::Put, path, Vec::new(), Some(payload))?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    /// DELETE `path`. Any response body is ignored.
    pub async fn remove(&self, path: &str) -> Result<(), ApiError> {
        let request = self.build_request(HttpMethod::Delete, path, Vec::new(), None)?;
        self.send(request).await?;
        Ok(())
    }
}

/// Flatten a serializable parameter object into query pairs.
///
/// `null` fields are skipped, scalars are stringified, and arrays repeat the
/// key once per element. Nested objects are rejected. Pairs come out in key
/// order.
pub fn query_pairs<Q: Serialize + ?Sized>(params: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(params).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(ApiError::SerializationError(format!(
                "query parameters must be an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_to_string(&key, item)? {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            scalar => {
                if let Some(text) = scalar_to_string(&key, scalar)? {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

fn scalar_to_string(key: &str, value: Value) -> Result<Option<String>, ApiError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::SerializationError(format!(
            "query parameter {key:?} must be a scalar"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::multipart::FilePart;
    use crate::transport::mock::{json_response, MockTransport};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    fn client(transport: MockTransport) -> ApiClient {
        ApiClient::new(ClientConfig::default(), Arc::new(transport))
    }

    #[test]
    fn build_json_request_keeps_default_header() {
        let c = client(MockTransport::fixed(200, "{}"));
        let req = c
            .build_request(HttpMethod::Post, "/donations", Vec::new(), Some(Payload::json(&json!({"amount": 5})).unwrap()))
            .unwrap();
        assert_eq!(req.path, "http://localhost:8000/api/donations");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_ref().unwrap().as_json().unwrap()).unwrap();
        assert_eq!(body, json!({"amount": 5}));
    }

    #[test]
    fn build_multipart_request_drops_json_header() {
        let c = client(MockTransport::fixed(200, "{}"));
        let form = MultipartForm::new()
            .text("title", "t")
            .file("images", FilePart::new("a.png", "image/png", vec![1]));
        let req = c
            .build_request(HttpMethod::Post, "/testimonies/submit", Vec::new(), Some(Payload::Multipart(form)))
            .unwrap();
        assert!(req.header("content-type").is_none());
        assert!(req.body.as_ref().unwrap().is_multipart());
    }

    #[test]
    fn query_pairs_flatten_objects() {
        let pairs = query_pairs(&json!({
            "category": "guerison",
            "featured": true,
            "limit": 50,
            "page": null,
            "tags": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("category".to_string(), "guerison".to_string()),
                ("featured".to_string(), "true".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_of_unit_is_empty() {
        assert!(query_pairs(&()).unwrap().is_empty());
    }

    #[test]
    fn query_pairs_reject_nesting_and_scalars() {
        assert!(matches!(
            query_pairs(&json!({"filter": {"a": 1}})),
            Err(ApiError::SerializationError(_))
        ));
        assert!(matches!(query_pairs(&42), Err(ApiError::SerializationError(_))));
    }

    #[tokio::test]
    async fn get_forwards_params_and_parses() {
        let transport = MockTransport::fixed(200, r#"{"id":"abc"}"#);
        let c = client(transport.clone());
        let item: Item = c.get("/events/abc", &json!({"lang": "fr"})).await.unwrap();
        assert_eq!(item, Item { id: "abc".into() });

        let req = transport.last_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/api/events/abc");
        assert_eq!(req.query_param("lang"), Some("fr"));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn put_sends_json_body() {
        let transport = MockTransport::fixed(200, r#"{"id":"e1"}"#);
        let c = client(transport.clone());
        let _: Item = c.put("/events/e1", Payload::json(&json!({"title": "x"})).unwrap()).await.unwrap();
        let req = transport.last_request();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.body.unwrap().as_json(), Some(r#"{"title":"x"}"#));
    }

    #[tokio::test]
    async fn remove_ignores_body() {
        let transport = MockTransport::fixed(200, r#"{"message":"deleted"}"#);
        let c = client(transport.clone());
        c.remove("/donations/d1").await.unwrap();
        assert_eq!(transport.last_request().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn http_errors_propagate_unchanged() {
        let c = client(MockTransport::fixed(503, "maintenance"));
        let err = c.get::<Item, _>("/sermons", &()).await.unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let c = client(MockTransport::new(|_| Err(ApiError::Transport("connection refused".into()))));
        let err = c.remove("/donations/d1").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(msg) if msg == "connection refused"));
    }

    #[tokio::test]
    async fn bad_json_is_a_deserialization_error() {
        let c = client(MockTransport::fixed(200, "<html>"));
        let err = c.get::<Item, _>("/sermons/1", &()).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_responses_time_out_after_thirty_seconds() {
        let transport = MockTransport::new(|_| Ok(json_response(200, r#"{"id":"late"}"#)))
            .with_delay(Duration::from_secs(31));
        let c = client(transport);
        let started = tokio::time::Instant::now();
        let err = c.get::<Item, _>("/events/get", &()).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(30) && elapsed < Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn responses_inside_the_window_succeed() {
        let transport = MockTransport::new(|_| Ok(json_response(200, r#"{"id":"ok"}"#)))
            .with_delay(Duration::from_secs(29));
        let item: Item = client(transport).get("/events/ok", &()).await.unwrap();
        assert_eq!(item.id, "ok");
    }
}
