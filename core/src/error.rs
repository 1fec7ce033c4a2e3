//! Error types for the parish API client.
//!
//! # Design
//! Every non-2xx response lands in `HttpError` with the raw status code and
//! body, 404 included; callers that care about a particular status ask
//! [`ApiError::status`] or [`ApiError::is_not_found`]. Transport failures and
//! timeouts are reported as-is; nothing here retries or rewrites them.

use thiserror::Error;

use crate::forms::ValidationError;

/// Errors returned by `ApiClient`, the services and the hooks.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// No response arrived within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection refused, DNS failure, broken pipe and friends.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload or query could not be serialized.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A form was rejected locally; no request was sent.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The `message` field of a JSON error body, as shown to visitors.
    pub fn server_message(&self) -> Option<String> {
        let ApiError::HttpError { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("message")?.as_str().map(str::to_string)
    }
}
