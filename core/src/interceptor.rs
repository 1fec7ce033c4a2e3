//! Request and response interceptors.
//!
//! Every request built by `ApiClient` passes through [`intercept_request`]
//! before it reaches the transport, and every response passes through
//! [`intercept_response`] before it is parsed. They are the only places that
//! touch headers or map status codes.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Strip the default JSON content-type from multipart requests.
///
/// The transport sets `multipart/form-data; boundary=...` itself, and only
/// it knows the boundary. JSON requests pass through unchanged.
pub fn intercept_request(mut request: HttpRequest) -> HttpRequest {
    if request.body.as_ref().is_some_and(|body| body.is_multipart()) {
        request.remove_header("content-type");
    }
    request
}

/// Pass 2xx responses through and turn everything else into
/// `ApiError::HttpError` with the status and body untouched.
///
/// No per-status branching, no retry, no redirect-to-login.
pub fn intercept_response(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body,
    })
}
