//! Data layer for the parish website.
//!
//! # Overview
//! A typed client for the parish REST API: one configured [`ApiClient`]
//! shared by every call, per-resource services on top of it, observable
//! data-fetching hooks, public form builders and the admin route gate.
//!
//! # Design
//! - `ApiClient` is immutable after construction. Config and transport are
//!   injected, so tests swap the network for a scripted transport.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   interceptors and the [`Transport`] are the only code that sees both.
//! - Request bodies are a tagged union (JSON or multipart) decided at the
//!   call site; the request interceptor strips the JSON content-type from
//!   multipart bodies.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! # async fn demo() -> Result<(), parish_core::ApiError> {
//! use parish_core::{ApiClient, ClientConfig, TestimonyQuery};
//!
//! let client = ApiClient::with_ureq(ClientConfig::default());
//! let wall = client.testimonies().list_approved(&TestimonyQuery::default()).await?;
//! println!("{} testimonies", wall.data.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod gate;
pub mod hooks;
pub mod http;
pub mod interceptor;
pub mod multipart;
pub mod services;
pub mod transport;
pub mod types;

pub use client::{ApiClient, Payload};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use forms::{PrayerRequestForm, TestimonyForm, TestimonySubmission, ValidationError};
pub use gate::{gate, RouteDecision};
pub use hooks::{Query, QueryState, QueryStatus};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use multipart::{FilePart, MultipartForm, Part};
pub use transport::{Transport, UreqTransport};
pub use types::*;
