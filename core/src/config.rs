//! Client configuration.
//!
//! [`ClientConfig`] is built once at startup and handed to
//! [`ApiClient::new`](crate::ApiClient::new). Nothing in the crate reads
//! configuration from globals after that point.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Values set on the struct by the caller
//! 2. `PARISH_API_URL` / `PARISH_API_TIMEOUT_SECS` (via [`ClientConfig::from_env`])
//! 3. Built-in defaults

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_PREFIX: &str = "/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PARISH_API_URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("PARISH_API_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin plus `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Upper bound for a single request/response round-trip.
    pub timeout: Duration,
    /// Headers attached to every request before interception.
    pub default_headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("PARISH_API_URL") {
            Some(url) => {
                let url = url.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(url.to_string()));
                }
                Self::new(url)
            }
            None => Self::default(),
        };

        if let Some(raw) = lookup("PARISH_API_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Absolute URL for an API path such as `/donations`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Same host as the API, with the `/api` prefix stripped.
    pub fn media_origin(&self) -> &str {
        self.base_url
            .strip_suffix(API_PREFIX)
            .unwrap_or(&self.base_url)
    }

    /// Resolve an image path returned by the API.
    ///
    /// Absolute URLs pass through, relative paths are joined onto the media
    /// origin, and empty paths yield `None` so callers can show a placeholder.
    pub fn media_url(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        let origin = self.media_origin();
        if path.starts_with('/') {
            Some(format!("{origin}{path}"))
        } else {
            Some(format!("{origin}/{path}"))
        }
    }
}
