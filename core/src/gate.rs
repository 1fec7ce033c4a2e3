//! Admin route protection.
//!
//! The site has a single rule: pages under `/admin` need a `token` cookie,
//! everything else is public. The gate only checks that the cookie is
//! present and non-empty; validating the token is the backend's job.

use tracing::debug;

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/auth/login";
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Decide whether `path` may be served given the request's `Cookie` header.
pub fn gate(path: &str, cookie_header: Option<&str>) -> RouteDecision {
    if !is_admin_path(path) || has_session(cookie_header) {
        return RouteDecision::Allow;
    }
    debug!(path, "admin route without session, redirecting to login");
    RouteDecision::Redirect(LOGIN_PATH.to_string())
}

/// `/admin` itself or anything below it; `/administration` is not.
fn is_admin_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.strip_prefix(ADMIN_PREFIX) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn has_session(cookie_header: Option<&str>) -> bool {
    cookie_header
        .into_iter()
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .any(|(name, value)| name.trim() == SESSION_COOKIE && !value.trim().is_empty())
}
