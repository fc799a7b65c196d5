//! Request-time route gating for the dashboard.
//!
//! Unauthenticated visitors are sent to the login page when they hit a
//! protected path; signed-in users are bounced off the login and register
//! pages. Whether a visitor is signed in is decided solely by the presence of
//! the `token` credential.

use serde::Serialize;

/// Name of the cookie/credential that marks a session.
pub const TOKEN_COOKIE: &str = "token";

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated visitors land.
pub const DASHBOARD_PATH: &str = "/dashboard";

const PROTECTED_PREFIXES: &[&str] = &["/dashboard"];
const AUTH_PATHS: &[&str] = &["/login", "/register"];
const UNGATED_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/favicon.ico"];

/// Outcome of gating a request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Serve the page.
    Allow,
    /// Send the visitor to `/login?from=<path>`.
    RedirectToLogin { from: String },
    /// Send the visitor to the dashboard.
    RedirectToDashboard,
}

impl RouteDecision {
    /// Redirect target, if any.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { from } => Some(format!(
                "{}?from={}",
                LOGIN_PATH,
                url_encode(from)
            )),
            Self::RedirectToDashboard => Some(DASHBOARD_PATH.to_string()),
        }
    }
}

/// Decide what to do with a request for `path`.
pub fn route_access(path: &str, has_token: bool) -> RouteDecision {
    if UNGATED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return RouteDecision::Allow;
    }

    let is_protected = PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p));
    if is_protected && !has_token {
        return RouteDecision::RedirectToLogin {
            from: path.to_string(),
        };
    }

    let is_auth_page = AUTH_PATHS.iter().any(|p| path == *p);
    if is_auth_page && has_token {
        return RouteDecision::RedirectToDashboard;
    }

    RouteDecision::Allow
}

fn url_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
