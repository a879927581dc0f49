//! Runtime configuration for the session layer.
//!
//! DESIGN
//! ======
//! Defaults match the browser deployment: API calls go through the `/api`
//! proxy prefix, requests give up after ten seconds, and a lost session lands
//! on `/login?redirect=<path>`. Every value can be overridden from the
//! environment; malformed overrides fall back to the default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_RETURN_TO_PARAM: &str = "redirect";

/// Where the API lives and where expired sessions are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prefix joined in front of every request path.
    pub api_base_url: String,
    /// Transport-level timeout; expiry surfaces as a network error.
    pub request_timeout: Duration,
    /// Route of the login view. Always starts with `/`.
    pub login_path: String,
    /// Query key carrying the return destination on login redirects.
    pub return_to_param: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            return_to_param: DEFAULT_RETURN_TO_PARAM.to_owned(),
        }
    }
}

impl SessionConfig {
    /// Build from `NETOPS_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing, blank or unparsable
    /// values keep their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let timeout_ms = read("NETOPS_API_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            api_base_url: read("NETOPS_API_BASE_URL").unwrap_or(defaults.api_base_url),
            request_timeout: Duration::from_millis(timeout_ms),
            login_path: read("NETOPS_LOGIN_PATH").map_or(defaults.login_path, |p| normalize_path(&p)),
            return_to_param: read("NETOPS_RETURN_TO_PARAM").unwrap_or(defaults.return_to_param),
        }
    }

    #[must_use]
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = base.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_login_path(mut self, path: &str) -> Self {
        self.login_path = normalize_path(path);
        self
    }
}

/// Force a leading `/` on a route path.
pub(crate) fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
