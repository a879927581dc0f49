//! Redirect targets and the navigator capability.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::rc::Rc;
use std::sync::{Mutex, PoisonError};

use url::form_urlencoded;

use crate::config::SessionConfig;

/// Path of a route without query string, fragment or trailing slash.
#[must_use]
pub fn route_path(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    let path = &href[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// True for same-origin absolute paths (`/device`), false for
/// protocol-relative or external targets that must never be followed after
/// login.
///
/// Control characters are rejected outright: browsers strip tab, CR and LF
/// while parsing, so `/\t/host` would load as `//host`.
#[must_use]
pub fn is_local_path(dest: &str) -> bool {
    dest.starts_with('/') && !dest.starts_with("//") && !dest.contains('\\') && !dest.chars().any(char::is_control)
}

/// A navigation target: a route path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Redirect {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Login route carrying `return_to` as the return destination.
    ///
    /// The destination is dropped when it is not a local path or when it is
    /// the login route itself.
    #[must_use]
    pub fn to_login(config: &SessionConfig, return_to: Option<&str>) -> Self {
        let redirect = Self::new(config.login_path.clone());
        match return_to.filter(|dest| is_local_path(dest) && route_path(dest) != route_path(&config.login_path)) {
            Some(dest) => redirect.with_query(config.return_to_param.clone(), dest),
            None => redirect,
        }
    }

    /// Parse an href such as `/login?redirect=%2Fdevice`. The fragment is
    /// discarded.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let without_fragment = href.split('#').next().unwrap_or_default();
        let (path, raw_query) = without_fragment.split_once('?').unwrap_or((without_fragment, ""));
        let query = form_urlencoded::parse(raw_query.as_bytes()).into_owned().collect();
        Self { path: path.to_owned(), query }
    }

    /// Render as an href with a form-encoded query string.
    #[must_use]
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let encoded = form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.query).finish();
        format!("{}?{encoded}", self.path)
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Return destination carried by a login redirect, if it is safe to
    /// follow.
    #[must_use]
    pub fn return_to(&self, config: &SessionConfig) -> Option<&str> {
        self.query_value(&config.return_to_param).filter(|dest| is_local_path(dest))
    }

    #[must_use]
    pub fn is_route(&self, path: &str) -> bool {
        route_path(&self.path) == route_path(path)
    }
}

/// Changes the visible view. Used by both the route guard and the expiry
/// handling in `SessionConsole`.
pub trait Navigator {
    /// Full path (with query) of the view currently shown.
    fn current_path(&self) -> Option<String>;

    /// Transition to `redirect`.
    fn navigate(&self, redirect: &Redirect);
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn current_path(&self) -> Option<String> {
        (**self).current_path()
    }

    fn navigate(&self, redirect: &Redirect) {
        (**self).navigate(redirect);
    }
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn current_path(&self) -> Option<String> {
        (**self).current_path()
    }

    fn navigate(&self, redirect: &Redirect) {
        (**self).navigate(redirect);
    }
}

/// In-memory history stack; the native counterpart of the browser's
/// history API.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn starting_at(href: impl Into<String>) -> Self {
        Self { entries: Mutex::new(vec![href.into()]) }
    }

    /// Every href visited, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Number of hrefs visited that resolve to `path`.
    #[must_use]
    pub fn visits_to(&self, path: &str) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|href| route_path(href) == route_path(path))
            .count()
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    fn navigate(&self, redirect: &Redirect) {
        let href = redirect.href();
        tracing::debug!(%href, "navigate");
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(href);
    }
}
