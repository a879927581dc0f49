//! Route guard: decides every navigation against route metadata and the
//! current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs synchronously before each transition, with no network I/O. Token
//! presence is a local fact; whether the token is still accepted by the
//! server is discovered on the next API call.
//!
//! TRADE-OFFS
//! ==========
//! Paths with no declared route are allowed so the router can show its
//! not-found view. Only declared `requires_auth` routes are protected.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::navigator::{Redirect, route_path};
use super::views::ConsoleView;
use crate::config::{SessionConfig, normalize_path};
use crate::session::{Session, SessionStore};

/// Alias hops followed before giving up on a redirect chain.
const MAX_ALIAS_HOPS: usize = 8;

/// Static declaration of a navigable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor<V> {
    pub path: String,
    pub requires_auth: bool,
    pub view: V,
}

#[derive(Debug, Clone)]
struct Alias {
    from: String,
    to: String,
}

/// Route declarations, fixed at startup.
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<RouteDescriptor<V>>,
    aliases: Vec<Alias>,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self { routes: Vec::new(), aliases: Vec::new() }
    }
}

impl<V> RouteTable<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, path: &str, requires_auth: bool, view: V) -> Self {
        self.routes.push(RouteDescriptor { path: normalize_path(path), requires_auth, view });
        self
    }

    #[must_use]
    pub fn public(self, path: &str, view: V) -> Self {
        self.route(path, false, view)
    }

    #[must_use]
    pub fn protected(self, path: &str, view: V) -> Self {
        self.route(path, true, view)
    }

    /// Declare `from` as an alias that always continues to `to`.
    #[must_use]
    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.aliases.push(Alias { from: normalize_path(from), to: normalize_path(to) });
        self
    }

    /// Descriptor matching `href`, ignoring query, fragment and trailing slash.
    #[must_use]
    pub fn find(&self, href: &str) -> Option<&RouteDescriptor<V>> {
        let path = route_path(href);
        self.routes.iter().find(|r| route_path(&r.path) == path)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &RouteDescriptor<V>> {
        self.routes.iter()
    }

    fn alias_for(&self, href: &str) -> Option<&str> {
        let path = route_path(href);
        self.aliases.iter().find(|a| route_path(&a.from) == path).map(|a| a.to.as_str())
    }

    /// Follow alias redirects, keeping the original query string.
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        let suffix = href.find(['?', '#']).map_or("", |i| &href[i..]);
        let mut path = route_path(href).to_owned();
        for _ in 0..MAX_ALIAS_HOPS {
            match self.alias_for(&path) {
                Some(next) => path = next.to_owned(),
                None => break,
            }
        }
        format!("{path}{suffix}")
    }
}

impl RouteTable<ConsoleView> {
    /// The console's route table: `/` continues to login, the login view is
    /// public, every other view requires a session.
    #[must_use]
    pub fn standard(config: &SessionConfig) -> Self {
        ConsoleView::ALL.into_iter().fold(Self::new().redirect("/", &config.login_path), |table, view| {
            let path = if view == ConsoleView::Login { config.login_path.as_str() } else { view.path() };
            table.route(path, view.requires_auth(), view)
        })
    }
}

/// One navigation attempt under evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub target: String,
    pub from: Option<String>,
}

impl PendingNavigation {
    #[must_use]
    pub fn new(target: impl Into<String>, from: Option<String>) -> Self {
        Self { target: target.into(), from }
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to `path` (the target after alias resolution).
    Allow { path: String },
    /// Go to the login route instead; the target rides along as the return
    /// destination.
    Deny(Redirect),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }

    /// Where the navigation ends up.
    #[must_use]
    pub fn destination(&self) -> Redirect {
        match self {
            Self::Allow { path } => Redirect::parse(path),
            Self::Deny(redirect) => redirect.clone(),
        }
    }
}

/// Navigation interceptor over a fixed route table.
#[derive(Debug, Clone)]
pub struct RouteGuard<V> {
    routes: RouteTable<V>,
    config: SessionConfig,
}

impl<V> RouteGuard<V> {
    #[must_use]
    pub fn new(routes: RouteTable<V>, config: SessionConfig) -> Self {
        Self { routes, config }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable<V> {
        &self.routes
    }

    /// ALLOW when the route is public or a token is present, DENY otherwise.
    #[must_use]
    pub fn evaluate(&self, pending: &PendingNavigation, session: &Session) -> GuardDecision {
        let target = self.routes.resolve(&pending.target);
        let requires_auth = self.routes.find(&target).is_some_and(|r| r.requires_auth);
        if !requires_auth || session.is_authenticated() {
            return GuardDecision::Allow { path: target };
        }
        tracing::debug!(
            to = %target,
            from = pending.from.as_deref().unwrap_or("-"),
            "navigation denied; no session"
        );
        GuardDecision::Deny(Redirect::to_login(&self.config, Some(&target)))
    }

    /// `evaluate` against the store's current session.
    #[must_use]
    pub fn check<S: SessionStore + ?Sized>(&self, pending: &PendingNavigation, store: &S) -> GuardDecision {
        self.evaluate(pending, &store.get())
    }
}
