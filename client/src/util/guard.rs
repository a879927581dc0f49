//! Shared route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route renders through `Guarded`, so all of them apply the
//! same denial behavior: no session, no view, and a login redirect that
//! remembers where the user was headed.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use netops_session::{GuardDecision, PendingNavigation, RouteGuard, SessionStore};

use super::location::full_path;

/// Evaluate the guard for the route at `pathname` + `search`.
pub fn decide<V, S>(guard: &RouteGuard<V>, store: &S, pathname: &str, search: &str) -> GuardDecision
where
    S: SessionStore,
{
    let pending = PendingNavigation::new(full_path(pathname, search), None);
    guard.check(&pending, store)
}

/// Href to redirect to, or `None` when the view may render.
pub fn denial_href(decision: &GuardDecision) -> Option<String> {
    match decision {
        GuardDecision::Allow { .. } => None,
        GuardDecision::Deny(redirect) => Some(redirect.href()),
    }
}
