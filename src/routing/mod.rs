//! Navigation: the route guard and the navigator it redirects through.
//!
//! DESIGN
//! ======
//! The guard is a pure decision over `(route table, session)`; the navigator
//! is the only piece that changes what the user sees. Both the guard and
//! the expiry path in `SessionConsole` build their login redirects through
//! `Redirect::to_login`, so the return destination is always preserved the
//! same way.

mod guard;
mod navigator;
mod views;

pub use guard::{GuardDecision, PendingNavigation, RouteDescriptor, RouteGuard, RouteTable};
pub use navigator::{HistoryNavigator, Navigator, Redirect, is_local_path, route_path};
pub use views::ConsoleView;
