//! # netops-session
//!
//! Client-side session layer for the network operations console.
//!
//! Attaches the stored bearer token to every outbound API call, detects
//! session expiry from `401` responses, and keeps protected views behind a
//! route guard. The browser build (`client/`) plugs `localStorage`,
//! `gloo-net` and the Leptos router into the same pieces; the native build
//! ships a reqwest transport, a file-backed store and the `netops` CLI.
//!
//! ARCHITECTURE
//! ============
//! - `session` owns the persisted `{token, username, role}` record.
//! - `net` decorates requests and inspects responses (`AuthClient`).
//! - `routing` decides navigations (`RouteGuard`) and performs them
//!   (`Navigator`).
//! - `console` is the outer coordinator that turns a `SessionExpired`
//!   effect into a login redirect plus a user-visible notice.

pub mod config;
pub mod console;
pub mod error;
pub mod net;
pub mod notice;
pub mod routing;
pub mod session;

pub use config::SessionConfig;
pub use console::SessionConsole;
pub use error::{ClientError, StoreError, TransportError};
pub use net::{ApiRequest, ApiResponse, AuthClient, Credentials, Dispatch, SessionExpired, Transport};
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use routing::{
    ConsoleView, GuardDecision, HistoryNavigator, Navigator, PendingNavigation, Redirect, RouteGuard, RouteTable,
};
pub use session::{FileStore, MemoryStore, Session, SessionStore};
