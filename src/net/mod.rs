//! Authenticated HTTP pipeline.
//!
//! DESIGN
//! ======
//! `Transport` is the only seam that touches the network; `AuthClient`
//! wraps any transport with the request and response interception stages.
//! Native builds get `HttpTransport` (reqwest); the browser crate supplies a
//! `gloo-net` transport.

mod client;
mod login;
mod request;
mod transport;

pub use client::{AuthClient, Dispatch, SessionExpired};
pub use login::{ApiEnvelope, Credentials, DEFAULT_ROLE, ENVELOPE_OK, LOGIN_ENDPOINT, LoginPayload, LoginUser};
pub use request::{ApiRequest, ApiResponse, join_url};
#[cfg(feature = "native")]
pub use transport::HttpTransport;
pub use transport::Transport;
