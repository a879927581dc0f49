//! Authenticated client: request and response interception around a
//! `Transport`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view talks to the backend through one `AuthClient`. The request
//! stage runs strictly before dispatch, the response stage strictly after
//! the transport resolves and before the caller sees the result.
//!
//! DESIGN
//! ======
//! The client clears the session store itself but never navigates or shows
//! UI. A `401` comes back as a `SessionExpired` effect next to the original
//! failure; the coordinator (`SessionConsole`) turns that into a redirect
//! and a notice. Concurrent `401`s each clear the store again, which is a
//! no-op on an empty store.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use http::header::AUTHORIZATION;
use http::{HeaderValue, StatusCode};
use serde::de::DeserializeOwned;

use super::request::{ApiRequest, ApiResponse};
use super::transport::Transport;
use crate::error::{ClientError, TransportError};
use crate::session::SessionStore;

/// Effect raised when the server rejected the stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    /// API path of the request that was rejected.
    pub path: String,
}

/// Result of one pass through the pipeline.
#[derive(Debug)]
#[must_use]
pub struct Dispatch {
    /// What the caller receives, unchanged by expiry handling.
    pub outcome: Result<ApiResponse, ClientError>,
    /// Set when the response was an authorization failure.
    pub expired: Option<SessionExpired>,
}

impl Dispatch {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expired.is_some()
    }

    /// Drop the effect and keep the caller-facing result.
    ///
    /// # Errors
    ///
    /// Returns the failure the pipeline produced, if any.
    pub fn into_result(self) -> Result<ApiResponse, ClientError> {
        self.outcome
    }
}

/// Request pipeline that injects the bearer token and detects expiry.
#[derive(Debug, Clone)]
pub struct AuthClient<T, S> {
    transport: T,
    store: S,
}

impl<T, S> AuthClient<T, S>
where
    T: Transport,
    S: SessionStore,
{
    #[must_use]
    pub fn new(transport: T, store: S) -> Self {
        Self { transport, store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request stage. Adds `Authorization: Bearer <token>` when a token is
    /// stored; otherwise the request passes through unmodified. Never fails.
    #[must_use]
    pub fn authorize(&self, mut request: ApiRequest) -> ApiRequest {
        let session = self.store.get();
        let Some(token) = session.token() else {
            return request;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
                tracing::debug!(method = %request.method, path = %request.path, "attached bearer credential");
            }
            Err(_) => {
                tracing::warn!(path = %request.path, "stored token is not a valid header value; sending without credential");
            }
        }
        request
    }

    /// Response stage. Non-2xx responses become `ClientError::Status`; a
    /// `401` additionally clears the session and raises `SessionExpired`.
    pub fn inspect(&self, path: &str, result: Result<ApiResponse, TransportError>) -> Dispatch {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%path, error = %e, "transport failure");
                return Dispatch { outcome: Err(e.into()), expired: None };
            }
        };
        if response.is_success() {
            return Dispatch { outcome: Ok(response), expired: None };
        }

        let status = response.status;
        let expired = (status == StatusCode::UNAUTHORIZED).then(|| self.expire(path));
        Dispatch { outcome: Err(ClientError::Status { status, body: response.body }), expired }
    }

    fn expire(&self, path: &str) -> SessionExpired {
        if let Err(e) = self.store.clear() {
            tracing::error!(%path, error = %e, "failed to erase persisted session");
        }
        tracing::warn!(%path, "authorization rejected; session cleared");
        SessionExpired { path: path.to_owned() }
    }

    /// Run the full pipeline for one call.
    pub async fn execute(&self, request: ApiRequest) -> Dispatch {
        let request = self.authorize(request);
        let path = request.path.clone();
        let result = self.transport.send(request).await;
        self.inspect(&path, result)
    }

    /// Run the pipeline and return only the caller-facing result.
    ///
    /// # Errors
    ///
    /// Returns transport failures and non-2xx responses.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.execute(request).await.into_result()
    }

    /// Run the pipeline and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns transport failures, non-2xx responses and decode failures.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json()?)
    }
}
