//! Error types for the session layer.
//!
//! ERROR HANDLING
//! ==============
//! Authorization failures are ordinary `ClientError::Status` values with a
//! `401` status; the client additionally reports them as a `SessionExpired`
//! effect so the caller still sees the original failure. Transport errors
//! (timeouts included) never count as authorization failures.

use http::StatusCode;

/// Failure reading or writing a durable session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage is unavailable")]
    Unavailable,
    #[error("session storage rejected the write: {0}")]
    Rejected(String),
    #[error("session storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session record is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure before any HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Failure surfaced to the code that issued an API call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed with status {status}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("request rejected ({code}): {message}")]
    Rejected { code: i64, message: String },
    #[error("session could not be stored: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// HTTP status of the failing response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the server's "credential missing, invalid or expired" answer.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
