//! Wire types for the backend's login endpoint.
//!
//! The backend wraps every payload in `{code, msg, data}` and reports
//! application failures (bad password, blank fields) with HTTP 200 and a
//! non-200 `code`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::session::Session;

/// Login endpoint, relative to the API base.
pub const LOGIN_ENDPOINT: &str = "/auth/login";
/// Envelope code signalling success.
pub const ENVELOPE_OK: i64 = 200;
/// Role assumed when the backend does not report one.
pub const DEFAULT_ROLE: &str = "operator";

/// Username/password pair posted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Reject blank fields before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Rejected` if either field is blank.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ClientError::Rejected {
                code: 400,
                message: "username and password are required".to_owned(),
            });
        }
        Ok(())
    }
}

/// Standard `{code, msg, data}` response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap `data` on success.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Rejected` when `code` is not 200 or `data` is
    /// missing.
    pub fn into_data(self) -> Result<T, ClientError> {
        match self.data {
            Some(data) if self.code == ENVELOPE_OK => Ok(data),
            _ => Err(ClientError::Rejected { code: self.code, message: self.msg }),
        }
    }
}

/// User fields the console keeps for display.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// `data` payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: LoginUser,
}

impl LoginPayload {
    #[must_use]
    pub fn into_session(self) -> Session {
        let role = self.user.role.filter(|r| !r.trim().is_empty()).unwrap_or_else(|| DEFAULT_ROLE.to_owned());
        Session::new(self.token, Some(self.user.username), Some(role))
    }
}
