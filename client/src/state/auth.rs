//! Display identity for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Header and section views show who is signed in. This is display data
//! derived from the stored session; it never decides access.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use netops_session::Session;

/// Who the console shows as signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub username: Option<String>,
    pub role: Option<String>,
    pub signed_in: bool,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            username: session.username().map(str::to_owned),
            role: session.role().map(str::to_owned),
            signed_in: session.is_authenticated(),
        }
    }

    /// `"alice (admin)"`, or a neutral label when details are missing.
    pub fn label(&self) -> String {
        match (&self.username, &self.role) {
            (Some(name), Some(role)) => format!("{name} ({role})"),
            (Some(name), None) => name.clone(),
            _ if self.signed_in => "Signed in".to_owned(),
            _ => "Not signed in".to_owned(),
        }
    }
}
