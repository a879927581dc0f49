//! Session record and the stores that persist it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login view writes a `Session`; every outbound request and every
//! navigation reads it; a `401` or an explicit logout destroys it. Only the
//! token proves authentication. Username and role are display data.
//!
//! DESIGN
//! ======
//! Stores replace or drop the whole record in one step, so no reader can
//! observe a half-cleared session. Clearing an already empty store succeeds.


mod file;
mod memory;

use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Persisted key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Persisted key holding the display name.
pub const USERNAME_KEY: &str = "username";
/// Persisted key holding the user's role.
pub const ROLE_KEY: &str = "role";

/// Client-held proof of authentication plus display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, username: Option<String>, role: Option<String>) -> Self {
        Self { token: Some(token.into()), username, role }
    }

    /// The bearer token, treating an empty stored value as absent.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// True when no field is set at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.username.is_none() && self.role.is_none()
    }
}

/// Tab-wide persistence of the current `Session`.
pub trait SessionStore {
    /// Current record; unset fields come back as `None`. Never fails.
    fn get(&self) -> Session;

    /// Overwrite all three fields together.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage refuses the write. The
    /// previously stored session is left untouched in that case.
    fn set(&self, session: Session) -> Result<(), StoreError>;

    /// Remove all three fields. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if durable storage cannot be erased. Readers observe
    /// an empty session regardless.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self) -> Session {
        (**self).get()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        (**self).set(session)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Rc<S> {
    fn get(&self) -> Session {
        (**self).get()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        (**self).set(session)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self) -> Session {
        (**self).get()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        (**self).set(session)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
