//! In-process session store.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::sync::{PoisonError, RwLock};

use super::{Session, SessionStore};
use crate::error::StoreError;

/// Session held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Session>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self { inner: RwLock::new(session) }
    }
}

impl SessionStore for MemoryStore {
    fn get(&self) -> Session {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        Ok(())
    }
}
