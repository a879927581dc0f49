//! `localStorage`-backed session store.
//!
//! Persists the session under the `token`, `username` and `role` keys so it
//! survives page reloads. Requires a browser environment; outside one the
//! store reads as signed out and refuses writes.
//!
//! TRADE-OFFS
//! ==========
//! Storage events from other tabs are not observed. A logout in one tab is
//! discovered by the others on their next `401`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use netops_session::error::StoreError;
#[cfg(any(test, feature = "csr"))]
use netops_session::session::{ROLE_KEY, TOKEN_KEY, USERNAME_KEY};
use netops_session::{Session, SessionStore};

/// Session store over `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(any(test, feature = "csr"))]
const KEYS: [&str; 3] = [TOKEN_KEY, USERNAME_KEY, ROLE_KEY];

/// The slice of `localStorage` the store needs.
#[cfg(any(test, feature = "csr"))]
trait KeyValue {
    fn read(&self, key: &str) -> Option<String>;
    /// `None` removes the key.
    fn write(&self, key: &str, value: Option<&str>) -> Result<(), StoreError>;
}

#[cfg(feature = "csr")]
impl KeyValue for web_sys::Storage {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let outcome = match value {
            Some(v) => self.set_item(key, v),
            None => self.remove_item(key),
        };
        outcome.map_err(|e| StoreError::Rejected(format!("{e:?}")))
    }
}

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Write all three keys or none of them. When a write fails part-way (for
/// example on quota) the keys already written get their previous values back.
#[cfg(any(test, feature = "csr"))]
fn write_session(kv: &impl KeyValue, session: &Session) -> Result<(), StoreError> {
    let previous = KEYS.map(|key| kv.read(key));
    let next = [session.token.as_deref(), session.username.as_deref(), session.role.as_deref()];

    for (done, (key, value)) in KEYS.into_iter().zip(next).enumerate() {
        if let Err(e) = kv.write(key, value) {
            for (key, old) in KEYS.into_iter().zip(&previous).take(done) {
                if let Err(undo) = kv.write(key, old.as_deref()) {
                    #[cfg(feature = "csr")]
                    log::warn!("could not restore session key {key}: {undo}");
                    #[cfg(not(feature = "csr"))]
                    drop(undo);
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

impl SessionStore for LocalStorageStore {
    fn get(&self) -> Session {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = storage() else {
                return Session::default();
            };
            Session { token: storage.read(TOKEN_KEY), username: storage.read(USERNAME_KEY), role: storage.read(ROLE_KEY) }
        }
        #[cfg(not(feature = "csr"))]
        {
            Session::default()
        }
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let storage = storage().ok_or(StoreError::Unavailable)?;
            write_session(&storage, &session)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = session;
            Err(StoreError::Unavailable)
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            // No storage means nothing persisted to remove.
            let Some(storage) = storage() else {
                return Ok(());
            };
            for key in KEYS {
                storage.write(key, None)?;
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
