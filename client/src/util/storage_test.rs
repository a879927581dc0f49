use std::cell::RefCell;
use std::collections::HashMap;

use super::*;

/// In-memory `localStorage` that can refuse writes to one key.
#[derive(Default)]
struct FakeStorage {
    items: RefCell<HashMap<String, String>>,
    full_on: Option<&'static str>,
}

impl FakeStorage {
    fn holding(session: &Session) -> Self {
        let store = Self::default();
        write_session(&store, session).unwrap();
        store
    }

    fn refusing(mut self, key: &'static str) -> Self {
        self.full_on = Some(key);
        self
    }

    fn session(&self) -> Session {
        Session { token: self.read(TOKEN_KEY), username: self.read(USERNAME_KEY), role: self.read(ROLE_KEY) }
    }
}

impl KeyValue for FakeStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        if value.is_some() && self.full_on == Some(key) {
            return Err(StoreError::Rejected("QuotaExceededError".to_owned()));
        }
        let mut items = self.items.borrow_mut();
        match value {
            Some(v) => items.insert(key.to_owned(), v.to_owned()),
            None => items.remove(key),
        };
        Ok(())
    }
}

// =============================================================================
// write_session
// =============================================================================

#[test]
fn write_session_stores_every_field() {
    let storage = FakeStorage::default();
    let session = Session::new("abc", Some("alice".to_owned()), Some("admin".to_owned()));

    write_session(&storage, &session).unwrap();

    assert_eq!(storage.session(), session);
}

#[test]
fn write_session_removes_absent_fields() {
    let storage = FakeStorage::holding(&Session::new("old", Some("bob".to_owned()), Some("admin".to_owned())));

    write_session(&storage, &Session::new("new", None, None)).unwrap();

    assert_eq!(storage.session(), Session::new("new", None, None));
}

#[test]
fn failed_write_restores_previous_session() {
    let previous = Session::new("old", Some("bob".to_owned()), Some("operator".to_owned()));
    let storage = FakeStorage::holding(&previous).refusing(ROLE_KEY);

    let result = write_session(&storage, &Session::new("new", Some("alice".to_owned()), Some("admin".to_owned())));

    assert!(matches!(result, Err(StoreError::Rejected(_))));
    assert_eq!(storage.session(), previous);
}

#[test]
fn failed_first_write_on_empty_storage_leaves_it_empty() {
    let storage = FakeStorage::default().refusing(USERNAME_KEY);

    let result = write_session(&storage, &Session::new("abc", Some("alice".to_owned()), None));

    assert!(result.is_err());
    assert!(storage.session().is_empty());
}

// =============================================================================
// outside the browser
// =============================================================================

#[cfg(not(feature = "csr"))]
#[test]
fn get_is_signed_out_outside_browser() {
    assert!(LocalStorageStore.get().is_empty());
}

#[cfg(not(feature = "csr"))]
#[test]
fn set_is_refused_outside_browser() {
    let result = LocalStorageStore.set(Session::new("abc", None, None));
    assert!(matches!(result, Err(StoreError::Unavailable)));
}

#[cfg(not(feature = "csr"))]
#[test]
fn clear_is_always_ok() {
    assert!(LocalStorageStore.clear().is_ok());
    assert!(LocalStorageStore.clear().is_ok());
}
