//! Durable session store backed by a JSON file.
//!
//! DESIGN
//! ======
//! Native stand-in for browser `localStorage`: the record survives process
//! restarts the way a token survives a page reload. Reads are served from
//! an in-memory copy. Writes go to a sibling temp file that is renamed into
//! place, so a crash never leaves a torn record on disk.
//!
//! TRADE-OFFS
//! ==========
//! Another process editing the file is not picked up until the next `open`.
//! Sessions are not synchronized across instances.

#[cfg(test)]
#[path = "file_test.rs"]
mod file_test;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use super::{Session, SessionStore};
use crate::error::StoreError;

/// Session persisted at a fixed path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cached: RwLock<Session>,
}

impl FileStore {
    /// Open the store at `path`, loading any previously saved session.
    ///
    /// A missing file is an empty session. An unreadable or corrupt file is
    /// logged and also treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = RwLock::new(load(&path));
        Self { path, cached }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn load(path: &Path) -> Session {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Session::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file unreadable; starting signed out");
            return Session::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "session file corrupt; starting signed out");
            Session::default()
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self) -> Session {
        self.cached.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, session: Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&session)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, raw)?;
        fs::rename(&temp, &self.path)?;

        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
