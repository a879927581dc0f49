//! User-visible notices raised by the session layer.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::rc::Rc;
use std::sync::{Mutex, PoisonError};

/// Text shown when a request comes back `401`.
pub const SESSION_EXPIRED_NOTICE: &str = "Session expired, please log in again";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient, non-fatal message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    #[must_use]
    pub fn session_expired() -> Self {
        Self::error(SESSION_EXPIRED_NOTICE)
    }
}

/// Displays notices (toast, status line, log).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<F: Notifier + ?Sized> Notifier for &F {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

impl<F: Notifier + ?Sized> Notifier for Rc<F> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Routes notices into the log. Used where there is no UI surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(text = %notice.message, "notice"),
            NoticeLevel::Warning => tracing::warn!(text = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(text = %notice.message, "notice"),
        }
    }
}

/// Keeps every notice it receives, in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).push(notice);
    }
}
