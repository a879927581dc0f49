//! Toast notices shown over every page.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;
use netops_session::{Notice, Notifier};

/// The notice currently on screen, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub current: Option<Notice>,
    /// Bumped on every notice so repeated identical notices re-show.
    pub serial: u64,
}

impl ToastState {
    pub fn show(&mut self, notice: Notice) {
        self.current = Some(notice);
        self.serial = self.serial.wrapping_add(1);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

/// `Notifier` that writes into the toast signal.
#[derive(Clone, Copy, Debug)]
pub struct ToastNotifier {
    state: RwSignal<ToastState>,
}

impl ToastNotifier {
    pub fn new(state: RwSignal<ToastState>) -> Self {
        Self { state }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        self.state.update(|s| s.show(notice));
    }
}
