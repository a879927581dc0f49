//! Navigator over `window.location`.
//!
//! Navigation is a full page load, matching the login page's post-sign-in
//! jump: the next page starts from whatever `localStorage` holds.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use netops_session::{Navigator, Redirect};

/// Reads and sets the browser location. No state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationNavigator;

/// Path plus query string, as stored in a return destination.
pub fn full_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() { pathname.to_owned() } else { format!("{pathname}?{search}") }
}

impl Navigator for LocationNavigator {
    fn current_path(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let location = web_sys::window()?.location();
            let pathname = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(full_path(&pathname, &search))
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn navigate(&self, redirect: &Redirect) {
        let href = redirect.href();
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&href) {
                    log::warn!("navigation to {href} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = href;
        }
    }
}
