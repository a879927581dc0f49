//! # netops-client
//!
//! Leptos + WASM frontend shell for the network operations console.
//!
//! This crate wires the platform-neutral `netops-session` layer into the
//! browser: `localStorage` persistence, a `gloo-net` transport, page-level
//! navigation through `window.location`, toast notices, and route guarding
//! for every protected view. The views themselves are placeholders; the real
//! device, topology and report screens plug in behind the same guard.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
