//! Shared client-side state modules.

pub mod auth;
pub mod toast;
