//! Top-level pages.

pub mod login;
pub mod section;
