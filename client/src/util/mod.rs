//! Browser environment adapters for the session layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules isolate `web-sys` access (storage, location) so pages and
//! components only deal with `netops-session` traits.

pub mod guard;
pub mod location;
pub mod storage;
