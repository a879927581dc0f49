//! Browser networking for the session layer.

pub mod transport;
