//! Error types for docslice.
//!
//! Container-level failures, missing content parts and broken XML are kept apart
//! so callers can tell "wrong file" from "damaged file". Reaching the limit is not
//! an error; see [`crate::Status`].

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
