//! Common types and utilities shared by both document formats.
//!
//! Nothing in here knows about ODT or DOCX specifically: the error taxonomy,
//! character-exact slicing, whitespace normalization and the streaming XML
//! helpers are driven by [`crate::DocumentFormat`] from the reader.

// Submodule declarations
pub mod error;
pub mod normalize;
pub mod runes;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
