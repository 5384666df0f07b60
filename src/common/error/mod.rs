//! Unified error types for quillpack.
//!
//! This module provides a unified error type that encompasses errors from the
//! style registry, the media registry and the package writers, presenting a
//! consistent API to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
