//! Common types and utilities shared across formats.
//!
//! This module provides the unified error type, writer settings, document
//! metadata, unit conversions and XML helpers used by both the OOXML and the
//! OpenDocument writers.

// Submodule declarations
pub mod error;
pub mod metadata;
pub mod settings;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use metadata::Metadata;
pub use settings::{Compression, Settings};
