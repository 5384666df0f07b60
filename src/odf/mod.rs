//! OpenDocument output.
//!
//! Only the text flavour (`.odt`) is produced; see [`odt::ODText`].

/// MIME types, part paths and namespaces
pub mod constants;
/// OpenDocument Text (.odt) writer
pub mod odt;
