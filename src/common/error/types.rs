//! Unified error types for quillpack.
//!
//! Errors raised while building the model surface immediately at the builder
//! call that caused them. Errors raised while assembling a package abort the
//! whole save and leave nothing at the destination.
use crate::media::MediaError;
use crate::style::StyleError;
use thiserror::Error;

/// Main error type for quillpack operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Style construction or resolution failed
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    /// Media registration or packaging of a media payload failed
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// A writer was asked to save without a document attached
    #[error("No document assigned to the writer")]
    NoDocumentAssigned,

    /// Archive open/write/close failure, or a missing staging directory
    #[error("Packaging I/O error: {0}")]
    PackagingIo(#[from] std::io::Error),

    /// ZIP container error other than plain I/O
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Unknown output format requested from the writer factory
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The element kind cannot be placed in this container
    #[error("{element} is not allowed in a {container}")]
    ElementNotAllowed {
        element: &'static str,
        container: &'static str,
    },

    /// Generated parts disagree about an identifier
    #[error("Inconsistent package: {0}")]
    Inconsistent(String),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for quillpack operations.
pub type Result<T> = std::result::Result<T, Error>;
