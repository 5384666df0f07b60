//! Error types for media registration and packaging.
use thiserror::Error;

/// Result type for media operations.
pub type Result<T> = std::result::Result<T, MediaError>;

#[derive(Error, Debug)]
pub enum MediaError {
    /// The extension is not accepted for this kind of media
    #[error("Unsupported media type '{extension}' for {locator}")]
    UnsupportedMediaType { locator: String, extension: String },

    /// The source could not be read
    #[error("Cannot read media source {locator}: {source}")]
    SourceUnreadable {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// The source is readable but not a decodable image
    #[error("Cannot decode image {locator}: {reason}")]
    UndecodableImage { locator: String, reason: String },
}

impl MediaError {
    pub(crate) fn unsupported(locator: impl Into<String>, extension: impl Into<String>) -> Self {
        MediaError::UnsupportedMediaType {
            locator: locator.into(),
            extension: extension.into(),
        }
    }

    pub(crate) fn unreadable(locator: impl Into<String>, source: std::io::Error) -> Self {
        MediaError::SourceUnreadable {
            locator: locator.into(),
            source,
        }
    }
}
