//! Error types for style construction and resolution.
use super::StyleKind;
use thiserror::Error;

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A value could not be converted for the given key
    #[error("Invalid value '{value}' for style key '{key}': {reason}")]
    InvalidStyleValue {
        key: String,
        value: String,
        reason: &'static str,
    },

    /// The key is not a property of this style kind
    #[error("Unknown {kind} style key: {key}")]
    UnknownStyleKey { kind: StyleKind, key: String },

    /// A named style reference has no registered style
    #[error("Unknown style name: {0}")]
    UnknownStyleName(String),
}

impl StyleError {
    pub(crate) fn invalid(key: &str, value: impl ToString, reason: &'static str) -> Self {
        StyleError::InvalidStyleValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn unknown_key(kind: StyleKind, key: &str) -> Self {
        StyleError::UnknownStyleKey {
            kind,
            key: key.to_string(),
        }
    }
}
