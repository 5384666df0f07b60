//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from external
//! error types to the unified Error type.

use super::types::Error;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::PackagingIo(e),
            other => Error::Zip(other.to_string()),
        }
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::PackagingIo(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_io_error_becomes_packaging_error() {
        let io = std::io::Error::other("disk full");
        let err: Error = zip::result::ZipError::Io(io).into();
        assert!(matches!(err, Error::PackagingIo(_)));
    }

    #[test]
    fn test_fmt_error_becomes_xml_error() {
        let err: Error = std::fmt::Error.into();
        assert!(matches!(err, Error::Xml(_)));
    }
}
