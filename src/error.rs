//! Error types for the cvscore library.

use std::io;
use thiserror::Error;

/// Result type alias for cvscore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during resume analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not recognized as a PDF document.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The byte stream could not be decoded as a PDF document.
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// The document decoded successfully but contains no extractable text.
    #[error("Document contains no extractable text")]
    EmptyDocument,

    /// An unexpected failure inside line building, segmentation, field
    /// extraction, or scoring. Contained so one bad document cannot take
    /// down the hosting process.
    #[error("Internal extraction error: {0}")]
    Extraction(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::DocumentParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyDocument;
        assert_eq!(err.to_string(), "Document contains no extractable text");

        let err = Error::Extraction("scoring stage panicked".to_string());
        assert_eq!(
            err.to_string(),
            "Internal extraction error: scoring stage panicked"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
