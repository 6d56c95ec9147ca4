//! Error types for the uncv library.

use std::io;
use thiserror::Error;

/// Result type alias for uncv operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during résumé extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The document contains no extractable text layer (e.g. a pure-image scan).
    #[error("Document has no extractable text layer")]
    NoTextLayer,

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error during JSON rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// The external description generator failed.
    #[error("Description generation failed: {0}")]
    Describe(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoTextLayer;
        assert_eq!(err.to_string(), "Document has no extractable text layer");

        let err = Error::UnsupportedVersion("3.1".to_string());
        assert_eq!(err.to_string(), "Unsupported PDF version: 3.1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
