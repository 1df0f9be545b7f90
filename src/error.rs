//! Error types for pdf-hierarchy.

use std::io;
use thiserror::Error;

/// Result type alias for pdf-hierarchy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while structuring a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fragment or block carries no character-level style samples.
    ///
    /// Recoverable: the fragment is skipped.
    #[error("No style samples for fragment: {0:?}")]
    EmptyStyle(String),

    /// The document contains no text samples at all.
    #[error("Document contains no stylable text")]
    NoStylableText,

    /// The document has text, but none of it lies inside the clip region.
    #[error("All {0} style samples fall outside the clip region")]
    ClippedOut(usize),

    /// A policy was assembled with invalid parameters.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether the error only affects a single fragment.
    ///
    /// Recoverable errors are logged and the offending fragment is skipped;
    /// everything else aborts the document.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::EmptyStyle(_) => true,
            Error::Io(_)
            | Error::Json(_)
            | Error::NoStylableText
            | Error::ClippedOut(_)
            | Error::InvalidPolicy(_)
            | Error::Render(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoStylableText;
        assert_eq!(err.to_string(), "Document contains no stylable text");

        let err = Error::ClippedOut(12);
        assert_eq!(
            err.to_string(),
            "All 12 style samples fall outside the clip region"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::EmptyStyle(String::new()).is_recoverable());
        assert!(!Error::NoStylableText.is_recoverable());
        assert!(!Error::InvalidPolicy("x".into()).is_recoverable());
        assert!(!Error::ClippedOut(3).is_recoverable());
        assert!(!Error::Render("x".into()).is_recoverable());
    }
}
