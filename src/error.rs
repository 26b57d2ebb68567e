//! Error types for unwrite library.

use std::io;
use thiserror::Error;

/// Result type alias for unwrite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
///
/// Every error aborts the whole conversion; there is no partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file suffix is not a recognized Write document extension.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The input is not well-formed markup or is not a Write document.
    #[error("Format error: {0}")]
    Format(String),

    /// A bookmark or link on a page cannot be decoded.
    #[error("Malformed annotation on page {page}: {message}")]
    MalformedAnnotation {
        /// Page number (1-indexed)
        page: u32,
        /// What was wrong with the annotation
        message: String,
    },

    /// The vector renderer or the PDF writer failed.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn malformed(page: u32, message: impl Into<String>) -> Self {
        Error::MalformedAnnotation {
            page,
            message: message.into(),
        }
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Format(format!("not well-formed markup: {}", err))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Render(err.to_string()),
        }
    }
}
