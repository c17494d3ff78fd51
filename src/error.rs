//! Error types for unmd library.

use std::io;
use thiserror::Error;

/// Result type alias for unmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while preparing or running a conversion.
///
/// [`convert`](crate::convert()) never returns these. They surface from
/// [`Converter::new`](crate::Converter::new) and option loading.
#[derive(Error, Debug)]
pub enum Error {
    /// A rewrite pattern could not be compiled.
    ///
    /// The only pattern assembled at runtime is the HTML skip pattern, built
    /// from caller-supplied tag names.
    #[error("Invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Conversion options could not be parsed.
    #[error("Invalid options: {0}")]
    Options(String),

    /// I/O error when reading an options file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Options(err.to_string())
    }
}
