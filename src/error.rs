//! Error types for bionic-preview library.

use std::io;
use thiserror::Error;

/// Result type alias for bionic-preview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the library's fallible boundaries.
///
/// The Markdown converter and the bionic segmenter themselves never fail;
/// these errors come from file access, settings validation and
/// (de)serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fixation level outside of 1..=5.
    #[error("Fixation level {0} is out of range (expected 1-5)")]
    InvalidFixation(u8),

    /// Dim opacity outside of 0.0..=1.0.
    #[error("Dim opacity {0} is out of range (expected 0.0-1.0)")]
    InvalidOpacity(f32),

    /// Gradient theme name is not known.
    #[error("Unknown gradient theme: {0}")]
    UnknownTheme(String),

    /// Settings could not be loaded, parsed or merged.
    #[error("Settings error: {0}")]
    Settings(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error while producing output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
