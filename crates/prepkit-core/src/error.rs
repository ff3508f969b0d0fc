//! Error types for prepkit.

use thiserror::Error;

/// Result type alias using prepkit's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for prepkit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (missing file, missing required field, bad path)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single remote file-store upload attempt failed
    #[error("Upload error: {0}")]
    Upload(String),

    /// The upload retry budget is exhausted; carries the last underlying error
    #[error("Upload failed after {attempts} attempts: {last_error}")]
    UploadFailed { attempts: usize, last_error: String },

    /// Remote generation call failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Document text extraction failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
