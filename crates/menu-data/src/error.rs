//! Error types for the menu-data crate.

use thiserror::Error;

/// Errors that can occur while ingesting menu or profile payloads
#[derive(Error, Debug)]
pub enum MenuDataError {
    /// Menu or profile file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload was not valid JSON or did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload parsed but failed a semantic check
    ///
    /// Surfaced to callers as a client error; never retried.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, MenuDataError>;
