//! Error types for the LLM gateway client.

use thiserror::Error;

/// Errors from the LLM gateway boundary.
///
/// Every variant is recoverable for the ranking and summary paths (callers
/// fall back to the local heuristic or a templated summary); only the
/// dedicated calorie and research HTTP endpoints surface these as
/// service-unavailable responses.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Gateway cannot be used at all (no API key configured, client setup
    /// failed)
    #[error("LLM gateway unavailable: {0}")]
    Unavailable(String),

    /// Transport-level failure: connection refused, timeout, bad TLS
    #[error("HTTP error calling LLM gateway: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway answered with a non-success status
    #[error("LLM gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Gateway answered 200 but the body had no usable content
    #[error("Failed to parse LLM response: {0}")]
    Parse(String),
}
