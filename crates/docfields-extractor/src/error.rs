//! Error types for the field extractor

use thiserror::Error;

/// Errors that can occur during field extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Schema has no fields; there is nothing to ask the backend for
    #[error("schema has no fields; nothing to extract")]
    EmptySchema,

    /// Document text exceeds the configured maximum
    #[error("text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Backend call exceeded the configured timeout
    #[error("backend call timed out")]
    BackendTimeout,

    /// Backend provider error
    #[error("backend error: {0}")]
    Backend(String),

    /// Model output could not be parsed as a JSON object
    ///
    /// The orchestrator recovers from this internally (fallback-empty
    /// result); it surfaces only to direct callers of the parser.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        ExtractError::MalformedOutput(e.to_string())
    }
}
