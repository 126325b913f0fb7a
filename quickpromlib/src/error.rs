//! Error types for quickpromlib

use thiserror::Error;

/// Errors that can occur while decoding or rendering a query result
#[derive(Error, Debug)]
pub enum QuickpromError {
    /// The result kind has no renderer (anything but scalar, vector, matrix)
    #[error("no renderer available for result type '{0}'")]
    NoRenderer(String),

    /// The backend answered with `"status": "error"`
    #[error("query failed ({error_type}): {message}")]
    QueryFailed { error_type: String, message: String },

    /// The document is valid JSON but not a query response
    #[error("malformed query response: {0}")]
    MalformedResponse(String),

    /// JSON decoding or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
