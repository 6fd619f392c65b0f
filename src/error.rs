//! Error types for openFDA operations.

use thiserror::Error;

/// Errors that can occur while querying the openFDA API.
#[derive(Debug, Error)]
pub enum FdaError {
    /// Query rejected before any request was made.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// API request failed with a terminal status.
    #[error("openFDA API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited after retries were exhausted.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Output stream failure.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for openFDA operations.
pub type Result<T> = core::result::Result<T, FdaError>;
