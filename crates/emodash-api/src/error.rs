//! Error types for store gateway operations.

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gateway error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connection refused, reset, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },

    /// Base URL could not be parsed or joined.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Creates a status error, keeping at most 400 characters of the body.
    #[must_use]
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(400).collect(),
        }
    }

    /// Returns true if the error came from the transport layer rather than the store.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
