//! Error types for record store operations.

/// Result type alias for record store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Record store error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP transport error (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reported by the remote API.
    #[error("API error ({status}): {code} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code (e.g., `validation_error`).
        code: String,
        /// Human-readable description.
        message: String,
    },

    /// The addressed record does not exist.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Creates an API error from status, code and message.
    #[must_use]
    pub fn api_error(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error means the record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
