//! Error types for REST operations.

/// Errors that can occur when interacting with the Kaspa REST API.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection, TLS, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A response parsed as JSON but did not have the expected shape or values.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The node refused the submitted transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// A query endpoint answered with a non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}

impl RestError {
    /// Whether the error came from the transport rather than from the node's answer.
    pub fn is_network(&self) -> bool {
        matches!(self, RestError::HttpError(_))
    }
}
