//! Error types for the sync layer

use thiserror::Error;

/// Errors from the remote API, the local store or the session itself
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server rejected the input (400)
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced card does not exist (404 or absent from the session)
    #[error("card not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The local store could not be read or written
    #[error("local store error: {0}")]
    LocalStore(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn local_store(message: impl Into<String>) -> Self {
        Self::LocalStore(message.into())
    }

    /// Whether the failure came from the transport rather than the server
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
