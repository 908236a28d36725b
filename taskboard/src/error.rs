//! Error types for the task board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Bad or missing input; the caller can correct it
    #[error("invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// No card with the given id
    #[error("card not found: {id}")]
    NotFound { id: String },

    /// The board document could not be read, parsed or written
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// A board document already exists where one was about to be created
    #[error("board already exists at {location}")]
    AlreadyExists { location: String },
}

impl BoardError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::StorageUnavailable { .. } => "storage",
            Self::AlreadyExists { .. } => "already_exists",
        }
    }

    /// Storage failures may succeed if the user tries again; nothing retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("malformed board document: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::not_found("abc123");
        assert_eq!(err.to_string(), "card not found: abc123");

        let err = BoardError::validation("title", "must not be empty");
        assert_eq!(err.to_string(), "invalid value for title: must not be empty");
    }

    #[test]
    fn test_kind() {
        assert_eq!(BoardError::validation("a", "b").kind(), "validation");
        assert_eq!(BoardError::not_found("x").kind(), "not_found");
        assert_eq!(BoardError::storage("disk").kind(), "storage");
    }

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: BoardError = io.into();
        assert!(matches!(err, BoardError::StorageUnavailable { .. }));
        assert!(err.is_retryable());
        assert!(!BoardError::not_found("x").is_retryable());
    }
}
