//! Mapping of board errors onto HTTP responses

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskboard::BoardError;
use thiserror::Error;

/// Errors returned by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Board(#[from] BoardError),

    /// Request body or query string could not be decoded
    #[error("malformed request: {0}")]
    BadRequest(String),
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub kind: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Board(BoardError::Validation { .. }) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Board(BoardError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Board(BoardError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            Self::Board(BoardError::StorageUnavailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Board(e) => e.kind(),
            Self::BadRequest(_) => "validation",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "request failed: {}", self);
        } else {
            tracing::debug!(kind = self.kind(), "request rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
