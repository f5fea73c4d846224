//! Mapping from service errors to HTTP responses.

use crate::relationship::services::RelationshipServiceError;
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed identifier, unknown kind, missing field, or cycle.
    #[error("{0}")]
    InvalidArgument(String),
    /// Missing task or relationship.
    #[error("{0}")]
    NotFound(String),
    /// Duplicate relationship.
    #[error("{0}")]
    Conflict(String),
    /// Status transition refused by the completion gate.
    #[error("{0}")]
    Rejected(String),
    /// Storage failure; the detail is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    ///
    /// - Invalid argument and rejected transitions: 400 Bad Request
    /// - Not found: 404 Not Found
    /// - Conflict: 409 Conflict
    /// - Internal: 500 Internal Server Error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(err: &impl std::error::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Internal(detail) => {
                error!(detail = %detail, "request failed with storage error");
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(_) => Self::InvalidArgument(err.to_string()),
            TaskLifecycleError::NotFound(_)
            | TaskLifecycleError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::NotFound(err.to_string())
            }
            TaskLifecycleError::Blocked { .. } => Self::Rejected(err.to_string()),
            TaskLifecycleError::Repository(TaskRepositoryError::DuplicateTask(_)) => {
                Self::Conflict(err.to_string())
            }
            TaskLifecycleError::Repository(_)
            | TaskLifecycleError::Relationships(_)
            | TaskLifecycleError::Gate(_) => Self::internal(&err),
        }
    }
}

impl From<RelationshipServiceError> for ApiError {
    fn from(err: RelationshipServiceError) -> Self {
        match err {
            RelationshipServiceError::Domain(_) | RelationshipServiceError::CycleDetected(_) => {
                Self::InvalidArgument(err.to_string())
            }
            RelationshipServiceError::SourceTaskNotFound(_)
            | RelationshipServiceError::TargetTaskNotFound(_)
            | RelationshipServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            RelationshipServiceError::Duplicate { .. } => Self::Conflict(err.to_string()),
            RelationshipServiceError::Repository(_) | RelationshipServiceError::Tasks(_) => {
                Self::internal(&err)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidArgument(rejection.body_text())
    }
}
