//! Mapping from service errors to HTTP responses.

use std::fmt;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::responses::DetailResponse;
use crate::identity::{ports::IdentityRepositoryError, services::IdentityServiceError};
use crate::task::{domain::TaskState, services::TaskLifecycleError};

const UNAUTHENTICATED_DETAIL: &str = "Authentication credentials were not provided.";
const NOT_FOUND_DETAIL: &str = "Not found.";
const FORBIDDEN_DETAIL: &str = "You do not have permission to perform this action.";
const INTERNAL_DETAIL: &str = "Internal server error.";

/// Detail sent when a charity answer is neither `A` nor `R`.
pub const RESPONSE_REQUIRED_DETAIL: &str = r#"Required field ("A" for accepted / "R" for rejected)"#;

/// Error response carrying a status code and a `{"detail": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Creates an error response.
    #[must_use]
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Missing or unknown credentials.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, UNAUTHENTICATED_DETAIL)
    }

    /// Unknown resource.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL)
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the detail message.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    fn internal(err: &dyn fmt::Display) -> Self {
        error!(error = %err, "persistence failure");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, detail = %self.detail, "request rejected");
        }
        (
            self.status,
            Json(DetailResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Validation(inner) => {
                Self::new(StatusCode::BAD_REQUEST, inner.to_string())
            }
            TaskLifecycleError::InvalidArgument(_) => {
                Self::new(StatusCode::BAD_REQUEST, RESPONSE_REQUIRED_DETAIL)
            }
            TaskLifecycleError::NotFound(_) => Self::not_found(),
            TaskLifecycleError::InvalidState { required, .. } => {
                Self::new(StatusCode::NOT_FOUND, unmet_state_detail(required))
            }
            TaskLifecycleError::PermissionDenied(_) => {
                Self::new(StatusCode::FORBIDDEN, FORBIDDEN_DETAIL)
            }
            TaskLifecycleError::Repository(inner) => Self::internal(&inner),
        }
    }
}

impl From<IdentityServiceError> for ApiError {
    fn from(err: IdentityServiceError) -> Self {
        match err {
            IdentityServiceError::Domain(inner) => {
                Self::new(StatusCode::BAD_REQUEST, inner.to_string())
            }
            IdentityServiceError::Unauthenticated
            | IdentityServiceError::Repository(IdentityRepositoryError::UnknownUser(_)) => {
                Self::unauthenticated()
            }
            IdentityServiceError::Repository(IdentityRepositoryError::DuplicateUsername(_)) => {
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "A user with that username already exists.",
                )
            }
            IdentityServiceError::Repository(IdentityRepositoryError::DuplicateProfile {
                kind,
                ..
            }) => Self::new(
                StatusCode::BAD_REQUEST,
                format!("This user already has a {kind} profile."),
            ),
            IdentityServiceError::Repository(inner) => Self::internal(&inner),
        }
    }
}

fn unmet_state_detail(required: TaskState) -> &'static str {
    match required {
        TaskState::Pending => "This task is not pending.",
        TaskState::Waiting => "This task is not waiting.",
        // No transition requires a finished task; completion requires Assigned.
        TaskState::Assigned | TaskState::Done => "Task is not assigned yet.",
    }
}
