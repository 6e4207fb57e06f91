use crate::domain::DomainError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON failure body: a short machine-readable reason, never internals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Build an error response directly from a status and reason
pub fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

/// Convert a domain error to an HTTP response
pub fn domain_error_to_response(err: DomainError) -> Response {
    let status = match &err {
        DomainError::DeviceNotFound(_)
        | DomainError::ConfigNotFound(_)
        | DomainError::UserNotFound(_) => StatusCode::NOT_FOUND,

        DomainError::DeviceAlreadyExists(_)
        | DomainError::UserAlreadyExists(_)
        | DomainError::UnsupportedMediaType(_)
        | DomainError::InvalidDeviceName(_)
        | DomainError::InvalidEmail(_)
        | DomainError::InvalidPassword(_)
        | DomainError::InvalidUserName(_)
        | DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,

        DomainError::InvalidCredentials | DomainError::InvalidToken(_) => StatusCode::UNAUTHORIZED,

        DomainError::RepositoryError(_)
        | DomainError::StorageError(_)
        | DomainError::PasswordHashingError(_) => {
            error!(error = %err, "internal error");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    error_response(status, &err.to_string())
}
