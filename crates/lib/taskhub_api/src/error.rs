//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use taskhub_core::auth::AuthError;
use taskhub_core::tasks::TaskError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid or expired token")]
    InvalidCredential,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, field) = match &self {
            AppError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                "auth_required",
                "Authentication required".to_string(),
                None,
            ),
            // One message for every way a credential can be bad; the
            // response never says which check failed.
            AppError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired token".to_string(),
                None,
            ),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, "forbidden", m.clone(), None),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.clone(), None),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message.clone(),
                Some(field.clone()),
            ),
            AppError::StoreUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", m.clone(), None)
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            field,
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::StoreUnavailable(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => AppError::AuthRequired,
            AuthError::Db(e) => AppError::from(e),
            AuthError::Malformed
            | AuthError::BadSignature
            | AuthError::Expired
            | AuthError::NotYetValid
            | AuthError::MissingSubject => AppError::InvalidCredential,
        }
    }
}

impl From<TaskError> for AppError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task not found: {id}")),
            TaskError::Forbidden(id) => {
                AppError::Forbidden(format!("Task {id} belongs to another account"))
            }
            TaskError::Validation { field, message } => AppError::Validation {
                field: field.to_string(),
                message,
            },
            TaskError::Db(e) => AppError::from(e),
        }
    }
}
