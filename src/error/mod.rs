//! Unified error handling for the course API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Generic message carried by every 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body for deliberate client failures (401, 403, 404)
#[derive(Serialize)]
struct MessageBody {
    message: String,
}

/// Body for field validation failures
#[derive(Serialize)]
struct ValidationBody {
    errors: Vec<String>,
}

/// Body for unexpected failures
#[derive(Debug, Serialize)]
pub struct InternalErrorBody {
    pub message: String,
    pub name: String,
    pub description: String,
}

impl InternalErrorBody {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Render the uniform 500 response
pub fn internal_error_response(name: &str, description: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody::new(name, description)),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Unauthenticated(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::BadRequest(message) => (status, Json(MessageBody { message })).into_response(),
            AppError::Validation(errors) => (status, Json(ValidationBody { errors })).into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                internal_error_response("DatabaseError", e.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                internal_error_response("InternalError", e.to_string())
            }
        }
    }
}
