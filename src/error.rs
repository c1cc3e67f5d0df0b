//! Error types for Toybox server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes returned alongside every error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    NotAuthorized = 2,
    StorageFailure = 3,
    NoSuchRecord = 5,
    ToyNotAvailable = 6,
    SelfBorrow = 7,
    InvalidDate = 8,
    DuplicateEmail = 9,
    InvalidTransition = 10,
    ToyHasOpenBorrow = 11,
    BadValue = 12,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Toy is not available: {0}")]
    Unavailable(String),

    #[error("Owners cannot borrow their own toys")]
    SelfBorrow,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(format!("Malformed document: {}", e))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::Authorization(_) => (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Unavailable(_) => (StatusCode::CONFLICT, ErrorCode::ToyNotAvailable),
            AppError::SelfBorrow => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::SelfBorrow),
            AppError::InvalidDate(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidDate),
            AppError::DuplicateEmail(_) => (StatusCode::CONFLICT, ErrorCode::DuplicateEmail),
            AppError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, ErrorCode::InvalidTransition)
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::ToyHasOpenBorrow),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::Storage(_) | AppError::Database(_) | AppError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageFailure)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Storage(_) | AppError::Database(_) | AppError::Io(_) => {
                tracing::error!("Storage error: {}", self);
                "Storage error".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |e: AppError| e.into_response().status();
        assert_eq!(status(AppError::NotFound("toy".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(AppError::SelfBorrow), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status(AppError::Unavailable("x".into())), StatusCode::CONFLICT);
        assert_eq!(status(AppError::InvalidDate("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(AppError::Storage("disk".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Authorization("staff only".into()).status_and_code().1 as u32,
            2
        );
        assert_eq!(
            status(AppError::InvalidTransition {
                from: "returned".into(),
                event: "approve".into()
            }),
            StatusCode::CONFLICT
        );
    }
}
