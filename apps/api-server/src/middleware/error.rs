//! Error handling - maps domain failures to HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::domain::ValidationErrors;
use quill_core::error::{DomainError, RepoError, SeedError};
use quill_shared::{ErrorResponse, MessageResponse};
use thiserror::Error;

/// Body returned for every unexpected failure.
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Application-level error type.
///
/// Client-correctable variants carry enough detail for the caller to fix the
/// request. `Internal` carries the cause for the server log only.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation errors: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid post ID: {0}")]
    InvalidIdentifier(String),

    #[error("Post not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Seed unavailable: {0}")]
    SeedUnavailable(SeedError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SeedUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => {
                let details = serde_json::to_value(errors).unwrap_or_default();
                builder.json(ErrorResponse::invalid_input(details))
            }
            AppError::InvalidIdentifier(_) => builder.json(ErrorResponse::invalid_post_id()),
            AppError::NotFound => builder.json(ErrorResponse::post_not_found()),
            AppError::Conflict(message) => builder.json(MessageResponse::new(message)),
            AppError::SeedUnavailable(cause) => {
                tracing::error!(error = %cause, "Seed source unavailable");
                let message = match cause {
                    SeedError::Missing(_) => {
                        "Migration failed: seed file not found. Check the path."
                    }
                    SeedError::Unreadable(_) | SeedError::Malformed(_) => {
                        "Migration failed: seed file could not be read."
                    }
                };
                builder.json(ErrorResponse::new(message))
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                builder.json(ErrorResponse::new(GENERIC_ERROR))
            }
        }
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::InvalidIdentifier(raw) => AppError::InvalidIdentifier(raw),
            DomainError::NotFound => AppError::NotFound,
            DomainError::Conflict(message) => AppError::Conflict(message),
            DomainError::SeedUnavailable(cause) => AppError::SeedUnavailable(cause),
            DomainError::Repository(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {msg}"))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {msg}")),
            RepoError::Rejected(msg) => AppError::Internal(format!("Database rejected write: {msg}")),
            RepoError::Corrupt(msg) => AppError::Internal(format!("Corrupt record: {msg}")),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_internal_error_does_not_leak_cause() {
        let err: AppError = RepoError::Connection("mongodb://admin:secret@db".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(err).await;
        assert_eq!(body, serde_json::json!({ "error": GENERIC_ERROR }));
    }

    #[actix_web::test]
    async fn test_missing_seed_has_distinct_message() {
        let missing = body_of(AppError::SeedUnavailable(SeedError::Missing("x".into()))).await;
        let malformed =
            body_of(AppError::SeedUnavailable(SeedError::Malformed("x".into()))).await;
        assert_ne!(missing["error"], malformed["error"]);
        assert!(missing["error"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidIdentifier("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("seeded".into()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
