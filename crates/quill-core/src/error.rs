//! Domain-level error types.

use thiserror::Error;

use crate::domain::ValidationErrors;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid post identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Post not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Seed data unavailable: {0}")]
    SeedUnavailable(#[from] SeedError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Record rejected by store: {0}")]
    Rejected(String),

    #[error("Stored record is malformed: {0}")]
    Corrupt(String),
}

/// Failures reading the seed collection.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file not found: {0}")]
    Missing(String),

    #[error("seed file could not be read: {0}")]
    Unreadable(String),

    #[error("seed file is not a JSON array of posts: {0}")]
    Malformed(String),
}
