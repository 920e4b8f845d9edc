//! Domain-level error types.

use thiserror::Error;

use crate::domain::YapId;
use crate::validation::ValidationError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: YapId },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error(transparent)]
    Storage(#[from] RepoError),
}

impl DomainError {
    pub fn yap_not_found(id: YapId) -> Self {
        DomainError::NotFound {
            entity_type: "yap",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    /// Lock or pool acquisition timed out. Safe for the client to retry.
    #[error("Storage busy: {0}")]
    Busy(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepoError::Busy(_))
    }
}
