//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Comment not found: {0}")]
    CommentNotFound(i32),

    #[error("Invalid sort field: {0}")]
    InvalidSort(String),

    #[error("Repository read timed out: {0}")]
    Timeout(&'static str),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Store failures are the only errors allowed to reach the renderer.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, DomainError::DatabaseError(_) | DomainError::Timeout(_))
    }
}
