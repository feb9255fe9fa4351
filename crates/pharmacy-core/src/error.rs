//! Errors raised by the persistence ports.

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A unique or foreign key constraint rejected the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
