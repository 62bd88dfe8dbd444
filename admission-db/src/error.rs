//! Error types for admission-db

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Database error type
///
/// Acquisition and statement failures are kept apart: the first means the
/// pool could not supply a connection at all, the second that a query failed
/// once a connection was in hand. Neither is retried at this layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to acquire connection: {0}")]
    Acquire(#[source] sqlx::Error),

    #[error("statement failed: {0}")]
    Statement(#[source] sqlx::Error),

    #[error("commit failed: {0}")]
    Commit(#[source] sqlx::Error),
}
