//! Error types for the SQLite collaborators.

use sqlbind_core::AnalyzeError;

/// Errors raised while reading a SQLite database.
#[derive(Debug, thiserror::Error)]
pub enum SqliteError {
    /// Database error while querying the schema or preparing a statement.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Analysis error while applying driver metadata.
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Result type for SQLite operations.
pub type Result<T> = std::result::Result<T, SqliteError>;
