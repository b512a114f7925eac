//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during world-state operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Key has no value in world state.
    #[error("no state for key {0}")]
    NotFound(String),

    /// Backend failed for a reason other than the database itself.
    #[error("failed to access state for key {key}: {reason}")]
    Backend { key: String, reason: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
