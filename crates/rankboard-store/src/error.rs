//! Error types for rankboard storage.
//!
//! Persistence failures are surfaced as distinct error kinds rather
//! than swallowed; lookups that find nothing return `Ok(None)` and
//! deletes/updates of absent records are silent no-ops.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
