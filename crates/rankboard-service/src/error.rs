//! Error types for rankboard service operations.

use rankboard_store::StoreError;

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur in registration, login, and admin operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A store with this email is already registered.
    #[error("a store with email {email} is already registered")]
    DuplicateEmail {
        /// The conflicting email address.
        email: String,
    },

    /// Email/secret pair did not match any store or the admin account.
    #[error("invalid email or secret")]
    InvalidCredentials,

    /// An operation referenced a store that does not exist.
    #[error("store not found: {store_id}")]
    StoreNotFound {
        /// The unknown store id.
        store_id: String,
    },

    /// The caller lacks the admin role.
    #[error("admin role required")]
    AdminRequired,

    /// Underlying storage failure.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
