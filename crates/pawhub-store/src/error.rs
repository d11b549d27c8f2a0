//! Error types for PawHub storage.

use pawhub_core::ListingId;

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

    /// Listing not found.
    #[error("listing not found: {0}")]
    NotFound(ListingId),

    /// A listing with this ID already exists.
    #[error("listing already exists: {0}")]
    Conflict(ListingId),
}
