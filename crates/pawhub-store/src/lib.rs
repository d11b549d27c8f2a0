//! Storage layer for PawHub listings.
//!
//! This crate defines the [`Store`] port the service depends on, plus two
//! implementations:
//!
//! - [`MemoryStore`]: a `Vec` behind a lock; used for tests, demos and mock data
//! - `RocksStore`: persistent `RocksDB` storage (requires the `rocksdb-backend` feature)
//!
//! # Example
//!
//! ```
//! use pawhub_store::{MemoryStore, Store};
//!
//! let store = MemoryStore::new();
//! assert_eq!(store.count().unwrap(), 0);
//! assert!(store.find_all().unwrap().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use pawhub_core::{Listing, ListingId};

/// The storage trait defining all listing persistence operations.
///
/// The query engine never talks to a store directly; callers take a snapshot
/// with [`Store::find_all`] and run the engine over it.
pub trait Store: Send + Sync {
    /// Return every listing, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_all(&self) -> Result<Vec<Listing>>;

    /// Get a listing by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>>;

    /// Insert a new listing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a listing with the same ID exists.
    fn insert(&self, listing: &Listing) -> Result<()>;

    /// Replace an existing listing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the listing doesn't exist.
    fn update(&self, listing: &Listing) -> Result<()>;

    /// Delete a listing by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the listing doesn't exist.
    fn delete(&self, id: &ListingId) -> Result<()>;

    /// Number of stored listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count(&self) -> Result<usize> {
        Ok(self.find_all()?.len())
    }
}
