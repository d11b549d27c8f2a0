//! Loading mock listings from a JSON fixture at startup.

use std::path::Path;

use pawhub_core::Listing;
use pawhub_store::{Store, StoreError};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The fixture file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path of the fixture.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The fixture is not a JSON array of listings.
    #[error("invalid seed file {path}: {source}")]
    Json {
        /// Path of the fixture.
        path: String,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// The store rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read a JSON array of listings from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Listing>, SeedError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| SeedError::Json {
        path: display,
        source,
    })
}

/// Insert listings into the store, skipping invalid ones and IDs that already exist.
///
/// Returns the number of listings inserted.
///
/// # Errors
///
/// Returns an error if the store fails for any reason other than a duplicate ID.
pub fn seed_store(store: &dyn Store, listings: Vec<Listing>) -> Result<usize, SeedError> {
    let mut inserted = 0;

    for listing in listings {
        if let Err(err) = listing.validate() {
            tracing::warn!(id = %listing.id, error = %err, "Skipping invalid seed listing");
            continue;
        }

        match store.insert(&listing) {
            Ok(()) => inserted += 1,
            Err(StoreError::Conflict(id)) => {
                tracing::debug!(%id, "Seed listing already present");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(inserted)
}
