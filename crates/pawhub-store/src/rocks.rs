//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Each value is a CBOR-encoded record carrying the listing and its insertion
//! sequence number, which `find_all` uses to return listings in insertion order.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};
use serde::{Deserialize, Serialize};

use pawhub_core::{Listing, ListingId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// Stored form of a listing.
#[derive(Serialize)]
struct StoredListingRef<'a> {
    seq: u64,
    listing: &'a Listing,
}

#[derive(Deserialize)]
struct StoredListing {
    seq: u64,
    listing: Listing,
}

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    next_seq: AtomicU64,
    // Serializes read-check-write sequences (insert/update/delete).
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created, or if an
    /// existing record cannot be decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let store = Self {
            db: Arc::new(db),
            next_seq: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        };

        let next_seq = store
            .scan()?
            .iter()
            .map(|stored| stored.seq + 1)
            .max()
            .unwrap_or(0);
        store.next_seq.store(next_seq, Ordering::SeqCst);

        tracing::debug!(next_seq, "Opened listing store");
        Ok(store)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    fn get(&self, id: &ListingId) -> Result<Option<StoredListing>> {
        let cf = self.cf(cf::LISTINGS)?;

        self.db
            .get_cf(&cf, keys::listing_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn put(&self, seq: u64, listing: &Listing) -> Result<()> {
        let cf = self.cf(cf::LISTINGS)?;
        let value = Self::serialize(&StoredListingRef { seq, listing })?;

        self.db
            .put_cf(&cf, keys::listing_key(&listing.id), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Read every stored record, in key order.
    fn scan(&self) -> Result<Vec<StoredListing>> {
        let cf = self.cf(cf::LISTINGS)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if keys::listing_id_from_key(&key).is_none() {
                tracing::warn!(key_len = key.len(), "Skipping malformed listing key");
                continue;
            }
            records.push(Self::deserialize(&value)?);
        }
        Ok(records)
    }
}

impl Store for RocksStore {
    fn find_all(&self) -> Result<Vec<Listing>> {
        let mut records = self.scan()?;
        records.sort_by_key(|r| r.seq);
        Ok(records.into_iter().map(|r| r.listing).collect())
    }

    fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        Ok(self.get(id)?.map(|r| r.listing))
    }

    fn insert(&self, listing: &Listing) -> Result<()> {
        let _guard = self.lock()?;

        if self.get(&listing.id)?.is_some() {
            return Err(StoreError::Conflict(listing.id));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.put(seq, listing)
    }

    fn update(&self, listing: &Listing) -> Result<()> {
        let _guard = self.lock()?;

        let existing = self
            .get(&listing.id)?
            .ok_or(StoreError::NotFound(listing.id))?;
        self.put(existing.seq, listing)
    }

    fn delete(&self, id: &ListingId) -> Result<()> {
        let _guard = self.lock()?;
        let cf = self.cf(cf::LISTINGS)?;

        if self.get(id)?.is_none() {
            return Err(StoreError::NotFound(*id));
        }

        self.db
            .delete_cf(&cf, keys::listing_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
