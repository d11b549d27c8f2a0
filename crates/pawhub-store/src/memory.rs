//! In-memory storage implementation.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use pawhub_core::{Listing, ListingId};

use crate::error::{Result, StoreError};
use crate::Store;

/// In-memory listing store.
///
/// Listings live in a `Vec` in insertion order. Writes take the write lock, so
/// a reader always sees the collection either before or after a write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with listings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if two listings share an ID.
    pub fn with_listings(listings: impl IntoIterator<Item = Listing>) -> Result<Self> {
        let store = Self::new();
        for listing in listings {
            store.insert(&listing)?;
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Listing>>> {
        self.listings
            .read()
            .map_err(|_| StoreError::Database("listing lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Listing>>> {
        self.listings
            .write()
            .map_err(|_| StoreError::Database("listing lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn find_all(&self) -> Result<Vec<Listing>> {
        Ok(self.read()?.clone())
    }

    fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>> {
        Ok(self.read()?.iter().find(|l| l.id == *id).cloned())
    }

    fn insert(&self, listing: &Listing) -> Result<()> {
        let mut listings = self.write()?;
        if listings.iter().any(|l| l.id == listing.id) {
            return Err(StoreError::Conflict(listing.id));
        }
        listings.push(listing.clone());
        Ok(())
    }

    fn update(&self, listing: &Listing) -> Result<()> {
        let mut listings = self.write()?;
        let slot = listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or(StoreError::NotFound(listing.id))?;
        *slot = listing.clone();
        Ok(())
    }

    fn delete(&self, id: &ListingId) -> Result<()> {
        let mut listings = self.write()?;
        let index = listings
            .iter()
            .position(|l| l.id == *id)
            .ok_or(StoreError::NotFound(*id))?;
        listings.remove(index);
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use pawhub_core::{AnimalType, Category, ListingStatus};

    pub(crate) fn sample(title: &str) -> Listing {
        let now = Utc::now();
        Listing {
            id: ListingId::generate(),
            category: Category::Adoption,
            animal_type: AnimalType::Cat,
            title: title.to_string(),
            description: "Гэр бүл хайж байна".to_string(),
            breed: None,
            tags: vec!["vaccinated".to_string()],
            location_city: "Улаанбаатар".to_string(),
            location_district: Some("Хан-Уул".to_string()),
            price: None,
            contact_name: None,
            contact_phone: "99001122".to_string(),
            contact_email: None,
            photos: vec!["https://cdn.example.mn/cat.jpg".to_string()],
            status: ListingStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn listing_crud() {
        let store = MemoryStore::new();
        let mut listing = sample("Муур");

        // Create
        store.insert(&listing).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        // Read
        let retrieved = store.find_by_id(&listing.id).unwrap().unwrap();
        assert_eq!(retrieved, listing);

        // Update
        listing.title = "Муур үрчлүүлнэ".to_string();
        store.update(&listing).unwrap();
        let updated = store.find_by_id(&listing.id).unwrap().unwrap();
        assert_eq!(updated.title, "Муур үрчлүүлнэ");

        // Delete
        store.delete(&listing.id).unwrap();
        assert!(store.find_by_id(&listing.id).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn insert_duplicate_id_fails() {
        let store = MemoryStore::new();
        let listing = sample("first");
        store.insert(&listing).unwrap();

        let mut dup = sample("second");
        dup.id = listing.id;
        let result = store.insert(&dup);
        assert!(matches!(result, Err(StoreError::Conflict(id)) if id == listing.id));
        assert_eq!(store.find_by_id(&listing.id).unwrap().unwrap().title, "first");
    }

    #[test]
    fn update_and_delete_missing_fail() {
        let store = MemoryStore::new();
        let listing = sample("ghost");

        assert!(matches!(store.update(&listing), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&listing.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn find_all_keeps_insertion_order() {
        let listings: Vec<_> = ["a", "b", "c"].into_iter().map(sample).collect();
        let store = MemoryStore::with_listings(listings.clone()).unwrap();

        store.delete(&listings[1].id).unwrap();
        let titles: Vec<_> = store
            .find_all()
            .unwrap()
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, ["a", "c"]);
    }

    #[test]
    fn snapshot_is_detached_from_store() {
        let store = MemoryStore::with_listings([sample("a")]).unwrap();
        let snapshot = store.find_all().unwrap();

        store.insert(&sample("b")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.count().unwrap(), 2);
    }
}
