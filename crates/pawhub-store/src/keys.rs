//! Key encoding utilities for `RocksDB`.

use pawhub_core::ListingId;

/// Length of an encoded listing key.
pub const LISTING_KEY_LEN: usize = 16;

/// Create a listing key from a listing ID.
#[must_use]
pub fn listing_key(id: &ListingId) -> [u8; LISTING_KEY_LEN] {
    id.to_bytes()
}

/// Decode a listing ID from a key, if the key has the right length.
#[must_use]
pub fn listing_id_from_key(key: &[u8]) -> Option<ListingId> {
    let bytes: [u8; LISTING_KEY_LEN] = key.try_into().ok()?;
    Some(ListingId::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip() {
        let id = ListingId::generate();
        let key = listing_key(&id);
        assert_eq!(listing_id_from_key(&key), Some(id));
    }

    #[test]
    fn short_key_is_rejected() {
        assert_eq!(listing_id_from_key(&[1, 2, 3]), None);
    }
}
