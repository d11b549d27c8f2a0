//! Monotonic creation timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Hands out strictly increasing timestamps.
///
/// Listings created through the create path get their `created_at` from this
/// clock, so creation order and `created_at` order always agree even when the
/// wall clock stalls or steps backwards.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    /// Create a new clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next timestamp based on the current wall-clock time.
    pub fn tick(&self) -> DateTime<Utc> {
        self.tick_from(Utc::now())
    }

    /// Return the next timestamp, given the wall-clock reading `now`.
    pub fn tick_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        // The stored value stays a valid lower bound even if poisoned.
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let next = match *last {
            Some(prev) if now <= prev => prev + Duration::microseconds(1),
            _ => now,
        };
        *last = Some(next);
        next
    }
}
