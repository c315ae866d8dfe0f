//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A stored payload together with the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored payload
    pub payload: String,
    /// When the payload was written
    pub stored_at: DateTime<Utc>,
    /// Store-unique sequence number of the write that produced this entry
    pub generation: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped at `stored_at`.
    pub fn new(payload: String, stored_at: DateTime<Utc>, generation: u64) -> Self {
        Self {
            payload,
            stored_at,
            generation,
        }
    }

    // == Age ==
    /// Returns how long ago the entry was written, relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    // == Is Fresh ==
    /// Checks whether the entry is still servable.
    ///
    /// Boundary condition: an entry whose age is exactly `ttl` is still
    /// fresh; it expires once the age exceeds `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) <= ttl
    }

    // == Time To Live ==
    /// Returns remaining TTL in whole seconds, saturating at zero.
    pub fn ttl_remaining(&self, now: DateTime<Utc>, ttl: Duration) -> i64 {
        ttl.checked_sub(&self.age(now))
            .map_or(i64::MAX, |left| left.num_seconds().max(0))
    }
}
