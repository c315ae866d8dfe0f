//! Cache Store Module
//!
//! Concurrent key/value store with store-wide TTL expiry checked on read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Duration;
use dashmap::DashMap;
use tracing::{debug, info};

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Cache Store ==
/// TTL cache shared by every request handler.
///
/// The store synchronizes internally; callers share it behind an `Arc` and
/// never lock. There is no capacity bound and no background sweeper:
/// expired entries are dropped lazily by the read that finds them.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage, sharded by `DashMap`
    entries: DashMap<String, CacheEntry>,
    /// Performance statistics
    stats: StatsRecorder,
    /// Source of write generations
    next_generation: AtomicU64,
    /// How long an entry stays servable
    ttl: Duration,
    ttl_seconds: u64,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store whose entries live for `ttl_seconds` of wall-clock time.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_clock(ttl_seconds, Arc::new(SystemClock))
    }

    /// Creates a store that reads time from `clock`.
    pub fn with_clock(ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);

        Self {
            entries: DashMap::new(),
            stats: StatsRecorder::default(),
            next_generation: AtomicU64::new(0),
            ttl,
            ttl_seconds,
            clock,
        }
    }

    // == Try Get ==
    /// Returns a copy of the payload stored under `key` if it is still fresh.
    ///
    /// An expired entry is removed as a side effect. Removal only succeeds
    /// while the map still holds that exact write, so an entry replaced by a
    /// concurrent `set` in between survives.
    pub fn try_get(&self, key: &str) -> Option<String> {
        let now = self.clock.now();

        let expired_generation = match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                self.stats.record_hit();
                debug!(
                    key,
                    ttl_remaining = entry.ttl_remaining(now, self.ttl),
                    "Cache hit"
                );
                return Some(entry.payload.clone());
            }
            Some(entry) => entry.generation,
            None => {
                self.stats.record_miss();
                debug!(key, "Cache miss");
                return None;
            }
        };

        if self
            .entries
            .remove_if(key, |_, entry| entry.generation == expired_generation)
            .is_some()
        {
            self.stats.record_expiration();
            info!(key, "Cache entry expired");
        }
        self.stats.record_miss();
        debug!(key, "Cache miss");
        None
    }

    // == Set ==
    /// Stores `payload` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, payload: impl Into<String>) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = CacheEntry::new(payload.into(), self.clock.now(), generation);
        self.entries.insert(key.into(), entry);
        self.stats.record_write();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Returns the configured TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
