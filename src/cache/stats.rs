//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and expirations.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Stats Recorder ==
/// Lock-free counters updated by the store on every operation.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    writes: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Copies the counters into a serializable snapshot.
    pub(crate) fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            total_entries,
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of cache performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups served from the cache
    pub hits: u64,
    /// Number of lookups that found nothing servable (absent or expired)
    pub misses: u64,
    /// Number of entries removed because their TTL had elapsed
    pub expirations: u64,
    /// Number of set operations
    pub writes: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = StatsRecorder::default().snapshot(0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let recorder = StatsRecorder::default();
        recorder.record_hit();
        recorder.record_hit();
        recorder.record_hit();
        assert_eq!(recorder.snapshot(1).hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let recorder = StatsRecorder::default();
        recorder.record_hit();
        recorder.record_miss();
        assert_eq!(recorder.snapshot(1).hit_rate(), 0.5);
    }

    #[test]
    fn test_snapshot_copies_counters() {
        let recorder = StatsRecorder::default();
        recorder.record_write();
        recorder.record_write();
        recorder.record_expiration();
        recorder.record_miss();

        let stats = recorder.snapshot(42);
        assert_eq!(stats.writes, 2);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 42);
    }
}
