//! Cache Statistics Module
//!
//! Counters describing how well the cache is saving round-trips to the backend.

use serde::Serialize;

// == Cache Stats ==
/// Counters for reads, expirations and explicit invalidations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that found nothing valid (absent or expired)
    pub misses: u64,
    /// Entries dropped because their TTL elapsed, lazily or by the sweep
    pub expirations: u64,
    /// Entries removed through invalidate or clear
    pub invalidations: u64,
    /// Current number of stored entries
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
