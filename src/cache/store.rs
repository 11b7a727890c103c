//! Cache Store Module
//!
//! Key/value storage with lazy expiry on read and an explicit sweep for the
//! background task.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// In-memory store mapping string keys to time-bounded entries.
///
/// Every operation is total: misses are reported as `None`/`false`, never as
/// errors. Methods ending in `_at` take the current instant explicitly; the
/// plain forms read `tokio::time::Instant::now()`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Read/expiry counters
    stats: CacheStats,
    /// TTL applied when `set` is called without one, None = never expire
    default_ttl: Option<Duration>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose entries never expire unless given a TTL.
    pub fn new() -> Self {
        Self::with_default_ttl(None)
    }

    /// Creates an empty store applying `default_ttl` to entries set without one.
    pub fn with_default_ttl(default_ttl: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// An expired entry found here is removed before reporting the miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        if self.remove_if_expired(key, now) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous entry for the key.
    ///
    /// `ttl` of None falls back to the store's default TTL.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.set_at(key, value, ttl, Instant::now())
    }

    pub fn set_at(
        &mut self,
        key: impl Into<String>,
        value: V,
        ttl: Option<Duration>,
        now: Instant,
    ) {
        let ttl = ttl.or(self.default_ttl);
        self.entries
            .insert(key.into(), CacheEntry::new_at(value, ttl, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Has ==
    /// Returns true if a valid entry exists. Uses the same expiry rule as `get`.
    pub fn has(&mut self, key: &str) -> bool {
        self.has_at(key, Instant::now())
    }

    pub fn has_at(&mut self, key: &str, now: Instant) -> bool {
        !self.remove_if_expired(key, now) && self.entries.contains_key(key)
    }

    // == Invalidate ==
    /// Removes an entry. Absent keys are a no-op.
    ///
    /// Returns whether something was removed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_invalidations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes one entry, or every entry when `key` is None.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self, key: Option<&str>) -> usize {
        match key {
            Some(key) => usize::from(self.invalidate(key)),
            None => {
                let count = self.entries.len();
                self.entries.clear();
                self.stats.record_invalidations(count);
                self.stats.set_total_entries(0);
                count
            }
        }
    }

    // == Sync ==
    /// Applies `update` to the cached value and resets its timestamp.
    ///
    /// Never creates an entry: returns false when the key is absent or expired.
    /// The entry's TTL is kept, counted from the new timestamp.
    pub fn sync<F>(&mut self, key: &str, update: F) -> bool
    where
        F: FnOnce(&V) -> V,
    {
        self.sync_at(key, update, Instant::now())
    }

    pub fn sync_at<F>(&mut self, key: &str, update: F, now: Instant) -> bool
    where
        F: FnOnce(&V) -> V,
    {
        if self.remove_if_expired(key, now) {
            return false;
        }

        match self.entries.get_mut(key) {
            Some(entry) => {
                let updated = update(&entry.value);
                entry.refresh_at(updated, now);
                true
            }
            None => false,
        }
    }

    // == Cleanup Expired ==
    /// Removes every expired entry. Returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Inspection ==
    /// Returns every stored key, including expired entries not yet swept.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the keys of entries that are still valid, sorted.
    pub fn live_keys(&self) -> Vec<String> {
        self.live_keys_at(Instant::now())
    }

    pub fn live_keys_at(&self, now: Instant) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Returns the remaining lifetime of a stored entry.
    ///
    /// Outer None means no entry; inner None means it never expires.
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        let now = Instant::now();
        self.entries
            .get(key)
            .map(|entry| entry.ttl_remaining_at(now))
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the entry for `key` if it has expired. Returns true if it did.
    fn remove_if_expired(&mut self, key: &str, now: Instant) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now));

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
        }
        expired
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
