//! Cache Entry Module
//!
//! Defines a single cached value together with its storage time and optional TTL.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached value with the instant it was stored and an optional time-to-live.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was stored (or last synced)
    pub stored_at: Instant,
    /// How long the value stays valid, None = no expiration
    pub ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    /// Creates a new entry stamped with the given instant.
    pub fn new_at(value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against an explicit instant.
    ///
    /// An entry is valid while `now - stored_at < ttl`, so it is expired from
    /// the moment the full TTL has elapsed. Entries without a TTL never expire.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_duration_since(self.stored_at) >= ttl,
            None => false,
        }
    }

    // == Refresh ==
    /// Replaces the value and resets the storage timestamp. The TTL is kept.
    pub fn refresh_at(&mut self, value: V, now: Instant) {
        self.value = value;
        self.stored_at = now;
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining_at(&self, now: Instant) -> Option<Duration> {
        self.ttl.map(|ttl| {
            let age = now.saturating_duration_since(self.stored_at);
            ttl.saturating_sub(age)
        })
    }
}
