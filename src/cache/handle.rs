//! Shared Cache Handle
//!
//! The injectable service every dashboard screen talks to. One handle is
//! created at startup and cloned into each consumer; clones share the store.

use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, CacheStore};

/// Backend documents are cached as JSON.
pub type Document = Value;

// == Cache Handle ==
/// Cloneable handle to a shared `CacheStore<Document>`.
///
/// Each method takes the lock once, so every operation is atomic with respect
/// to the others. Reads take the write lock too, since they may drop an
/// expired entry and they update the hit/miss counters.
#[derive(Clone, Debug, Default)]
pub struct CacheHandle {
    store: Arc<RwLock<CacheStore<Document>>>,
}

impl CacheHandle {
    pub fn new(store: CacheStore<Document>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a handle over an empty store with the given default TTL.
    pub fn with_default_ttl(default_ttl: Option<Duration>) -> Self {
        Self::new(CacheStore::with_default_ttl(default_ttl))
    }

    // == Untyped operations ==
    pub async fn get(&self, key: &str) -> Option<Document> {
        let value = self.store.write().await.get(key);
        debug!(key, hit = value.is_some(), "cache get");
        value
    }

    pub async fn set(&self, key: impl Into<String>, value: Document, ttl: Option<Duration>) {
        let key = key.into();
        debug!(key = %key, ?ttl, "cache set");
        self.store.write().await.set(key, value, ttl);
    }

    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        let removed = self.store.write().await.invalidate(key);
        debug!(key, removed, "cache invalidate");
        removed
    }

    pub async fn clear(&self, key: Option<&str>) -> usize {
        let removed = self.store.write().await.clear(key);
        debug!(?key, removed, "cache clear");
        removed
    }

    pub async fn sync<F>(&self, key: &str, update: F) -> bool
    where
        F: FnOnce(&Document) -> Document,
    {
        let synced = self.store.write().await.sync(key, update);
        debug!(key, synced, "cache sync");
        synced
    }

    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Every stored key, including expired entries the sweep has not reached.
    pub async fn keys(&self) -> Vec<String> {
        self.store.read().await.keys()
    }

    pub async fn live_keys(&self) -> Vec<String> {
        self.store.read().await.live_keys()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Typed operations ==
    /// Reads a typed value. A stored value of the wrong shape counts as a miss.
    pub async fn get_typed<T: DeserializeOwned>(&self, key: &CacheKey<T>) -> Option<T> {
        let value = self.get(key.as_str()).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key = %key, error = %e, "cached value has unexpected shape");
                None
            }
        }
    }

    /// Stores a typed value. Values that cannot be represented as JSON are not cached.
    pub async fn set_typed<T: Serialize>(
        &self,
        key: &CacheKey<T>,
        value: &T,
        ttl: Option<Duration>,
    ) {
        match serde_json::to_value(value) {
            Ok(document) => self.set(key.as_str(), document, ttl).await,
            Err(e) => warn!(key = %key, error = %e, "value not cacheable"),
        }
    }

    /// Applies `update` to a typed value in place.
    ///
    /// Returns false, leaving the entry untouched, if the key is absent or the
    /// stored value does not decode as `T`.
    pub async fn sync_typed<T, F>(&self, key: &CacheKey<T>, update: F) -> bool
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(T) -> T,
    {
        let mut store = self.store.write().await;

        let current = match store.get(key.as_str()) {
            Some(value) => value,
            None => return false,
        };

        let updated = serde_json::from_value::<T>(current)
            .map(update)
            .and_then(serde_json::to_value);

        match updated {
            Ok(document) => store.sync(key.as_str(), move |_| document),
            Err(e) => {
                warn!(key = %key, error = %e, "sync skipped, cached value has unexpected shape");
                false
            }
        }
    }
}
