//! Refresh Helpers
//!
//! The read patterns dashboard screens build on top of the cache: fetch on a
//! miss, or serve what is cached and refresh it from the backend in the
//! background.
//!
//! Refreshes are neither cancelled nor timed out. Whichever write lands last
//! wins, including over a value previously updated with `sync`.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheHandle, Document};

impl CacheHandle {
    // == Get Or Fetch ==
    /// Returns the cached value, or awaits `fetch`, caches its result and
    /// returns it.
    ///
    /// A failed fetch is returned to the caller and leaves the cache untouched.
    pub async fn get_or_fetch<F>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> anyhow::Result<Document>
    where
        F: Future<Output = anyhow::Result<Document>>,
    {
        if let Some(cached) = self.get(key).await {
            return Ok(cached);
        }

        debug!(key, "cache miss, fetching");
        let fresh = fetch.await?;
        self.set(key, fresh.clone(), ttl).await;
        Ok(fresh)
    }

    // == Stale While Revalidate ==
    /// Returns whatever is cached right now and refreshes the key in the background.
    ///
    /// The spawned task awaits `fetch` and overwrites the entry with the
    /// result. If the fetch fails the stale value stays in place.
    pub async fn stale_while_revalidate<F>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetch: F,
    ) -> (Option<Document>, JoinHandle<()>)
    where
        F: Future<Output = anyhow::Result<Document>> + Send + 'static,
    {
        let cached = self.get(key).await;

        let handle = self.clone();
        let key = key.to_string();
        let previous = cached.clone();

        let refresh = tokio::spawn(async move {
            match fetch.await {
                Ok(fresh) => {
                    if previous.as_ref() != Some(&fresh) {
                        info!(key = %key, "background refresh changed cached value");
                    } else {
                        debug!(key = %key, "background refresh unchanged");
                    }
                    handle.set(key, fresh, ttl).await;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "background refresh failed, keeping stale value");
                }
            }
        });

        (cached, refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_or_fetch_miss_then_hit() {
        let handle = CacheHandle::default();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            let value = handle
                .get_or_fetch("ordersList", None, async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    anyhow::Ok(json!([{"id": "o1"}]))
                })
                .await
                .unwrap();
            assert_eq!(value, json!([{"id": "o1"}]));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_error_leaves_cache_empty() {
        let handle = CacheHandle::default();

        let result = handle
            .get_or_fetch("ordersList", None, async {
                Err::<Document, _>(anyhow!("backend unreachable"))
            })
            .await;

        assert!(result.is_err());
        assert!(!handle.has("ordersList").await);
    }

    #[tokio::test]
    async fn test_stale_while_revalidate_serves_then_overwrites() {
        let handle = CacheHandle::default();
        handle.set("customersList", json!(["stale"]), None).await;

        let (served, refresh) = handle
            .stale_while_revalidate("customersList", None, async {
                anyhow::Ok(json!(["fresh"]))
            })
            .await;

        assert_eq!(served, Some(json!(["stale"])));
        refresh.await.unwrap();
        assert_eq!(handle.get("customersList").await, Some(json!(["fresh"])));
    }

    #[tokio::test]
    async fn test_stale_while_revalidate_on_empty_cache() {
        let handle = CacheHandle::default();

        let (served, refresh) = handle
            .stale_while_revalidate("eventsList", None, async { anyhow::Ok(json!([])) })
            .await;

        assert!(served.is_none());
        refresh.await.unwrap();
        assert_eq!(handle.get("eventsList").await, Some(json!([])));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_value() {
        let handle = CacheHandle::default();
        handle.set("recipesList", json!(["mocha"]), None).await;

        let (_, refresh) = handle
            .stale_while_revalidate("recipesList", None, async {
                Err::<Document, _>(anyhow!("timeout"))
            })
            .await;
        refresh.await.unwrap();

        assert_eq!(handle.get("recipesList").await, Some(json!(["mocha"])));
    }

    #[tokio::test]
    async fn test_refresh_completing_after_sync_wins() {
        let handle = CacheHandle::default();
        handle.set("promotionsList", json!({"active": 1}), None).await;

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let (_, refresh) = handle
            .stale_while_revalidate("promotionsList", None, async move {
                rx.await.ok();
                anyhow::Ok(json!({"active": 5}))
            })
            .await;

        // Optimistic local update while the refresh is in flight
        assert!(handle.sync("promotionsList", |_| json!({"active": 2})).await);
        assert_eq!(handle.get("promotionsList").await, Some(json!({"active": 2})));

        tx.send(()).unwrap();
        refresh.await.unwrap();

        assert_eq!(handle.get("promotionsList").await, Some(json!({"active": 5})));
    }
}
