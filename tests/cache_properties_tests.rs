//! Integration Tests for the Shared Cache Handle
//!
//! Drives the public handle on tokio's paused clock, so TTL windows are
//! checked at exact offsets.

use std::time::Duration;

use cafe_cache::{spawn_sweep_task, CacheHandle, CacheKey};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::time::{advance, sleep};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// == Expiry ==

#[tokio::test(start_paused = true)]
async fn test_value_readable_until_ttl_elapses() {
    let cache = CacheHandle::default();

    cache.set("a", json!({"x": 1}), Some(ms(100))).await;

    advance(ms(50)).await;
    assert_eq!(cache.get("a").await, Some(json!({"x": 1})));

    advance(ms(49)).await;
    assert!(cache.has("a").await);

    advance(ms(1)).await;
    assert!(!cache.has("a").await);
    assert_eq!(cache.get("a").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_scenario_read_at_150ms_misses() {
    let cache = CacheHandle::default();

    cache.set("a", json!({"x": 1}), Some(ms(100))).await;
    advance(ms(50)).await;
    assert_eq!(cache.get("a").await, Some(json!({"x": 1})));
    advance(ms(100)).await;
    assert_eq!(cache.get("a").await, None);
}

#[tokio::test(start_paused = true)]
async fn test_value_without_ttl_persists() {
    let cache = CacheHandle::default();

    cache.set("b", json!([1, 2, 3]), None).await;
    advance(Duration::from_secs(7 * 24 * 3600)).await;
    assert_eq!(cache.get("b").await, Some(json!([1, 2, 3])));

    cache.invalidate("b").await;
    assert_eq!(cache.get("b").await, None);
}

// == Invalidate / Clear ==

#[tokio::test]
async fn test_invalidate_absent_key_is_noop() {
    let cache = CacheHandle::default();
    cache.set("kept", json!(true), None).await;

    assert!(!cache.invalidate("missing").await);
    assert_eq!(cache.keys().await, vec!["kept".to_string()]);
}

#[tokio::test]
async fn test_clear_empties_everything() {
    let cache = CacheHandle::default();
    for key in ["productsList", "ordersList", "customer_1"] {
        cache.set(key, json!(key), None).await;
    }

    assert_eq!(cache.clear(None).await, 3);

    assert!(cache.is_empty().await);
    for key in ["productsList", "ordersList", "customer_1"] {
        assert_eq!(cache.get(key).await, None);
    }
}

// == Sync ==

#[tokio::test]
async fn test_sync_increments_value() {
    let cache = CacheHandle::default();
    let key: CacheKey<i64> = CacheKey::new("c");

    cache.set_typed(&key, &5, None).await;
    assert!(cache.sync_typed(&key, |v| v + 1).await);

    assert_eq!(cache.get_typed(&key).await, Some(6));
}

#[tokio::test]
async fn test_sync_on_absent_key_creates_nothing() {
    let cache = CacheHandle::default();

    assert!(!cache.sync("c", |v| v.clone()).await);
    assert!(cache.keys().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_sync_resets_timestamp() {
    let cache = CacheHandle::default();

    cache.set("k", json!(1), Some(ms(100))).await;
    advance(ms(80)).await;
    assert!(cache.sync("k", |_| json!(2)).await);

    // 150ms after set: outside the original window, inside the synced one
    advance(ms(70)).await;
    assert_eq!(cache.get("k").await, Some(json!(2)));

    advance(ms(30)).await;
    assert_eq!(cache.get("k").await, None);
}

// == Background sweep ==

#[tokio::test(start_paused = true)]
async fn test_sweep_drops_key_without_any_read() {
    let cache = CacheHandle::default();
    let sweep = spawn_sweep_task(cache.clone(), Duration::from_secs(60));

    cache.set("customer_42", json!({"name": "An"}), Some(ms(1000))).await;
    cache.set("productsList", json!([]), None).await;

    sleep(ms(1000) + Duration::from_secs(60) + ms(10)).await;

    let keys = cache.keys().await;
    assert!(!keys.contains(&"customer_42".to_string()));
    assert!(keys.contains(&"productsList".to_string()));
    assert_eq!(cache.stats().await.misses, 0);

    sweep.abort();
}

// == Typed keys ==

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    id: String,
    name: String,
    loyalty_points: u32,
}

#[tokio::test]
async fn test_typed_detail_and_list_keys() {
    let cache = CacheHandle::default();
    let list: CacheKey<Vec<Customer>> = CacheKey::new("customersList");
    let detail: CacheKey<Customer> = CacheKey::scoped("customer", "c1");

    let customer = Customer {
        id: "c1".to_string(),
        name: "Linh".to_string(),
        loyalty_points: 120,
    };

    cache.set_typed(&list, &vec![customer.clone()], None).await;
    cache.set_typed(&detail, &customer, None).await;

    assert_eq!(cache.get_typed(&detail).await, Some(customer.clone()));
    assert_eq!(cache.get_typed(&list).await, Some(vec![customer]));
    assert!(cache.has("customer_c1").await);
}
