//! Integration Tests for the cache engine
//!
//! Exercises `LruCache` through its public API with real wall-clock time.

use std::time::Duration;

use chrono::TimeDelta;
use lru_ttl_cache::cache::LruCache;
use lru_ttl_cache::error::CacheError;

#[tokio::test]
async fn test_capacity_evicts_least_recent() {
    let cache = LruCache::new(2, TimeDelta::seconds(10)).unwrap();

    cache.put("a", 1, TimeDelta::zero()).await.unwrap();
    cache.put("b", 2, TimeDelta::zero()).await.unwrap();
    cache.put("c", 3, TimeDelta::zero()).await.unwrap();

    assert!(cache.get("a").await.is_none());

    let snapshot = cache.get_all().await;
    assert_eq!(snapshot.keys, vec!["b", "c"]);
    assert_eq!(snapshot.values, vec![2, 3]);
    assert_eq!(cache.stats().await.evictions, 1);
}

#[tokio::test]
async fn test_put_existing_key_refreshes_recency() {
    let cache = LruCache::new(2, TimeDelta::seconds(10)).unwrap();

    cache.put("a", 1, TimeDelta::zero()).await.unwrap();
    cache.put("b", 2, TimeDelta::zero()).await.unwrap();
    cache.put("a", 10, TimeDelta::zero()).await.unwrap();
    cache.put("c", 3, TimeDelta::zero()).await.unwrap();

    // "b" became the least recent once "a" was rewritten
    assert!(cache.get("b").await.is_none());
    assert_eq!(cache.get("a").await.unwrap().value, 10);
}

#[tokio::test]
async fn test_get_does_not_refresh_recency() {
    let cache = LruCache::new(2, TimeDelta::seconds(10)).unwrap();

    cache.put("a", 1, TimeDelta::zero()).await.unwrap();
    cache.put("b", 2, TimeDelta::zero()).await.unwrap();
    assert!(cache.get("a").await.is_some());
    cache.put("c", 3, TimeDelta::zero()).await.unwrap();

    assert!(cache.get("a").await.is_none());
    assert!(cache.get("b").await.is_some());
}

#[tokio::test]
async fn test_default_ttl_expiry() {
    let cache = LruCache::new(10, TimeDelta::milliseconds(1)).unwrap();

    cache.put("x", "v".to_string(), TimeDelta::zero()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(cache.get("x").await.is_none());
    assert!(cache.get_all().await.is_empty());
    assert_eq!(cache.stats().await.misses, 1);
}

#[tokio::test]
async fn test_explicit_ttl_overrides_default() {
    let cache = LruCache::new(10, TimeDelta::milliseconds(1)).unwrap();

    cache.put("long", 1, TimeDelta::seconds(60)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let hit = cache.get("long").await.unwrap();
    assert_eq!(hit.value, 1);
    assert!(hit.expires_at > chrono::Utc::now());
}

#[tokio::test]
async fn test_negative_ttl_leaves_state_unchanged() {
    let cache = LruCache::new(10, TimeDelta::seconds(10)).unwrap();
    cache.put("keep", 1, TimeDelta::zero()).await.unwrap();

    let result = cache.put("keep", 2, TimeDelta::seconds(-1)).await;

    assert!(matches!(result, Err(CacheError::InvalidInput(_))));
    assert_eq!(cache.get("keep").await.unwrap().value, 1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_evict_and_evict_all() {
    let cache = LruCache::new(10, TimeDelta::seconds(10)).unwrap();

    cache.put("a", 1, TimeDelta::zero()).await.unwrap();
    cache.put("b", 2, TimeDelta::zero()).await.unwrap();

    assert_eq!(cache.evict("a").await, Some(1));
    assert_eq!(cache.evict("a").await, None);

    cache.evict_all().await;
    assert!(cache.get_all().await.is_empty());
    assert!(cache.is_empty().await);

    // Usable again after a clear
    cache.put("c", 3, TimeDelta::zero()).await.unwrap();
    assert_eq!(cache.get("c").await.unwrap().value, 3);
}

#[tokio::test]
async fn test_sweep_removes_expired_entries() {
    let cache =
        LruCache::with_sweep_interval(10, TimeDelta::seconds(60), Duration::from_millis(20))
            .unwrap();

    cache.put("short", 1, TimeDelta::milliseconds(5)).await.unwrap();
    cache.put("long", 2, TimeDelta::zero()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.stats().await.expirations, 1);
    assert!(cache.get("long").await.is_some());

    cache.shutdown().await.unwrap();
    assert!(!cache.is_sweeping());
}

#[tokio::test]
async fn test_expired_entries_stay_until_swept_after_shutdown() {
    let cache =
        LruCache::with_sweep_interval(10, TimeDelta::seconds(60), Duration::from_millis(20))
            .unwrap();
    cache.shutdown().await.unwrap();

    cache.put("short", 1, TimeDelta::milliseconds(1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(60)).await;

    // Hidden from reads, but still physically stored
    assert!(cache.get("short").await.is_none());
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_shutdown_is_idempotent() {
    let cache = LruCache::<i32>::new(10, TimeDelta::seconds(10)).unwrap();

    cache.shutdown().await.unwrap();
    cache.shutdown().await.unwrap();

    assert!(!cache.is_sweeping());
}
