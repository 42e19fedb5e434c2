//! Cache Engine Module
//!
//! Thread-safe LRU cache: a [`CacheStore`] behind one exclusive lock, plus
//! the background sweep that shares it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::info;

use crate::cache::{CacheSnapshot, CacheStats, CacheStore, CachedValue};
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweep_task, SweepHandle};

/// Sweep interval used by [`LruCache::new`].
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

// == LRU Cache ==
/// Concurrency-safe LRU cache with per-entry TTL.
///
/// Every operation, and each sweep cycle, runs under the same mutex, so no
/// caller ever sees a half-applied write. Values handed out are clones.
///
/// Dropping the cache stops its sweep task; [`LruCache::shutdown`] does the
/// same and waits for the task to exit.
#[derive(Debug)]
pub struct LruCache<V> {
    store: Arc<Mutex<CacheStore<V>>>,
    sweeper: SweepHandle,
    capacity: usize,
    default_ttl: TimeDelta,
}

impl<V> LruCache<V>
where
    V: Clone + Send + 'static,
{
    // == Constructors ==
    /// Creates a cache and starts its sweep with [`DEFAULT_SWEEP_INTERVAL`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(capacity: usize, default_ttl: TimeDelta) -> Result<Self> {
        Self::with_sweep_interval(capacity, default_ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a cache whose sweep runs every `sweep_interval`.
    ///
    /// Capacity, default TTL and interval must all be positive.
    pub fn with_sweep_interval(
        capacity: usize,
        default_ttl: TimeDelta,
        sweep_interval: Duration,
    ) -> Result<Self> {
        if sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }

        let store = Arc::new(Mutex::new(CacheStore::new(capacity, default_ttl)?));
        let sweeper = spawn_sweep_task(Arc::clone(&store), sweep_interval);

        info!(
            "LRU cache initialized: capacity={}, default_ttl={}ms, sweep_interval={:?}",
            capacity,
            default_ttl.num_milliseconds(),
            sweep_interval
        );

        Ok(Self {
            store,
            sweeper,
            capacity,
            default_ttl,
        })
    }

    // == Put ==
    /// Stores `value` under `key` for `ttl`, or the default TTL when `ttl` is
    /// zero.
    ///
    /// Fails with [`CacheError::InvalidInput`] on an empty key or a negative
    /// TTL, leaving the cache untouched.
    pub async fn put(&self, key: impl Into<String>, value: V, ttl: TimeDelta) -> Result<()> {
        let mut store = self.store.lock().await;
        store.put(key.into(), value, ttl, Utc::now())
    }

    // == Get ==
    /// Returns the value for `key` and its expiry, or `None` when the key is
    /// absent or already expired.
    ///
    /// Reads do not count as use: recency is left as it was.
    pub async fn get(&self, key: &str) -> Option<CachedValue<V>> {
        let mut store = self.store.lock().await;
        store.get(key, Utc::now())
    }

    // == Evict ==
    /// Removes `key`, returning its value if it was present.
    pub async fn evict(&self, key: &str) -> Option<V> {
        let mut store = self.store.lock().await;
        store.evict(key)
    }

    // == Evict All ==
    /// Removes every entry.
    pub async fn evict_all(&self) {
        let mut store = self.store.lock().await;
        store.evict_all();
    }

    // == Get All ==
    /// Returns all unexpired entries, least recently used first.
    pub async fn get_all(&self) -> CacheSnapshot<V> {
        let store = self.store.lock().await;
        store.get_all(Utc::now())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.lock().await;
        store.stats()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    // == Configuration ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    // == Shutdown ==
    /// Stops the background sweep and waits for it to exit.
    ///
    /// The cache stays usable afterwards; expired entries are then only
    /// hidden from reads, never removed.
    pub async fn shutdown(&self) -> Result<()> {
        self.sweeper.stop().await?;
        info!("LRU cache sweep stopped");
        Ok(())
    }

    /// Returns true while the background sweep is alive.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_finished()
    }
}
