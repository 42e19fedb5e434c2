//! Cache Store Module
//!
//! Unlocked policy core: a key map plus a recency list, with capacity and TTL
//! enforcement. Every operation takes the current time explicitly; the
//! locking wrapper in [`crate::cache::LruCache`] supplies the wall clock.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use crate::cache::{CacheEntry, CacheStats, EntryRef, RecencyList};
use crate::error::{CacheError, Result};

// == Read Results ==
/// A value returned by a lookup, copied out of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<V> {
    pub value: V,
    pub expires_at: DateTime<Utc>,
}

/// All live entries, least recently used first.
///
/// `keys[i]` belongs to `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot<V> {
    pub keys: Vec<String>,
    pub values: Vec<V>,
}

impl<V> CacheSnapshot<V> {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

// == Cache Store ==
/// Bounded LRU store with per-entry expiry.
///
/// Invariant: `items` and `order` always hold the same entries.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key to recency-list node
    items: HashMap<String, EntryRef>,
    /// Recency order, front = most recently written
    order: RecencyList<CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied when a write passes zero
    default_ttl: TimeDelta,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and default TTL.
    ///
    /// Both must be positive.
    pub fn new(capacity: usize, default_ttl: TimeDelta) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "cache capacity must be greater than zero".to_string(),
            ));
        }
        if default_ttl <= TimeDelta::zero() {
            return Err(CacheError::InvalidConfig(
                "default TTL must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            items: HashMap::with_capacity(capacity),
            order: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
        })
    }

    // == Put ==
    /// Writes `value` under `key`, expiring `ttl` after `now`.
    ///
    /// A zero `ttl` means the default TTL. Rewriting an existing key refreshes
    /// it and moves it to the front. A new key that pushes the store over
    /// capacity evicts the back entry, expired or not.
    pub fn put(&mut self, key: String, value: V, ttl: TimeDelta, now: DateTime<Utc>) -> Result<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidInput("key must not be empty".to_string()));
        }
        if ttl < TimeDelta::zero() {
            return Err(CacheError::InvalidInput(
                "ttl must not be negative".to_string(),
            ));
        }

        let ttl = if ttl.is_zero() { self.default_ttl } else { ttl };
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            CacheError::InvalidInput("ttl is out of range".to_string())
        })?;

        if let Some(&entry_ref) = self.items.get(&key) {
            if let Some(entry) = self.order.get_mut(entry_ref) {
                entry.refresh(value, expires_at);
            }
            self.order.move_to_front(entry_ref);
            return Ok(());
        }

        let entry_ref = self
            .order
            .push_front(CacheEntry::new(key.clone(), value, expires_at));
        self.items.insert(key, entry_ref);

        if self.order.len() > self.capacity {
            self.remove_oldest();
        }

        self.stats.set_total_entries(self.items.len());
        Ok(())
    }

    // == Get ==
    /// Looks up `key` without touching recency.
    ///
    /// An entry past its deadline reads as absent but is left for the sweep.
    pub fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<CachedValue<V>> {
        let found = self
            .items
            .get(key)
            .and_then(|&entry_ref| self.order.get(entry_ref))
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| CachedValue {
                value: entry.value.clone(),
                expires_at: entry.expires_at,
            });

        match found {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        found
    }

    // == Evict ==
    /// Removes `key` and returns its value, or `None` if it is absent.
    pub fn evict(&mut self, key: &str) -> Option<V> {
        let entry_ref = self.items.remove(key)?;
        let entry = self.order.remove(entry_ref);
        self.stats.set_total_entries(self.items.len());
        entry.map(|entry| entry.value)
    }

    // == Evict All ==
    /// Drops every entry.
    pub fn evict_all(&mut self) {
        self.items.clear();
        self.order.init();
        self.stats.set_total_entries(0);
    }

    // == Get All ==
    /// Returns every entry still live at `now`, least recently used first.
    ///
    /// Expired entries are skipped, not removed.
    pub fn get_all(&self, now: DateTime<Utc>) -> CacheSnapshot<V> {
        let (keys, values) = self
            .order
            .iter()
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .unzip();

        CacheSnapshot { keys, values }
    }

    // == Remove Expired ==
    /// Removes every entry expired at `now` and returns how many went.
    ///
    /// Scans the whole list: refreshed keys sit at the front with late
    /// deadlines while older neighbours may already be dead, so deadlines are
    /// not ordered along the list.
    pub fn remove_expired(&mut self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        let mut cursor = self.order.back();

        while let Some(entry_ref) = cursor {
            cursor = self.order.newer(entry_ref);

            let expired = self
                .order
                .get(entry_ref)
                .is_some_and(|entry| entry.is_expired_at(now));
            if expired {
                self.remove_entry(entry_ref);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.items.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.items.len());
        stats
    }

    // == Accessors ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    /// Keys from most to least recently used, expired ones included.
    #[cfg(test)]
    pub(crate) fn recency_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.order.iter().map(|entry| entry.key.clone()).collect();
        keys.reverse();
        keys
    }

    // == Internal Helpers ==
    fn remove_oldest(&mut self) {
        if let Some(entry_ref) = self.order.back() {
            self.remove_entry(entry_ref);
            self.stats.record_eviction();
        }
    }

    fn remove_entry(&mut self, entry_ref: EntryRef) {
        if let Some(entry) = self.order.remove(entry_ref) {
            self.items.remove(&entry.key);
        }
    }
}
