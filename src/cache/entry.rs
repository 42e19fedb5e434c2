//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A single cached item as stored in the recency list.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is indexed under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Absolute expiration time
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: String, value: V, expires_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches
    /// `expires_at`, so a TTL that has fully elapsed is never served.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    // == Refresh ==
    /// Replaces the value and pushes the expiration out to `expires_at`.
    pub fn refresh(&mut self, value: V, expires_at: DateTime<Utc>) {
        self.value = value;
        self.expires_at = expires_at;
    }
}
