//! Cache Module
//!
//! In-memory caching with LRU eviction and TTL expiration.

mod engine;
mod entry;
mod list;
mod stats;
mod store;


// Re-export public types
pub use engine::{LruCache, DEFAULT_SWEEP_INTERVAL};
pub use entry::CacheEntry;
pub use list::{EntryRef, Iter, RecencyList};
pub use stats::CacheStats;
pub use store::{CacheSnapshot, CacheStore, CachedValue};

// == Public Constants ==
/// Maximum allowed key length in bytes accepted by the HTTP API
pub const MAX_KEY_LENGTH: usize = 256;
