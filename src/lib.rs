//! LRU TTL Cache - An in-memory key/value cache with expiry
//!
//! Bounded LRU eviction, per-entry TTLs and a background sweep, served over
//! a small JSON HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::LruCache;
pub use config::Config;
