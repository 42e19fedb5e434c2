//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::TimeDelta;
use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the PUT operation (POST /api/lru)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value; stored as-is
/// - `ttl_seconds`: TTL in seconds; missing or zero means the default TTL
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// TTL in seconds
    #[serde(default)]
    pub ttl_seconds: i64,
}

impl PutRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl_seconds < 0 {
            return Some("ttl_seconds cannot be negative".to_string());
        }
        None
    }

    /// The requested TTL, or `None` if it cannot be represented.
    pub fn ttl(&self) -> Option<TimeDelta> {
        TimeDelta::try_seconds(self.ttl_seconds)
    }
}
