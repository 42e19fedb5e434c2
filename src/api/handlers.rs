//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::LruCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{GetAllResponse, GetResponse, HealthResponse, PutRequest, StatsResponse};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers only need a shared reference.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache engine
    pub cache: Arc<LruCache<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: LruCache<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache's background sweep, so this must run inside a tokio
    /// runtime.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let default_ttl = config.default_ttl_delta()?;
        let cache =
            LruCache::with_sweep_interval(config.cache_size, default_ttl, config.sweep_interval)?;
        Ok(Self::new(cache))
    }
}

/// Handler for GET /
pub async fn homepage_handler() -> &'static str {
    "cache service homepage!"
}

/// Handler for POST /api/lru
///
/// Stores a value under a key with an optional TTL. Responds 201 on success.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<StatusCode> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidInput(error_msg));
    }
    let ttl = req
        .ttl()
        .ok_or_else(|| CacheError::InvalidInput("ttl_seconds is out of range".to_string()))?;

    debug!("put key={} ttl_seconds={}", req.key, req.ttl_seconds);
    state.cache.put(req.key, req.value, ttl).await?;

    Ok(StatusCode::CREATED)
}

/// Handler for GET /api/lru/:key
///
/// Returns the value and its expiry, or 404 if absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let hit = state
        .cache
        .get(&key)
        .await
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::from_hit(key, hit)))
}

/// Handler for GET /api/lru
///
/// Returns all live entries, or 204 when there are none.
pub async fn get_all_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.cache.get_all().await;

    if snapshot.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    debug!("get_all returned {} entries", snapshot.len());
    Json(GetAllResponse::from(snapshot)).into_response()
}

/// Handler for DELETE /api/lru/:key
///
/// Removes a key. Responds 204, or 404 if the key was absent.
pub async fn evict_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    match state.cache.evict(&key).await {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /api/lru
///
/// Clears the cache.
pub async fn evict_all_handler(State(state): State<AppState>) -> StatusCode {
    state.cache.evict_all().await;
    debug!("cache cleared");
    StatusCode::NO_CONTENT
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
