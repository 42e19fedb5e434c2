//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /api/lru` - Store a value under a key
//! - `GET /api/lru/:key` - Retrieve a value by key
//! - `GET /api/lru` - List all live entries
//! - `DELETE /api/lru/:key` - Remove a key
//! - `DELETE /api/lru` - Clear the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
