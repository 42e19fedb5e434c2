//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    evict_all_handler, evict_handler, get_all_handler, get_handler, health_handler,
    homepage_handler, put_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Homepage
/// - `POST /api/lru` - Store a value
/// - `GET /api/lru` - List all live entries
/// - `DELETE /api/lru` - Clear the cache
/// - `GET /api/lru/:key` - Retrieve a value by key
/// - `DELETE /api/lru/:key` - Remove a key
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests with their latency
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let lru = Router::new()
        .route(
            "/",
            post(put_handler)
                .get(get_all_handler)
                .delete(evict_all_handler),
        )
        .route("/:key", get(get_handler).delete(evict_handler));

    Router::new()
        .route("/", get(homepage_handler))
        .nest("/api/lru", lru)
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
