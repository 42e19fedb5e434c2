//! Error types for the cache
//!
//! Absence of a key is never an error inside the engine; `NotFound` only
//! exists so the HTTP layer can report it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache engine and its HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Rejected write: empty key, negative TTL, or an expiry out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Non-positive capacity, TTL or sweep interval at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key absent or logically expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidConfig(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (CacheError::InvalidInput("bad".to_string()), StatusCode::BAD_REQUEST),
            (CacheError::NotFound("key".to_string()), StatusCode::NOT_FOUND),
            (
                CacheError::InvalidConfig("size".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CacheError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_display() {
        let err = CacheError::InvalidInput("ttl must not be negative".to_string());
        assert_eq!(err.to_string(), "Invalid input: ttl must not be negative");
    }
}
