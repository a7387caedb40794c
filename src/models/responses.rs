//! Response DTOs for the cache admin API

use serde::Serialize;

/// Response body for key lookups (GET /cache/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct KeyStatusResponse {
    pub key: String,
    /// Whether the key currently holds a live entry
    pub cached: bool,
    /// Milliseconds until the entry expires, absent when not cached
    pub ttl_remaining_ms: Option<u64>,
}

impl KeyStatusResponse {
    pub fn new(key: impl Into<String>, ttl_remaining_ms: Option<u64>) -> Self {
        Self {
            key: key.into(),
            cached: ttl_remaining_ms.is_some(),
            ttl_remaining_ms,
        }
    }
}

/// Response body for single-key deletion (DELETE /cache/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    /// Whether the key existed before the call
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        Self {
            key: key.into(),
            deleted,
        }
    }
}

/// Response body for pattern, project and endpoint-kind invalidation
#[derive(Debug, Clone, Serialize)]
pub struct InvalidationResponse {
    /// Substring that was matched against the keys
    pub pattern: String,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidationResponse {
    pub fn new(pattern: impl Into<String>, removed: usize) -> Self {
        Self {
            pattern: pattern.into(),
            removed,
        }
    }
}

/// Response body for bulk removals (DELETE /cache, POST /cache/evict)
#[derive(Debug, Clone, Serialize)]
pub struct RemovedResponse {
    pub removed: usize,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
