//! Request DTOs for the cache admin API

use serde::Deserialize;

/// Request body for pattern invalidation (POST /cache/invalidate)
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// Substring matched against every cache key
    pub pattern: String,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        // An empty substring matches every key
        if self.pattern.trim().is_empty() {
            return Some("Pattern cannot be empty".to_string());
        }
        None
    }
}
