//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{project_pattern, CacheStats, MemoryCache};
use crate::error::{ApiError, Result};
use crate::models::{
    DeleteResponse, HealthResponse, InvalidateRequest, InvalidationResponse, KeyStatusResponse,
    MessageResponse, RemovedResponse,
};

/// Application state shared across all handlers.
///
/// Holds the process-wide cache shared with every cached client.
#[derive(Clone)]
pub struct AdminState {
    pub cache: Arc<MemoryCache>,
}

impl AdminState {
    pub fn new(cache: Arc<MemoryCache>) -> Self {
        Self { cache }
    }

    /// Creates a fresh cache from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Arc::new(MemoryCache::new(config.default_ttl, config.max_size)))
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AdminState>) -> Json<CacheStats> {
    Json(state.cache.get_stats().await)
}

/// Handler for POST /metrics/reset
pub async fn reset_metrics_handler(State(state): State<AdminState>) -> Json<MessageResponse> {
    state.cache.reset_metrics().await;
    info!("Cache metrics reset");
    Json(MessageResponse::new("Metrics reset"))
}

/// Handler for GET /cache/keys/:key
///
/// Reports liveness and remaining TTL without counting a hit or miss.
pub async fn key_status_handler(
    State(state): State<AdminState>,
    Path(key): Path<String>,
) -> Json<KeyStatusResponse> {
    let remaining = state.cache.ttl_remaining_ms(&key).await;
    Json(KeyStatusResponse::new(key, remaining))
}

/// Handler for DELETE /cache/keys/:key
pub async fn delete_key_handler(
    State(state): State<AdminState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.delete(&key).await;
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for POST /cache/invalidate
pub async fn invalidate_handler(
    State(state): State<AdminState>,
    Json(req): Json<InvalidateRequest>,
) -> Result<Json<InvalidationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let removed = state.cache.invalidate(&req.pattern).await;
    info!("Invalidated {} entries matching '{}'", removed, req.pattern);

    Ok(Json(InvalidationResponse::new(req.pattern, removed)))
}

/// Handler for DELETE /cache/projects/:project_id
pub async fn invalidate_project_handler(
    State(state): State<AdminState>,
    Path(project_id): Path<String>,
) -> Result<Json<InvalidationResponse>> {
    let project_id: u64 = project_id.parse().map_err(|_| {
        ApiError::InvalidRequest(format!("Invalid project id '{}'", project_id))
    })?;

    let pattern = project_pattern(project_id);
    let removed = state.cache.invalidate(&pattern).await;
    info!("Invalidated {} entries for project {}", removed, project_id);

    Ok(Json(InvalidationResponse::new(pattern, removed)))
}

/// Handler for DELETE /cache/endpoints/:kind
pub async fn invalidate_endpoint_handler(
    State(state): State<AdminState>,
    Path(kind): Path<String>,
) -> Result<Json<InvalidationResponse>> {
    validate_endpoint_kind(&kind)?;

    let removed = state.cache.invalidate(&kind).await;
    info!("Invalidated {} entries for endpoint kind {}", removed, kind);

    Ok(Json(InvalidationResponse::new(kind, removed)))
}

/// Handler for POST /cache/evict
pub async fn evict_expired_handler(State(state): State<AdminState>) -> Json<RemovedResponse> {
    let removed = state.cache.evict_expired().await;
    Json(RemovedResponse { removed })
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AdminState>) -> Json<RemovedResponse> {
    let removed = state.cache.clear().await;
    info!("Cleared {} cache entries", removed);
    Json(RemovedResponse { removed })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Endpoint kinds are snake_case identifiers such as `epic_filters`.
fn validate_endpoint_kind(kind: &str) -> Result<()> {
    let valid = !kind.is_empty()
        && kind
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(format!(
            "Invalid endpoint kind '{}'",
            kind
        )))
    }
}
