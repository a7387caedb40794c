//! API Routes
//!
//! Configures the Axum router with all cache admin endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_key_handler, evict_expired_handler, health_handler,
    invalidate_endpoint_handler, invalidate_handler, invalidate_project_handler,
    key_status_handler, reset_metrics_handler, stats_handler, AdminState,
};

/// Creates the admin router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AdminState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/metrics/reset", post(reset_metrics_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/evict", post(evict_expired_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .route(
            "/cache/keys/:key",
            get(key_status_handler).delete(delete_key_handler),
        )
        .route("/cache/projects/:project_id", delete(invalidate_project_handler))
        .route("/cache/endpoints/:kind", delete(invalidate_endpoint_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
