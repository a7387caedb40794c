//! API Module
//!
//! HTTP admin surface over the shared cache.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `GET /stats` - Size, configuration and metrics snapshot
//! - `POST /metrics/reset` - Zero the metrics
//! - `GET /cache/keys/:key` - Check whether a key is live
//! - `DELETE /cache/keys/:key` - Delete one key
//! - `POST /cache/invalidate` - Invalidate by substring
//! - `DELETE /cache/projects/:project_id` - Invalidate a project
//! - `DELETE /cache/endpoints/:kind` - Invalidate an endpoint kind
//! - `POST /cache/evict` - Sweep expired entries
//! - `DELETE /cache` - Clear everything

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
