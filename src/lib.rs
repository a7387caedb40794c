//! Taiga Cache - TTL metadata cache for the Taiga API
//!
//! Provides a bounded in-memory TTL cache with hit/miss metrics and
//! substring invalidation, a caching facade over any [`TaigaApi`] client,
//! and an HTTP admin surface for stats and invalidation.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AdminState;
pub use cache::{CacheKeyBuilder, MemoryCache};
pub use client::{CachedClient, TaigaApi};
pub use config::Config;
pub use tasks::spawn_eviction_task;
