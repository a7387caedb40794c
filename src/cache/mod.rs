//! Cache Module
//!
//! In-memory TTL cache with capacity eviction, hit/miss metrics and
//! substring-based invalidation.

mod entry;
mod key;
mod memory;
mod metrics;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::{build_key, project_pattern, CacheKeyBuilder, CallParams};
pub use memory::MemoryCache;
pub use metrics::{CacheMetrics, MetricsSnapshot};
pub use stats::CacheStats;
pub use store::CacheStore;
