//! Cache Statistics Module
//!
//! Composite snapshot of cache configuration, occupancy and metrics.

use serde::Serialize;

use crate::cache::{CacheMetrics, MetricsSnapshot};

// == Cache Stats ==
/// Point-in-time view of a cache, shaped for admin and observability endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Current number of entries
    pub size: usize,
    /// Entry count ceiling
    pub max_size: usize,
    /// TTL in seconds applied when no explicit TTL is given
    pub default_ttl: u64,
    /// Counter snapshot
    pub metrics: MetricsSnapshot,
}

impl CacheStats {
    pub fn new(size: usize, max_size: usize, default_ttl: u64, metrics: &CacheMetrics) -> Self {
        Self {
            size,
            max_size,
            default_ttl,
            metrics: MetricsSnapshot::from(metrics),
        }
    }
}
