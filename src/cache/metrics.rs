//! Cache Metrics Module
//!
//! Tracks hit, miss, eviction and invalidation counters for one cache.

use serde::Serialize;

// == Cache Metrics ==
/// Process-local counters scoped to a single cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries removed because they expired or the cache was full
    pub evictions: u64,
    /// Entries removed on request (delete, invalidate, clear)
    pub invalidations: u64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new CacheMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookups, `hits + misses`.
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }

    // == Rates ==
    /// Returns hits / total_requests, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Returns misses / total_requests, or 0.0 if no requests have been made.
    pub fn miss_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    pub fn record_invalidations(&mut self, count: u64) {
        self.invalidations += count;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Metrics Snapshot ==
/// Serializable view of [`CacheMetrics`] including the derived values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_requests: u64,
    pub hit_rate: f64,
    pub miss_rate: f64,
}

impl From<&CacheMetrics> for MetricsSnapshot {
    fn from(metrics: &CacheMetrics) -> Self {
        Self {
            hits: metrics.hits,
            misses: metrics.misses,
            evictions: metrics.evictions,
            invalidations: metrics.invalidations,
            total_requests: metrics.total_requests(),
            hit_rate: metrics.hit_rate(),
            miss_rate: metrics.miss_rate(),
        }
    }
}
