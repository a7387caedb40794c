//! Memory Cache Module
//!
//! Async, concurrency-safe wrapper around [`CacheStore`]. A single mutex
//! guards the entry map and the metrics together, so every operation is
//! linearizable with respect to every other.

use serde_json::Value;
use tokio::sync::Mutex;

use crate::cache::{CacheMetrics, CacheStats, CacheStore};

// == Memory Cache ==
/// Shared TTL cache. Wrap in an `Arc` to share it between clients.
#[derive(Debug)]
pub struct MemoryCache<V = Value> {
    store: Mutex<CacheStore<V>>,
    /// Copies of the immutable configuration, readable without the lock
    default_ttl: u64,
    max_size: usize,
}

impl<V: Clone + Send> MemoryCache<V> {
    /// Creates a cache with the given default TTL (seconds) and entry ceiling.
    pub fn new(default_ttl: u64, max_size: usize) -> Self {
        let store = CacheStore::new(default_ttl, max_size);
        Self {
            default_ttl: store.default_ttl(),
            max_size: store.max_size(),
            store: Mutex::new(store),
        }
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.store.lock().await.get(key)
    }

    /// Stores a value; `ttl` of None uses the default TTL.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<u64>) {
        self.store.lock().await.set(key.into(), value, ttl);
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.lock().await.delete(key)
    }

    /// Removes every key containing `pattern`; returns the removed count.
    pub async fn invalidate(&self, pattern: &str) -> usize {
        self.store.lock().await.invalidate(pattern)
    }

    pub async fn clear(&self) -> usize {
        self.store.lock().await.clear()
    }

    pub async fn evict_expired(&self) -> usize {
        self.store.lock().await.evict_expired()
    }

    /// Liveness check that does not count as a hit or miss.
    pub async fn contains(&self, key: &str) -> bool {
        self.store.lock().await.contains(key)
    }

    /// Remaining lifetime of a live entry in milliseconds; no metric change.
    pub async fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.store.lock().await.ttl_remaining_ms(key)
    }

    pub async fn size(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn get_metrics(&self) -> CacheMetrics {
        self.store.lock().await.metrics()
    }

    pub async fn reset_metrics(&self) {
        self.store.lock().await.reset_metrics();
    }

    pub async fn get_stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    // == Reset ==
    /// Drops every entry and zeroes metrics in one step.
    ///
    /// Intended for isolating tests that share a process-wide cache.
    pub async fn reset(&self) {
        let mut store = self.store.lock().await;
        store.clear();
        store.reset_metrics();
    }
}
