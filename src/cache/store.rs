//! Cache Store Module
//!
//! Synchronous cache engine: entry map, TTL expiry, capacity eviction and
//! metrics. Callers provide mutual exclusion (see [`MemoryCache`]).
//!
//! [`MemoryCache`]: crate::cache::MemoryCache

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheMetrics, CacheStats};

/// Entry plus its first-insertion sequence, used to break expiry ties.
#[derive(Debug, Clone)]
struct Slot<V> {
    entry: CacheEntry<V>,
    order: u64,
}

// == Cache Store ==
/// Bounded TTL key-value storage with hit/miss/eviction/invalidation counters.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, Slot<V>>,
    /// Performance counters
    metrics: CacheMetrics,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
    /// Next insertion sequence number
    next_order: u64,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for entries stored without one
    /// * `max_size` - Maximum number of entries, at least 1
    pub fn new(default_ttl: u64, max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            metrics: CacheMetrics::new(),
            max_size: max_size.max(1),
            default_ttl,
            next_order: 0,
        }
    }

    // == Get ==
    /// Returns the value stored under `key` if it is still live.
    ///
    /// Records exactly one hit or miss. An expired entry is removed on the
    /// way out and additionally counted as an eviction.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = current_timestamp_ms();
        let live = self.entries.get(key).map(|slot| slot.entry.is_live_at(now));

        match live {
            Some(true) => {
                self.metrics.record_hit();
                self.entries.get(key).map(|slot| slot.entry.value.clone())
            }
            Some(false) => {
                self.entries.remove(key);
                self.metrics.record_evictions(1);
                self.metrics.record_miss();
                None
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl` seconds (default TTL if None).
    ///
    /// Inserting a new key into a full cache first sweeps expired entries,
    /// then, if still full, evicts the entry that expires soonest. Overwriting
    /// an existing key never evicts.
    pub fn set(&mut self, key: String, value: V, ttl: Option<u64>) {
        let ttl = ttl.unwrap_or(self.default_ttl);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_expired();
            if self.entries.len() >= self.max_size {
                self.evict_soonest();
            }
        }

        let entry = CacheEntry::new(value, ttl);
        match self.entries.get_mut(&key) {
            Some(slot) => slot.entry = entry,
            None => {
                let order = self.next_order;
                self.next_order += 1;
                self.entries.insert(key, Slot { entry, order });
            }
        }
    }

    /// Removes the entry with the smallest expiry; ties go to the oldest insert.
    fn evict_soonest(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| (slot.entry.expires_at, slot.order))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.metrics.record_evictions(1);
        }
    }

    // == Delete ==
    /// Removes `key`. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.metrics.record_invalidations(1);
        }
        removed
    }

    // == Invalidate ==
    /// Removes every key containing `pattern` as a plain substring.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        let removed = before - self.entries.len();

        self.metrics.record_invalidations(removed as u64);
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();

        self.metrics.record_invalidations(removed as u64);
        removed
    }

    // == Evict Expired ==
    /// Removes all entries whose expiry is at or before now.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries.retain(|_, slot| slot.entry.expires_at > now);
        let removed = before - self.entries.len();

        self.metrics.record_evictions(removed as u64);
        removed
    }

    // == Contains ==
    /// Checks whether `key` holds a live entry without touching metrics.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|slot| slot.entry.is_live())
    }

    /// Remaining lifetime of a live entry in milliseconds, without touching metrics.
    pub fn ttl_remaining_ms(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|slot| slot.entry.is_live())
            .map(|slot| slot.entry.ttl_remaining_ms())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // == Metrics ==
    /// Returns a copy of the current counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    // == Stats ==
    /// Returns the composite statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.len(), self.max_size, self.default_ttl, &self.metrics)
    }
}
