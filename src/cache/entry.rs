//! Cache Entry Module
//!
//! Defines a single cached value together with its absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached value and the moment it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl_seconds` from now.
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        let ttl_ms = ttl_seconds.saturating_mul(1000);
        Self::expiring_at(value, current_timestamp_ms().saturating_add(ttl_ms))
    }

    /// Creates an entry with an explicit expiry timestamp.
    pub fn expiring_at(value: V, expires_at: u64) -> Self {
        Self { value, expires_at }
    }

    // == Liveness ==
    /// An entry is live while `now <= expires_at`.
    ///
    /// Liveness is always recomputed against the clock; it is never stored.
    pub fn is_live_at(&self, now: u64) -> bool {
        now <= self.expires_at
    }

    /// Checks liveness against the current clock.
    pub fn is_live(&self) -> bool {
        self.is_live_at(current_timestamp_ms())
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        self.expires_at.saturating_sub(current_timestamp_ms())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
