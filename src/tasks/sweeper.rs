//! Expiry Sweep Task
//!
//! Background task that periodically evicts expired cache entries so stale
//! metadata does not sit in memory until the next lookup.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that calls [`MemoryCache::evict_expired`] every
/// `interval_secs` seconds.
///
/// The returned handle is aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(MemoryCache::new(3600, 1000));
/// let sweeper = spawn_eviction_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_eviction_task<V>(cache: Arc<MemoryCache<V>>, interval_secs: u64) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.evict_expired().await;
            if removed > 0 {
                info!("Expiry sweep: evicted {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
