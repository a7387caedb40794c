//! Cached Client
//!
//! Facade that serves cacheable Taiga calls from a [`MemoryCache`] and
//! delegates everything else to the wrapped client.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::{endpoint_ttl, kinds, TaigaApi};
use crate::cache::{
    project_pattern, CacheKeyBuilder, CacheMetrics, CacheStats, CallParams, MemoryCache,
};

// == Cached Client ==
/// Cache-aware wrapper around a [`TaigaApi`] implementation.
///
/// The wrapped client is shared, not owned. The cache is either private to
/// this facade or injected and shared with other facades.
pub struct CachedClient<C> {
    client: Arc<C>,
    cache: Arc<MemoryCache>,
}

impl<C> Clone for CachedClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<C: TaigaApi> CachedClient<C> {
    /// Wraps `client` with a private cache.
    pub fn new(client: Arc<C>, default_ttl: u64, max_size: usize) -> Self {
        Self::with_cache(client, Arc::new(MemoryCache::new(default_ttl, max_size)))
    }

    /// Wraps `client` with an existing, possibly shared, cache.
    pub fn with_cache(client: Arc<C>, cache: Arc<MemoryCache>) -> Self {
        Self { client, cache }
    }

    /// The wrapped client, for calls that should bypass the facade entirely.
    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &Arc<MemoryCache> {
        &self.cache
    }

    /// TTL for `endpoint_kind`, falling back to the cache default.
    pub fn get_ttl(&self, endpoint_kind: &str) -> u64 {
        endpoint_ttl(endpoint_kind).unwrap_or_else(|| self.cache.default_ttl())
    }

    // == Get Cached Or Fetch ==
    /// Returns the cached value for `(endpoint_kind, params)` or runs `fetch`.
    ///
    /// A successful fetch is stored under the kind's TTL. A failed fetch is
    /// returned as-is and leaves the cache untouched. The lock is not held
    /// while `fetch` runs, so concurrent misses on one key each fetch.
    pub async fn get_cached_or_fetch<F, Fut, E>(
        &self,
        endpoint_kind: &str,
        params: &CallParams,
        fetch: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        self.fetch_through(CacheKeyBuilder::with_params(endpoint_kind, params), fetch)
            .await
    }

    async fn fetch_through<F, Fut, E>(&self, key: CacheKeyBuilder, fetch: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        let ttl = self.get_ttl(key.endpoint_kind());
        let key = key.build();

        if let Some(value) = self.cache.get(&key).await {
            debug!("Cache hit: {}", key);
            return Ok(value);
        }

        debug!("Cache miss: {}", key);
        let value = fetch().await?;

        self.cache.set(key.clone(), value.clone(), Some(ttl)).await;
        debug!("Cached {} for {}s", key, ttl);

        Ok(value)
    }

    async fn cached_for_project<F, Fut>(
        &self,
        endpoint_kind: &str,
        project_id: u64,
        fetch: F,
    ) -> Result<Value, C::Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, C::Error>>,
    {
        let key = CacheKeyBuilder::new(endpoint_kind).param("project_id", project_id);
        self.fetch_through(key, fetch).await
    }

    // == Invalidation ==
    /// Drops every cached key carrying `project_id=<project_id>`.
    pub async fn invalidate_project_cache(&self, project_id: u64) -> usize {
        let removed = self.cache.invalidate(&project_pattern(project_id)).await;
        info!(
            "Invalidated {} cache entries for project {}",
            removed, project_id
        );
        removed
    }

    /// Drops every cached key of `endpoint_kind`.
    pub async fn invalidate_endpoint_type(&self, endpoint_kind: &str) -> usize {
        let removed = self.cache.invalidate(endpoint_kind).await;
        info!(
            "Invalidated {} cache entries for endpoint kind {}",
            removed, endpoint_kind
        );
        removed
    }

    pub async fn clear_cache(&self) -> usize {
        let removed = self.cache.clear().await;
        info!("Cleared {} cache entries", removed);
        removed
    }

    pub async fn get_metrics(&self) -> CacheMetrics {
        self.cache.get_metrics().await
    }

    pub async fn reset_metrics(&self) {
        self.cache.reset_metrics().await;
    }

    pub async fn get_stats(&self) -> CacheStats {
        self.cache.get_stats().await
    }
}

// == Taiga API Facade ==
#[async_trait]
impl<C: TaigaApi> TaigaApi for CachedClient<C> {
    type Error = C::Error;

    async fn get_epic_filters(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::EPIC_FILTERS, project_id, || {
            self.client.get_epic_filters(project_id)
        })
        .await
    }

    async fn get_issue_filters(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::ISSUE_FILTERS, project_id, || {
            self.client.get_issue_filters(project_id)
        })
        .await
    }

    async fn get_task_filters(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::TASK_FILTERS, project_id, || {
            self.client.get_task_filters(project_id)
        })
        .await
    }

    async fn get_userstory_filters(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::USERSTORY_FILTERS, project_id, || {
            self.client.get_userstory_filters(project_id)
        })
        .await
    }

    async fn list_epic_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::EPIC_CUSTOM_ATTRIBUTES, project_id, || {
            self.client.list_epic_custom_attributes(project_id)
        })
        .await
    }

    async fn list_issue_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::ISSUE_CUSTOM_ATTRIBUTES, project_id, || {
            self.client.list_issue_custom_attributes(project_id)
        })
        .await
    }

    async fn list_task_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::TASK_CUSTOM_ATTRIBUTES, project_id, || {
            self.client.list_task_custom_attributes(project_id)
        })
        .await
    }

    async fn list_userstory_custom_attributes(
        &self,
        project_id: u64,
    ) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::USERSTORY_CUSTOM_ATTRIBUTES, project_id, || {
            self.client.list_userstory_custom_attributes(project_id)
        })
        .await
    }

    async fn get_project_modules(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::PROJECT_MODULES, project_id, || {
            self.client.get_project_modules(project_id)
        })
        .await
    }

    async fn get_project_stats(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.cached_for_project(kinds::PROJECT_STATS, project_id, || {
            self.client.get_project_stats(project_id)
        })
        .await
    }

    async fn get_milestone_stats(&self, milestone_id: u64) -> Result<Value, Self::Error> {
        let key = CacheKeyBuilder::new(kinds::MILESTONE_STATS).param("milestone_id", milestone_id);
        self.fetch_through(key, || {
            self.client.get_milestone_stats(milestone_id)
        })
        .await
    }

    async fn get_project(&self, project_id: u64) -> Result<Value, Self::Error> {
        self.client.get_project(project_id).await
    }

    /// Updates the project, then drops everything cached for it.
    async fn update_project(&self, project_id: u64, patch: Value) -> Result<Value, Self::Error> {
        let updated = self.client.update_project(project_id, patch).await?;
        self.invalidate_project_cache(project_id).await;
        Ok(updated)
    }

    async fn invoke(&self, operation: &str, args: Value) -> Result<Value, Self::Error> {
        self.client.invoke(operation, args).await
    }
}
