//! Integration Tests for the Cached Client
//!
//! Drives the caching facade against an instrumented in-process Taiga client.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use taiga_cache::client::kinds;
use taiga_cache::{AdminState, CachedClient, MemoryCache, TaigaApi};
use thiserror::Error;

#[derive(Debug, Error)]
enum FakeTaigaError {
    #[error("upstream returned {0}")]
    Status(u16),
}

/// Counts every upstream call and optionally slows or fails them.
#[derive(Default)]
struct FakeTaiga {
    upstream_calls: AtomicUsize,
    fail: AtomicBool,
    latency_ms: u64,
}

impl FakeTaiga {
    fn slow(latency_ms: u64) -> Self {
        Self {
            latency_ms,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.upstream_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self, resource: &str, id: u64) -> Result<Value, FakeTaigaError> {
        self.upstream_calls.fetch_add(1, Ordering::SeqCst);
        if self.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.latency_ms)).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(FakeTaigaError::Status(503));
        }
        Ok(json!({ "resource": resource, "id": id }))
    }
}

#[async_trait]
impl TaigaApi for FakeTaiga {
    type Error = FakeTaigaError;

    async fn get_epic_filters(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("epic_filters", id).await
    }
    async fn get_issue_filters(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("issue_filters", id).await
    }
    async fn get_task_filters(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("task_filters", id).await
    }
    async fn get_userstory_filters(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("userstory_filters", id).await
    }
    async fn list_epic_custom_attributes(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("epic_custom_attributes", id).await
    }
    async fn list_issue_custom_attributes(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("issue_custom_attributes", id).await
    }
    async fn list_task_custom_attributes(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("task_custom_attributes", id).await
    }
    async fn list_userstory_custom_attributes(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("userstory_custom_attributes", id).await
    }
    async fn get_project_modules(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("project_modules", id).await
    }
    async fn get_project_stats(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("project_stats", id).await
    }
    async fn get_milestone_stats(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("milestone_stats", id).await
    }
    async fn get_project(&self, id: u64) -> Result<Value, Self::Error> {
        self.respond("project", id).await
    }
    async fn update_project(&self, id: u64, _patch: Value) -> Result<Value, Self::Error> {
        self.respond("project", id).await
    }
    async fn invoke(&self, operation: &str, _args: Value) -> Result<Value, Self::Error> {
        self.respond(operation, 0).await
    }
}

/// Any `TaigaApi` works here, including the facade itself.
async fn load_issue_metadata<T: TaigaApi>(api: &T, project_id: u64) -> Result<Value, T::Error> {
    let filters = api.get_issue_filters(project_id).await?;
    let attributes = api.list_issue_custom_attributes(project_id).await?;
    Ok(json!({ "filters": filters, "attributes": attributes }))
}

#[tokio::test]
async fn test_epic_filters_fetched_once_per_project() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 3600, 100);

    client.get_epic_filters(123).await.unwrap();
    client.get_epic_filters(123).await.unwrap();
    assert_eq!(taiga.calls(), 1);

    client.get_epic_filters(456).await.unwrap();
    assert_eq!(taiga.calls(), 2);
}

#[tokio::test]
async fn test_facade_is_drop_in_client() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 3600, 100);

    let direct = load_issue_metadata(taiga.as_ref(), 8).await.unwrap();
    let first = load_issue_metadata(&client, 8).await.unwrap();
    let second = load_issue_metadata(&client, 8).await.unwrap();

    assert_eq!(direct, first);
    assert_eq!(first, second);
    // Two direct calls plus two misses through the facade
    assert_eq!(taiga.calls(), 4);
}

#[tokio::test]
async fn test_failure_propagates_and_is_not_cached() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 3600, 100);
    taiga.fail.store(true, Ordering::SeqCst);

    let err = client.get_project_stats(5).await.unwrap_err();
    assert!(matches!(err, FakeTaigaError::Status(503)));

    taiga.fail.store(false, Ordering::SeqCst);
    client.get_project_stats(5).await.unwrap();
    client.get_project_stats(5).await.unwrap();

    assert_eq!(taiga.calls(), 2);
}

#[tokio::test]
async fn test_concurrent_misses_each_fetch() {
    let taiga = Arc::new(FakeTaiga::slow(50));
    let client = CachedClient::new(taiga.clone(), 3600, 100);

    let (a, b) = tokio::join!(client.get_task_filters(1), client.get_task_filters(1));

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(taiga.calls(), 2);
    assert_eq!(client.cache().size().await, 1);

    client.get_task_filters(1).await.unwrap();
    assert_eq!(taiga.calls(), 2);
}

#[tokio::test]
async fn test_entries_expire_with_kind_ttl_unless_listed() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 1, 100);

    // Unlisted kind: falls back to the one-second default
    let params = Default::default();
    let fetch = || async { Ok::<_, FakeTaigaError>(json!(["wiki"])) };
    client.get_cached_or_fetch("wiki_links", &params, fetch).await.unwrap();

    // Listed kind: keeps its own long TTL
    client.get_project_modules(3).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(!client.cache().contains("wiki_links").await);
    assert!(client.cache().contains("project_modules:project_id=3").await);
}

#[tokio::test]
async fn test_shared_cache_with_admin_invalidation() {
    let cache = Arc::new(MemoryCache::new(3600, 100));
    let taiga = Arc::new(FakeTaiga::default());
    let issues = CachedClient::with_cache(taiga.clone(), cache.clone());
    let epics = CachedClient::with_cache(taiga.clone(), cache.clone());
    let admin = AdminState::new(cache.clone());

    issues.get_issue_filters(10).await.unwrap();
    epics.get_epic_filters(10).await.unwrap();
    epics.get_epic_filters(11).await.unwrap();
    assert_eq!(admin.cache.size().await, 3);

    assert_eq!(issues.invalidate_project_cache(10).await, 2);
    assert_eq!(epics.invalidate_endpoint_type(kinds::EPIC_FILTERS).await, 1);
    assert_eq!(cache.size().await, 0);

    let stats = admin.cache.get_stats().await;
    assert_eq!(stats.metrics.invalidations, 3);
    assert_eq!(stats.metrics.misses, 3);

    cache.reset().await;
    assert_eq!(epics.get_stats().await.metrics.invalidations, 0);
}

#[tokio::test]
async fn test_update_project_refreshes_metadata() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 3600, 100);

    client.get_userstory_filters(2).await.unwrap();
    client.update_project(2, json!({"is_backlog_activated": false})).await.unwrap();
    client.get_userstory_filters(2).await.unwrap();

    // filters, update, filters again
    assert_eq!(taiga.calls(), 3);
}

#[tokio::test]
async fn test_capacity_respected_through_facade() {
    let taiga = Arc::new(FakeTaiga::default());
    let client = CachedClient::new(taiga.clone(), 3600, 2);

    client.list_epic_custom_attributes(1).await.unwrap();
    client.list_epic_custom_attributes(2).await.unwrap();
    client.list_epic_custom_attributes(3).await.unwrap();

    let stats = client.get_stats().await;
    assert_eq!(stats.size, 2);
    assert_eq!(stats.metrics.evictions, 1);
    assert!(!client.cache().contains("epic_custom_attributes:project_id=1").await);
}
