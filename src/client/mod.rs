//! Client Module
//!
//! The remote Taiga client contract and the cache-aware facade over it.
//!
//! # Cacheable endpoint kinds
//! - Filters (`epic_filters`, `issue_filters`, ...) - 30 minutes
//! - Custom attribute definitions and project modules - 60 minutes
//! - Project and milestone stats - 10 minutes
//!
//! Anything else is delegated to the wrapped client without caching.

mod cached;

use async_trait::async_trait;
use serde_json::Value;

pub use cached::CachedClient;

// == Endpoint Kinds ==
pub mod kinds {
    pub const EPIC_FILTERS: &str = "epic_filters";
    pub const ISSUE_FILTERS: &str = "issue_filters";
    pub const TASK_FILTERS: &str = "task_filters";
    pub const USERSTORY_FILTERS: &str = "userstory_filters";
    pub const EPIC_CUSTOM_ATTRIBUTES: &str = "epic_custom_attributes";
    pub const ISSUE_CUSTOM_ATTRIBUTES: &str = "issue_custom_attributes";
    pub const TASK_CUSTOM_ATTRIBUTES: &str = "task_custom_attributes";
    pub const USERSTORY_CUSTOM_ATTRIBUTES: &str = "userstory_custom_attributes";
    pub const PROJECT_MODULES: &str = "project_modules";
    pub const PROJECT_STATS: &str = "project_stats";
    pub const MILESTONE_STATS: &str = "milestone_stats";
}

/// TTL in seconds for every cacheable endpoint kind.
pub const ENDPOINT_TTLS: &[(&str, u64)] = &[
    (kinds::EPIC_FILTERS, 1800),
    (kinds::ISSUE_FILTERS, 1800),
    (kinds::TASK_FILTERS, 1800),
    (kinds::USERSTORY_FILTERS, 1800),
    (kinds::EPIC_CUSTOM_ATTRIBUTES, 3600),
    (kinds::ISSUE_CUSTOM_ATTRIBUTES, 3600),
    (kinds::TASK_CUSTOM_ATTRIBUTES, 3600),
    (kinds::USERSTORY_CUSTOM_ATTRIBUTES, 3600),
    (kinds::PROJECT_MODULES, 3600),
    (kinds::PROJECT_STATS, 600),
    (kinds::MILESTONE_STATS, 600),
];

/// Looks up the configured TTL for `endpoint_kind`, if it is cacheable.
pub fn endpoint_ttl(endpoint_kind: &str) -> Option<u64> {
    ENDPOINT_TTLS
        .iter()
        .find(|(kind, _)| *kind == endpoint_kind)
        .map(|(_, ttl)| *ttl)
}

// == Taiga API ==
/// Remote calls against a Taiga instance.
///
/// Every call returns the decoded JSON payload. Implementations own their
/// error taxonomy; [`CachedClient`] passes errors through untouched.
#[async_trait]
pub trait TaigaApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get_epic_filters(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn get_issue_filters(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn get_task_filters(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn get_userstory_filters(&self, project_id: u64) -> Result<Value, Self::Error>;

    async fn list_epic_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn list_issue_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn list_task_custom_attributes(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn list_userstory_custom_attributes(
        &self,
        project_id: u64,
    ) -> Result<Value, Self::Error>;

    async fn get_project_modules(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn get_project_stats(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn get_milestone_stats(&self, milestone_id: u64) -> Result<Value, Self::Error>;

    async fn get_project(&self, project_id: u64) -> Result<Value, Self::Error>;
    async fn update_project(&self, project_id: u64, patch: Value) -> Result<Value, Self::Error>;

    /// Escape hatch for operations without a dedicated method.
    async fn invoke(&self, operation: &str, args: Value) -> Result<Value, Self::Error>;
}
