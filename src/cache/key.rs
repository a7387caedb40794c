//! Cache Key Module
//!
//! Deterministic cache keys built from an endpoint kind and call parameters.
//!
//! Keys look like `epic_filters:project_id=123:status=open`. Parameters are
//! sorted by name and `None` values are dropped, so equivalent calls always
//! land on the same entry and substring invalidation hits exactly the keys
//! it names.

use std::collections::BTreeMap;
use std::fmt::Display;

/// Named call parameters, ordered by name.
pub type CallParams = BTreeMap<String, Option<String>>;

// == Cache Key Builder ==
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    endpoint_kind: String,
    params: CallParams,
}

impl CacheKeyBuilder {
    pub fn new(endpoint_kind: impl Into<String>) -> Self {
        Self {
            endpoint_kind: endpoint_kind.into(),
            params: CallParams::new(),
        }
    }

    /// Starts from an existing parameter map.
    pub fn with_params(endpoint_kind: impl Into<String>, params: &CallParams) -> Self {
        Self {
            endpoint_kind: endpoint_kind.into(),
            params: params.clone(),
        }
    }

    pub fn endpoint_kind(&self) -> &str {
        &self.endpoint_kind
    }

    /// Adds a parameter. A repeated name replaces the earlier value.
    pub fn param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.insert(name.into(), Some(value.to_string()));
        self
    }

    /// Adds a parameter that is left out of the key when `None`.
    pub fn param_opt<T: Display>(mut self, name: impl Into<String>, value: Option<T>) -> Self {
        self.params.insert(name.into(), value.map(|v| v.to_string()));
        self
    }

    pub fn build(&self) -> String {
        build_key(&self.endpoint_kind, &self.params)
    }
}

/// Renders `kind` alone, or `kind:name=value:...` over the non-`None` params.
pub fn build_key(endpoint_kind: &str, params: &CallParams) -> String {
    let mut key = endpoint_kind.to_string();
    for (name, value) in params {
        if let Some(value) = value {
            key.push(':');
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
    }
    key
}

/// Substring matching every key built with this `project_id` parameter.
pub fn project_pattern(project_id: impl Display) -> String {
    format!("project_id={}", project_id)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_only() {
        assert_eq!(CacheKeyBuilder::new("project_modules").build(), "project_modules");
    }

    #[test]
    fn test_none_dropped() {
        let key = CacheKeyBuilder::new("epic_filters")
            .param("project_id", 123)
            .param_opt::<&str>("status", None)
            .build();

        assert_eq!(key, "epic_filters:project_id=123");
    }

    #[test]
    fn test_all_none_collapses_to_kind() {
        let key = CacheKeyBuilder::new("epic_filters")
            .param_opt::<u64>("project_id", None)
            .build();

        assert_eq!(key, "epic_filters");
    }

    #[test]
    fn test_param_order_irrelevant() {
        let a = CacheKeyBuilder::new("issue_filters")
            .param("project_id", 7)
            .param("assigned_to", 3)
            .build();
        let b = CacheKeyBuilder::new("issue_filters")
            .param("assigned_to", 3)
            .param("project_id", 7)
            .build();

        assert_eq!(a, b);
        assert_eq!(a, "issue_filters:assigned_to=3:project_id=7");
    }

    #[test]
    fn test_distinct_values_distinct_keys() {
        let a = CacheKeyBuilder::new("epic_filters").param("project_id", 123).build();
        let b = CacheKeyBuilder::new("epic_filters").param("project_id", 456).build();

        assert_ne!(a, b);
    }

    #[test]
    fn test_repeated_name_last_wins() {
        let key = CacheKeyBuilder::new("task_filters")
            .param("project_id", 1)
            .param("project_id", 2)
            .build();

        assert_eq!(key, "task_filters:project_id=2");
    }

    #[test]
    fn test_build_key_from_map() {
        let mut params = CallParams::new();
        params.insert("project_id".to_string(), Some("9".to_string()));
        params.insert("milestone".to_string(), None);

        assert_eq!(build_key("project_stats", &params), "project_stats:project_id=9");
    }

    #[test]
    fn test_with_params_matches_chained_params() {
        let mut params = CallParams::new();
        params.insert("project_id".to_string(), Some("3".to_string()));
        params.insert("status".to_string(), None);

        let from_map = CacheKeyBuilder::with_params("issue_filters", &params);
        let chained = CacheKeyBuilder::new("issue_filters").param("project_id", 3);

        assert_eq!(from_map.endpoint_kind(), "issue_filters");
        assert_eq!(from_map.build(), chained.build());
    }

    #[test]
    fn test_project_pattern() {
        let key = CacheKeyBuilder::new("epic_filters").param("project_id", 42).build();

        assert_eq!(project_pattern(42), "project_id=42");
        assert!(key.contains(&project_pattern(42)));
    }
}
