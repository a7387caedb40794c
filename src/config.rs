//! Configuration Module
//!
//! Loads cache and admin server settings from environment variables.

use std::env;

/// Cache and admin server configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries without an endpoint-specific TTL
    pub default_ttl: u64,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Admin HTTP server port
    pub admin_port: u16,
    /// Expired-entry sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 1000)
    /// - `ADMIN_PORT` - Admin HTTP server port (default: 3000)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("CACHE_DEFAULT_TTL", defaults.default_ttl),
            max_size: env_or("CACHE_MAX_SIZE", defaults.max_size),
            admin_port: env_or("ADMIN_PORT", defaults.admin_port),
            sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }
}

/// Parses `name` from the environment, falling back on absence or bad input.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 3600,
            max_size: 1000,
            admin_port: 3000,
            sweep_interval: 60,
        }
    }
}
