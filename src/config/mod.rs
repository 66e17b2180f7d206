// ABOUTME: Environment-based configuration for the Remy meal planning client
// ABOUTME: Service endpoints, sync timing, cache sizing, and offline mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Configuration Module
//!
//! Environment-only configuration, one `from_env()` entry point with
//! sensible defaults for every value so the client boots with zero
//! configuration in offline/demo mode.

use crate::constants::{cache, limits, sync};
use anyhow::Result;
use std::env;
use std::time::Duration;
use tracing::info;

/// Hosted store (backend-as-a-service) connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the hosted store REST API
    pub base_url: String,
    /// Project API key sent with every request
    pub api_key: Option<String>,
    /// Wall-clock budget for remote writes
    pub write_timeout: Duration,
    /// Wall-clock budget for remote reads
    pub read_timeout: Duration,
}

/// Recipe catalog service connection settings
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the recipe catalog API
    pub base_url: String,
    /// Catalog API key
    pub api_key: Option<String>,
    /// Default search result limit
    pub search_limit: usize,
}

/// Recipe cache sizing
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Maximum cached recipe details
    pub max_entries: usize,
    /// Per-entry TTL
    pub ttl: Duration,
    /// Background cleanup interval
    pub cleanup_interval: Duration,
    /// Enable the background cleanup task (disable in tests)
    pub enable_background_cleanup: bool,
}

/// Plan synchronization tuning
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Self-echo suppression window; markers expire unconditionally
    /// after this long
    pub suppression_window: Duration,
}

/// Top-level client configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Store connection settings
    pub store: StoreConfig,
    /// Catalog connection settings
    pub catalog: CatalogConfig,
    /// Recipe cache sizing
    pub cache: CacheSettings,
    /// Sync tuning
    pub sync: SyncConfig,
    /// Force the local/mock data path regardless of connectivity
    pub offline_mode: bool,
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric variable is set but unparseable
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            store: StoreConfig {
                base_url: env_var_or("STORE_BASE_URL", "https://store.remymeals.app/v1")?,
                api_key: env::var("STORE_API_KEY").ok(),
                write_timeout: Duration::from_secs(
                    env_var_or("STORE_WRITE_TIMEOUT_SECS", &sync::WRITE_TIMEOUT_SECS.to_string())?
                        .parse()?,
                ),
                read_timeout: Duration::from_secs(
                    env_var_or("STORE_READ_TIMEOUT_SECS", &sync::READ_TIMEOUT_SECS.to_string())?
                        .parse()?,
                ),
            },
            catalog: CatalogConfig {
                base_url: env_var_or("CATALOG_BASE_URL", "https://api.spoonacular.com")?,
                api_key: env::var("CATALOG_API_KEY").ok(),
                search_limit: env_var_or(
                    "CATALOG_SEARCH_LIMIT",
                    &limits::DEFAULT_SEARCH_LIMIT.to_string(),
                )?
                .parse()?,
            },
            cache: CacheSettings {
                max_entries: env_var_or(
                    "RECIPE_CACHE_MAX_ENTRIES",
                    &cache::DEFAULT_CACHE_MAX_ENTRIES.to_string(),
                )?
                .parse()?,
                ttl: Duration::from_secs(
                    env_var_or("RECIPE_CACHE_TTL_SECS", &cache::TTL_RECIPE_SECS.to_string())?
                        .parse()?,
                ),
                cleanup_interval: Duration::from_secs(
                    env_var_or(
                        "RECIPE_CACHE_CLEANUP_INTERVAL_SECS",
                        &cache::DEFAULT_CLEANUP_INTERVAL_SECS.to_string(),
                    )?
                    .parse()?,
                ),
                enable_background_cleanup: env_var_or("RECIPE_CACHE_BACKGROUND_CLEANUP", "true")?
                    .parse()?,
            },
            sync: SyncConfig {
                suppression_window: Duration::from_millis(
                    env_var_or(
                        "SYNC_SUPPRESSION_WINDOW_MS",
                        &sync::SUPPRESSION_WINDOW_MS.to_string(),
                    )?
                    .parse()?,
                ),
            },
            offline_mode: env_var_or("OFFLINE_MODE", "false")?.parse()?,
        };

        Ok(config)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                base_url: "https://store.remymeals.app/v1".into(),
                api_key: None,
                write_timeout: Duration::from_secs(sync::WRITE_TIMEOUT_SECS),
                read_timeout: Duration::from_secs(sync::READ_TIMEOUT_SECS),
            },
            catalog: CatalogConfig {
                base_url: "https://api.spoonacular.com".into(),
                api_key: None,
                search_limit: limits::DEFAULT_SEARCH_LIMIT,
            },
            cache: CacheSettings {
                max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
                ttl: Duration::from_secs(cache::TTL_RECIPE_SECS),
                cleanup_interval: Duration::from_secs(cache::DEFAULT_CLEANUP_INTERVAL_SECS),
                enable_background_cleanup: true,
            },
            sync: SyncConfig {
                suppression_window: Duration::from_millis(sync::SUPPRESSION_WINDOW_MS),
            },
            offline_mode: false,
        }
    }
}

fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_bounded() {
        let config = PlannerConfig::default();
        assert!(config.sync.suppression_window < Duration::from_secs(2));
        assert!(config.store.write_timeout >= Duration::from_secs(5));
        assert!(config.store.write_timeout <= Duration::from_secs(10));
        assert!(!config.offline_mode);
    }
}
