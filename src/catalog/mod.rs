// ABOUTME: Recipe catalog abstraction: search and fetch-by-id collaborators
// ABOUTME: Shared request/response contract for remote, mock, cached backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Recipe Catalog
//!
//! The third-party recipe source behind a shared trait. All backends
//! accept the same request parameters and return the normalized
//! [`Recipe`](crate::models::Recipe) model; backend-specific payload
//! shapes stay internal to each implementation.

use crate::errors::AppResult;
use crate::models::Recipe;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-through caching wrapper
pub mod cached;
/// Deterministic offline dataset
pub mod mock;
/// Hosted catalog HTTP client
pub mod remote;

pub use cached::CachingCatalog;
pub use mock::MockCatalog;
pub use remote::RemoteCatalog;

/// Search filter parameters shared by every backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict results to recipes carrying this diet tag
    #[serde(default)]
    pub diet: Option<String>,
    /// Upper calorie bound per serving
    #[serde(default)]
    pub max_calories: Option<f64>,
}

/// Recipe catalog abstraction
#[async_trait]
pub trait RecipeCatalog: Send + Sync + Clone {
    /// Search recipes by free-text query and filters
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable or rejects the
    /// request
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> AppResult<Vec<Recipe>>;

    /// Fetch one recipe with full detail
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids and a service error when the
    /// backend is unreachable
    async fn get_by_id(&self, id: &str) -> AppResult<Recipe>;
}

/// Catalog backend selected at startup
#[derive(Clone)]
pub enum Catalog {
    /// Hosted third-party recipe API
    Remote(RemoteCatalog),
    /// Built-in deterministic dataset
    Mock(MockCatalog),
}

impl Catalog {
    /// Pick a backend from configuration: the hosted catalog when an API
    /// key is configured and offline mode is off, the mock otherwise
    ///
    /// # Errors
    ///
    /// Returns an error when the hosted client cannot be constructed
    pub fn from_config(config: &crate::config::PlannerConfig) -> AppResult<Self> {
        if config.offline_mode || config.catalog.api_key.is_none() {
            return Ok(Self::Mock(MockCatalog::new()));
        }
        Ok(Self::Remote(RemoteCatalog::new(&config.catalog)?))
    }

    /// Backend name for logging
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Remote(_) => "remote",
            Self::Mock(_) => "mock",
        }
    }
}

#[async_trait]
impl RecipeCatalog for Catalog {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> AppResult<Vec<Recipe>> {
        match self {
            Self::Remote(catalog) => catalog.search(query, filters, limit).await,
            Self::Mock(catalog) => catalog.search(query, filters, limit).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Recipe> {
        match self {
            Self::Remote(catalog) => catalog.get_by_id(id).await,
            Self::Mock(catalog) => catalog.get_by_id(id).await,
        }
    }
}
