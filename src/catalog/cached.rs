// ABOUTME: Read-through caching wrapper around any recipe catalog backend
// ABOUTME: Serves repeat detail views from the cache, populates on miss
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use super::{RecipeCatalog, SearchFilters};
use crate::cache::RecipeCache;
use crate::errors::AppResult;
use crate::models::Recipe;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Catalog wrapper that answers detail fetches from the cache first.
///
/// Searches always go to the inner catalog (result lists are too
/// query-shaped to cache usefully here); full-detail fetches are cached
/// by id. Cache failures never fail the fetch, they only cost the
/// round-trip.
#[derive(Clone)]
pub struct CachingCatalog<C: RecipeCatalog, K: RecipeCache> {
    inner: C,
    cache: K,
}

impl<C: RecipeCatalog, K: RecipeCache> CachingCatalog<C, K> {
    /// Wrap a catalog with a cache
    #[must_use]
    pub fn new(inner: C, cache: K) -> Self {
        Self { inner, cache }
    }

    /// The wrapped catalog
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: RecipeCatalog, K: RecipeCache> RecipeCatalog for CachingCatalog<C, K> {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> AppResult<Vec<Recipe>> {
        self.inner.search(query, filters, limit).await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Recipe> {
        match self.cache.get_by_id(id).await {
            Ok(Some(recipe)) => {
                debug!(id, "recipe cache hit");
                return Ok(recipe);
            }
            Ok(None) => {}
            Err(e) => warn!(id, error = %e, "recipe cache lookup failed"),
        }

        let recipe = self.inner.get_by_id(id).await?;
        if let Err(e) = self.cache.put(&recipe).await {
            warn!(id, error = %e, "recipe cache store failed");
        }
        Ok(recipe)
    }
}
