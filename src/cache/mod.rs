// ABOUTME: Recipe cache abstraction to avoid redundant catalog calls
// ABOUTME: Keyed by recipe id with per-entry TTL; in-memory backend included
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Recipe Cache
//!
//! Caches full-detail recipes by id so repeat views skip the catalog
//! round-trip. Entries expire on a TTL; the in-memory backend also
//! bounds capacity with LRU eviction.

use crate::errors::AppResult;
use crate::models::Recipe;
use async_trait::async_trait;

/// In-memory cache implementation
pub mod memory;

pub use memory::InMemoryRecipeCache;

/// Recipe cache abstraction
#[async_trait]
pub trait RecipeCache: Send + Sync + Clone {
    /// Look up a cached recipe; expired entries read as absent
    ///
    /// # Errors
    ///
    /// Returns an error when the backend lookup fails
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Recipe>>;

    /// Store a recipe under its id
    ///
    /// # Errors
    ///
    /// Returns an error when the backend write fails
    async fn put(&self, recipe: &Recipe) -> AppResult<()>;

    /// Drop one cached recipe
    ///
    /// # Errors
    ///
    /// Returns an error when the backend removal fails
    async fn remove(&self, id: &str) -> AppResult<()>;

    /// Drop every cached recipe
    ///
    /// # Errors
    ///
    /// Returns an error when the backend clear fails
    async fn clear(&self) -> AppResult<()>;
}
