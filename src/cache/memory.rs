// ABOUTME: In-memory recipe cache with LRU eviction and TTL support
// ABOUTME: Optional background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use super::RecipeCache;
use crate::config::CacheSettings;
use crate::errors::AppResult;
use crate::models::Recipe;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    recipe: Recipe,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(recipe: Recipe, ttl: Duration) -> Self {
        Self {
            recipe,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory recipe cache with LRU eviction and background cleanup.
///
/// The `Arc<RwLock<LruCache>>` is shared between cache operations and the
/// optional cleanup task spawned at construction; `LruCache` gives O(1)
/// eviction of the least-recently-viewed recipe when capacity is hit.
#[derive(Clone)]
pub struct InMemoryRecipeCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    ttl: Duration,
    shutdown_tx: Option<Arc<tokio::sync::mpsc::Sender<()>>>,
}

impl InMemoryRecipeCache {
    /// Fallback capacity when configuration specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(500) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache from settings, spawning the cleanup task when enabled
    #[must_use]
    pub fn new(settings: &CacheSettings) -> Self {
        let capacity = NonZeroUsize::new(settings.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        let store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = if settings.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::channel::<()>(1);
            let store_clone = store.clone();
            let cleanup_interval = settings.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::cleanup_expired(&store_clone).await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("recipe cache cleanup task shutting down");
                            break;
                        }
                    }
                }
            });

            Some(Arc::new(shutdown_tx))
        } else {
            None
        };

        Self {
            store,
            ttl: settings.ttl,
            shutdown_tx,
        }
    }

    /// Remove all expired entries
    async fn cleanup_expired(store: &Arc<RwLock<LruCache<String, CacheEntry>>>) {
        let mut guard = store.write().await;
        let expired: Vec<String> = guard
            .iter()
            .filter_map(|(key, entry)| entry.is_expired().then(|| key.clone()))
            .collect();
        for key in &expired {
            guard.pop(key);
        }
        let removed = expired.len();
        drop(guard);
        if removed > 0 {
            debug!(removed, "evicted expired recipe cache entries");
        }
    }
}

impl Drop for InMemoryRecipeCache {
    fn drop(&mut self) {
        // last clone going away stops the cleanup task
        if let Some(tx) = self.shutdown_tx.take() {
            if let Ok(tx) = Arc::try_unwrap(tx) {
                let _ = tx.try_send(());
            }
        }
    }
}

#[async_trait]
impl RecipeCache for InMemoryRecipeCache {
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Recipe>> {
        let mut store = self.store.write().await;
        match store.get(id) {
            Some(entry) if !entry.is_expired() => Ok(Some(entry.recipe.clone())),
            Some(_) => {
                store.pop(id);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, recipe: &Recipe) -> AppResult<()> {
        let mut store = self.store.write().await;
        store.put(
            recipe.id.clone(),
            CacheEntry::new(recipe.clone(), self.ttl),
        );
        Ok(())
    }

    async fn remove(&self, id: &str) -> AppResult<()> {
        let mut store = self.store.write().await;
        store.pop(id);
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        let mut store = self.store.write().await;
        store.clear();
        Ok(())
    }
}
