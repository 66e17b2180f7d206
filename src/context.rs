// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Holds store, catalog, cache, auth, and the status event channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Planner Resources
//!
//! Centralized resource container passed explicitly to the controllers
//! that need shared state. This replaces ambient globals with a defined
//! read/write contract: components receive the container by reference
//! and reach only the collaborators they use.

use crate::auth::Auth;
use crate::cache::InMemoryRecipeCache;
use crate::catalog::{CachingCatalog, Catalog, MockCatalog};
use crate::config::PlannerConfig;
use crate::constants::sync::STATUS_CHANNEL_SIZE;
use crate::errors::AppResult;
use crate::offline::OfflineFallbackController;
use crate::requests::RequestTracker;
use crate::store::factory::Store;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// Severity of a transient status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational notice
    Info,
    /// Something degraded but the UI keeps working
    Warning,
}

/// Transient status message surfaced to the UI as a toast
#[derive(Debug, Clone)]
pub struct StatusEvent {
    /// Severity
    pub level: StatusLevel,
    /// Human-readable message
    pub message: String,
}

impl StatusEvent {
    /// Informational status
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            message: message.into(),
        }
    }

    /// Warning status
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            message: message.into(),
        }
    }
}

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct PlannerResources {
    /// Client configuration
    pub config: Arc<PlannerConfig>,
    /// Persistent store backend
    pub store: Store,
    /// Device-local rows used while no session exists
    pub local_store: crate::store::memory::MemoryStore,
    /// Auth backend
    pub auth: Auth,
    /// Primary recipe catalog behind the read-through cache
    pub catalog: CachingCatalog<Catalog, InMemoryRecipeCache>,
    /// Offline substitute catalog for failed remote reads
    pub mock_catalog: MockCatalog,
    /// Offline routing
    pub offline: OfflineFallbackController,
    /// In-flight request supersession
    pub requests: RequestTracker,
    /// Transient status channel consumed by the UI layer
    pub status: broadcast::Sender<StatusEvent>,
}

impl PlannerResources {
    /// Wire up every collaborator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error when a hosted client cannot be constructed
    pub fn from_config(config: PlannerConfig) -> AppResult<Self> {
        let store = Store::from_config(&config)?;
        let auth = Auth::from_config(&config)?;
        let catalog_backend = Catalog::from_config(&config)?;
        info!(
            store = store.backend_name(),
            catalog = catalog_backend.backend_name(),
            "planner resources initialized"
        );
        let recipe_cache = InMemoryRecipeCache::new(&config.cache);
        let catalog = CachingCatalog::new(catalog_backend, recipe_cache);
        let offline = OfflineFallbackController::new(config.offline_mode);
        let (status, _) = broadcast::channel(STATUS_CHANNEL_SIZE);

        Ok(Self {
            config: Arc::new(config),
            store,
            local_store: crate::store::memory::MemoryStore::new(),
            auth,
            catalog,
            mock_catalog: MockCatalog::new(),
            offline,
            requests: RequestTracker::new(),
            status,
        })
    }

    /// Subscribe to transient status messages
    #[must_use]
    pub fn subscribe_status(&self) -> broadcast::Receiver<StatusEvent> {
        self.status.subscribe()
    }

    /// Emit a transient status message; dropped silently when nothing
    /// is listening
    pub fn emit_status(&self, event: StatusEvent) {
        let _ = self.status.send(event);
    }
}
