// ABOUTME: Store factory selecting between the in-memory and hosted backends
// ABOUTME: Enum dispatch keeps StoreProvider object-safe-free and cloneable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use super::memory::MemoryStore;
use super::rest::RestStore;
use super::StoreProvider;
use crate::config::PlannerConfig;
use crate::errors::AppResult;
use crate::models::{
    Day, FavoriteEntry, MealSlot, MealTrackingEntry, PantryItem, PlanCellRef, PlanChange,
    UserProfile,
};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

/// Store backend selected at startup
#[derive(Clone)]
pub enum Store {
    /// Local in-memory rows, used offline and in tests
    Memory(MemoryStore),
    /// Hosted backend-as-a-service
    Rest(RestStore),
}

impl Store {
    /// Pick a backend from configuration: the hosted store when an API key
    /// is configured and offline mode is off, local rows otherwise
    ///
    /// # Errors
    ///
    /// Returns an error when the hosted client cannot be constructed
    pub fn from_config(config: &PlannerConfig) -> AppResult<Self> {
        if config.offline_mode || config.store.api_key.is_none() {
            info!("using in-memory store (offline mode or no store credentials)");
            return Ok(Self::Memory(MemoryStore::new()));
        }
        info!(base_url = %config.store.base_url, "using hosted store");
        Ok(Self::Rest(RestStore::new(&config.store)?))
    }

    /// Backend name for logging
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Rest(_) => "rest",
        }
    }
}

#[async_trait]
impl StoreProvider for Store {
    async fn pantry_list(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>> {
        match self {
            Self::Memory(store) => store.pantry_list(user_id).await,
            Self::Rest(store) => store.pantry_list(user_id).await,
        }
    }

    async fn pantry_upsert_batch(&self, user_id: Uuid, items: &[PantryItem]) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.pantry_upsert_batch(user_id, items).await,
            Self::Rest(store) => store.pantry_upsert_batch(user_id, items).await,
        }
    }

    async fn plan_list(&self, user_id: Uuid) -> AppResult<Vec<(Day, MealSlot, PlanCellRef)>> {
        match self {
            Self::Memory(store) => store.plan_list(user_id).await,
            Self::Rest(store) => store.plan_list(user_id).await,
        }
    }

    async fn plan_upsert(
        &self,
        user_id: Uuid,
        day: Day,
        slot: MealSlot,
        cell: &PlanCellRef,
    ) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.plan_upsert(user_id, day, slot, cell).await,
            Self::Rest(store) => store.plan_upsert(user_id, day, slot, cell).await,
        }
    }

    async fn plan_delete(&self, user_id: Uuid, day: Day, slot: MealSlot) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.plan_delete(user_id, day, slot).await,
            Self::Rest(store) => store.plan_delete(user_id, day, slot).await,
        }
    }

    async fn plan_delete_all(&self, user_id: Uuid) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.plan_delete_all(user_id).await,
            Self::Rest(store) => store.plan_delete_all(user_id).await,
        }
    }

    async fn plan_subscribe(&self, user_id: Uuid) -> AppResult<broadcast::Receiver<PlanChange>> {
        match self {
            Self::Memory(store) => store.plan_subscribe(user_id).await,
            Self::Rest(store) => store.plan_subscribe(user_id).await,
        }
    }

    async fn favorites_list(&self, user_id: Uuid) -> AppResult<Vec<FavoriteEntry>> {
        match self {
            Self::Memory(store) => store.favorites_list(user_id).await,
            Self::Rest(store) => store.favorites_list(user_id).await,
        }
    }

    async fn favorites_add(&self, entry: &FavoriteEntry) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.favorites_add(entry).await,
            Self::Rest(store) => store.favorites_add(entry).await,
        }
    }

    async fn favorites_remove(&self, user_id: Uuid, recipe_id: &str) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.favorites_remove(user_id, recipe_id).await,
            Self::Rest(store) => store.favorites_remove(user_id, recipe_id).await,
        }
    }

    async fn tracking_list(&self, user_id: Uuid) -> AppResult<Vec<MealTrackingEntry>> {
        match self {
            Self::Memory(store) => store.tracking_list(user_id).await,
            Self::Rest(store) => store.tracking_list(user_id).await,
        }
    }

    async fn tracking_upsert(&self, user_id: Uuid, entry: &MealTrackingEntry) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.tracking_upsert(user_id, entry).await,
            Self::Rest(store) => store.tracking_upsert(user_id, entry).await,
        }
    }

    async fn profile_get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        match self {
            Self::Memory(store) => store.profile_get(user_id).await,
            Self::Rest(store) => store.profile_get(user_id).await,
        }
    }

    async fn profile_upsert(&self, user_id: Uuid, profile: &UserProfile) -> AppResult<()> {
        match self {
            Self::Memory(store) => store.profile_upsert(user_id, profile).await,
            Self::Rest(store) => store.profile_upsert(user_id, profile).await,
        }
    }
}
