// ABOUTME: UI-facing planner service: pantry, search, favorites, tracking
// ABOUTME: Validates locally, routes through offline fallback, maps errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Planner Service
//!
//! The operation surface the UI calls. Each operation follows the same
//! shape: validate input locally, apply the optimistic in-memory
//! mutation, then route persistence or fetching through the offline
//! fallback controller. Failures degrade to status events; the
//! in-memory state the UI renders is never rolled back.

use crate::auth::{require_session, AuthProvider};
use crate::constants::limits::{MAX_CALORIE_GOAL, MIN_CALORIE_GOAL};
use crate::constants::quick_select::COMMON_INGREDIENTS;
use crate::context::{PlannerResources, StatusEvent};
use crate::errors::{AppError, AppResult};
use crate::intelligence;
use crate::models::{
    AnnotatedRecipe, Day, FavoriteEntry, MealSlot, MealStatus, MealTrackingEntry, PantryItem,
    Recipe, UserProfile,
};
use crate::catalog::{RecipeCatalog, SearchFilters};
use crate::offline::WriteOutcome;
use crate::pantry::{PantryItemPatch, PantryModel};
use crate::plan::PlanSyncController;
use crate::store::factory::Store;
use crate::store::StoreProvider;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Device-local partition used while no user is signed in
fn local_user() -> Uuid {
    Uuid::nil()
}

/// UI-facing application service over the shared resources
#[derive(Clone)]
pub struct PlannerService {
    resources: PlannerResources,
    pantry: Arc<RwLock<PantryModel>>,
    profile: Arc<RwLock<Option<UserProfile>>>,
}

impl PlannerService {
    /// Create the service over wired resources
    #[must_use]
    pub fn new(resources: PlannerResources) -> Self {
        Self {
            resources,
            pantry: Arc::new(RwLock::new(PantryModel::new())),
            profile: Arc::new(RwLock::new(None)),
        }
    }

    /// The shared resource container
    #[must_use]
    pub fn resources(&self) -> &PlannerResources {
        &self.resources
    }

    // ================================
    // Pantry
    // ================================

    /// Shared handle to the pantry the UI renders
    #[must_use]
    pub fn pantry(&self) -> Arc<RwLock<PantryModel>> {
        self.pantry.clone()
    }

    /// Add a pantry item and persist best-effort
    ///
    /// # Errors
    ///
    /// Rejects blank names before anything is mutated or sent
    pub async fn pantry_add(&self, name: &str, quantity: f64, unit: &str) -> AppResult<PantryItem> {
        let item = self.pantry.write().await.add(name, quantity, unit)?;
        self.persist_pantry().await;
        Ok(item)
    }

    /// Add a quick-select ingredient by its position in the catalog table
    ///
    /// # Errors
    ///
    /// Returns not-found for an index outside the table
    pub async fn pantry_quick_add(&self, index: usize) -> AppResult<PantryItem> {
        let (name, unit) = COMMON_INGREDIENTS
            .get(index)
            .ok_or_else(|| AppError::not_found("quick-select entry"))?;
        self.pantry_add(name, 1.0, unit).await
    }

    /// Patch a pantry item and persist best-effort
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids and validation errors for blank
    /// names
    pub async fn pantry_update(&self, id: Uuid, patch: PantryItemPatch) -> AppResult<PantryItem> {
        let item = self.pantry.write().await.update(id, patch)?;
        self.persist_pantry().await;
        Ok(item)
    }

    /// Remove a pantry item and persist best-effort
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids
    pub async fn pantry_remove(&self, id: Uuid) -> AppResult<()> {
        self.pantry.write().await.remove(id)?;
        self.persist_pantry().await;
        Ok(())
    }

    /// Clear the pantry and persist best-effort
    pub async fn pantry_clear(&self) {
        self.pantry.write().await.clear();
        self.persist_pantry().await;
    }

    /// Load the pantry from the store, replacing the in-memory collection.
    ///
    /// Used after sign-in; without a session the device-local rows load
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns the store error when the signed-in read fails
    pub async fn pantry_load(&self) -> AppResult<()> {
        let items = match self.resources.auth.current_session().await {
            Some(session) => self.resources.store.pantry_list(session.user_id).await?,
            None => {
                self.resources
                    .local_store
                    .pantry_list(local_user())
                    .await?
            }
        };
        self.pantry.write().await.replace_all(items);
        Ok(())
    }

    /// Mirror the pantry to the store when signed in, or to device-local
    /// rows otherwise. The in-memory pantry always stands; failures only
    /// produce a status message.
    async fn persist_pantry(&self) {
        let items = self.pantry.read().await.list().to_vec();
        match self.resources.auth.current_session().await {
            Some(session) => {
                let store = self.resources.store.clone();
                let outcome = self
                    .resources
                    .offline
                    .write_best_effort(
                        true,
                        self.resources.config.store.write_timeout,
                        async move { store.pantry_upsert_batch(session.user_id, &items).await },
                    )
                    .await;
                if let WriteOutcome::LocalOnly { detail } = outcome {
                    self.resources.emit_status(StatusEvent::warning(format!(
                        "pantry not synced: {detail}"
                    )));
                }
            }
            None => {
                if let Err(e) = self
                    .resources
                    .local_store
                    .pantry_upsert_batch(local_user(), &items)
                    .await
                {
                    self.resources.emit_status(StatusEvent::warning(format!(
                        "pantry not saved on device: {e}"
                    )));
                }
            }
        }
    }

    // ================================
    // Recipe search & detail
    // ================================

    /// Search the catalog and return results scored against the pantry
    /// and profile, ranked by compatibility.
    ///
    /// The remote catalog falls back to the mock dataset transparently;
    /// a superseding search cancels this one.
    ///
    /// # Errors
    ///
    /// Returns a cancellation error when superseded; the fallback path
    /// absorbs connectivity failures
    pub async fn search_recipes(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> AppResult<Vec<AnnotatedRecipe>> {
        let limit = self.resources.config.catalog.search_limit;
        let catalog = self.resources.catalog.clone();
        let mock = self.resources.mock_catalog.clone();
        let offline = self.resources.offline.clone();
        let catalog_credentialed = self.resources.config.catalog.api_key.is_some();
        let query_owned = query.to_owned();
        let filters_owned = filters.clone();

        let fetched = self
            .resources
            .requests
            .run("search", async move {
                offline
                    .read_with_fallback(
                        catalog_credentialed,
                        {
                            let query = query_owned.clone();
                            let filters = filters_owned.clone();
                            async move { catalog.search(&query, &filters, limit).await }
                        },
                        async move { mock.search(&query_owned, &filters_owned, limit).await },
                    )
                    .await
            })
            .await?;

        if fetched.source == crate::offline::FetchSource::Fallback && catalog_credentialed {
            self.resources.emit_status(StatusEvent::info(
                "showing offline recipes while the catalog is unreachable",
            ));
        }

        let pantry = self.pantry.read().await.list().to_vec();
        let profile = self.profile.read().await.clone();
        let mut annotated =
            intelligence::annotate_all(&fetched.value, &pantry, profile.as_ref());
        intelligence::rank(&mut annotated);
        Ok(annotated)
    }

    /// Fetch one recipe with full detail through the cache.
    ///
    /// A newer fetch for the same recipe id supersedes this one; fetches
    /// for different recipes run independently.
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids and a cancellation error when
    /// superseded
    pub async fn recipe_detail(&self, id: &str) -> AppResult<Recipe> {
        let catalog = self.resources.catalog.clone();
        let mock = self.resources.mock_catalog.clone();
        let offline = self.resources.offline.clone();
        let catalog_credentialed = self.resources.config.catalog.api_key.is_some();
        let id_owned = id.to_owned();

        let fetched = self
            .resources
            .requests
            .run(&format!("detail:{id}"), async move {
                offline
                    .read_with_fallback(
                        catalog_credentialed,
                        {
                            let id = id_owned.clone();
                            async move { catalog.get_by_id(&id).await }
                        },
                        async move { mock.get_by_id(&id_owned).await },
                    )
                    .await
            })
            .await?;
        Ok(fetched.value)
    }

    // ================================
    // Profile
    // ================================

    /// The profile used for scoring, if loaded
    #[must_use]
    pub fn profile_handle(&self) -> Arc<RwLock<Option<UserProfile>>> {
        self.profile.clone()
    }

    /// Load the signed-in user's profile from the store
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store read errors
    pub async fn profile_load(&self) -> AppResult<Option<UserProfile>> {
        let session = require_session(&self.resources.auth, "load your profile").await?;
        let profile = self.resources.store.profile_get(session.user_id).await?;
        *self.profile.write().await = profile.clone();
        Ok(profile)
    }

    /// Validate and save the profile; the in-memory copy updates even
    /// when the remote write degrades to local-only.
    ///
    /// # Errors
    ///
    /// Requires a session and rejects out-of-range calorie goals before
    /// any network call
    pub async fn profile_save(&self, profile: UserProfile) -> AppResult<()> {
        if let Some(goal) = profile.calorie_goal {
            if !(MIN_CALORIE_GOAL..=MAX_CALORIE_GOAL).contains(&goal) {
                return Err(AppError::value_out_of_range(format!(
                    "calorie goal must be between {MIN_CALORIE_GOAL} and {MAX_CALORIE_GOAL}"
                )));
            }
        }
        let session = require_session(&self.resources.auth, "save your profile").await?;

        *self.profile.write().await = Some(profile.clone());

        let store = self.resources.store.clone();
        let outcome = self
            .resources
            .offline
            .write_best_effort(
                true,
                self.resources.config.store.write_timeout,
                async move { store.profile_upsert(session.user_id, &profile).await },
            )
            .await;
        if let WriteOutcome::LocalOnly { detail } = outcome {
            self.resources
                .emit_status(StatusEvent::warning(format!("profile not synced: {detail}")));
        }
        Ok(())
    }

    // ================================
    // Favorites
    // ================================

    /// List the signed-in user's favorites
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store read errors
    pub async fn favorites_list(&self) -> AppResult<Vec<FavoriteEntry>> {
        let session = require_session(&self.resources.auth, "see your favorites").await?;
        self.resources.store.favorites_list(session.user_id).await
    }

    /// Favorite a recipe
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store write errors
    pub async fn favorites_add(&self, recipe: &Recipe) -> AppResult<()> {
        let session = require_session(&self.resources.auth, "save favorites").await?;
        let entry = FavoriteEntry {
            user_id: session.user_id,
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
        };
        self.resources.store.favorites_add(&entry).await?;
        info!(recipe_id = %recipe.id, "recipe favorited");
        Ok(())
    }

    /// Remove a favorite
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store write errors
    pub async fn favorites_remove(&self, recipe_id: &str) -> AppResult<()> {
        let session = require_session(&self.resources.auth, "edit favorites").await?;
        self.resources
            .store
            .favorites_remove(session.user_id, recipe_id)
            .await
    }

    // ================================
    // Meal tracking
    // ================================

    /// Mark a planned meal as made or eaten
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store write errors
    pub async fn track_meal(&self, day: Day, slot: MealSlot, status: MealStatus) -> AppResult<()> {
        let session = require_session(&self.resources.auth, "track meals").await?;
        let entry = MealTrackingEntry { day, slot, status };
        self.resources
            .store
            .tracking_upsert(session.user_id, &entry)
            .await
    }

    /// List tracked meals
    ///
    /// # Errors
    ///
    /// Requires a session; propagates store read errors
    pub async fn tracking_list(&self) -> AppResult<Vec<MealTrackingEntry>> {
        let session = require_session(&self.resources.auth, "see tracked meals").await?;
        self.resources.store.tracking_list(session.user_id).await
    }

    // ================================
    // Plan sync
    // ================================

    /// Create the plan sync controller for the signed-in user: loads the
    /// remote plan and starts consuming the change feed.
    ///
    /// # Errors
    ///
    /// Requires a session; propagates the initial read or subscribe error
    pub async fn start_plan_sync(&self) -> AppResult<PlanSyncController<Store>> {
        let session = require_session(&self.resources.auth, "sync your meal plan").await?;
        let mut controller = PlanSyncController::new(
            self.resources.store.clone(),
            session.user_id,
            &self.resources.config,
        );
        controller.refresh().await?;
        controller.start_feed().await?;
        Ok(controller)
    }
}
