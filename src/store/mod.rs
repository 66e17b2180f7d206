// ABOUTME: Store abstraction for per-user persisted state and its change feed
// ABOUTME: Plugin architecture with in-memory and hosted REST backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Store Abstraction Layer
//!
//! The persistent store holds each user's pantry, meal plan, favorites,
//! meal tracking, and profile as per-user partitioned rows with
//! last-write-wins upsert semantics and deletion by composite key. The
//! meal plan additionally exposes a change feed carrying every mutation,
//! including the caller's own writes (the sync controller's self-echo).
//!
//! There is no version check on writes: two genuinely concurrent writers
//! to the same cell resolve last-write-wins. That is acceptable under the
//! single-user-editing assumption and documented here as a known
//! limitation rather than silently papered over.

use crate::errors::AppResult;
use crate::models::{
    Day, FavoriteEntry, MealSlot, MealTrackingEntry, PantryItem, PlanCellRef, PlanChange,
    UserProfile,
};
use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod factory;
pub mod memory;
pub mod rest;

/// Core store abstraction trait
///
/// All store implementations must implement this trait to provide a
/// consistent interface for the application layer.
#[async_trait]
pub trait StoreProvider: Send + Sync + Clone {
    // ================================
    // Pantry
    // ================================

    /// List the user's pantry items
    async fn pantry_list(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>>;

    /// Replace the user's pantry with the given items (last write wins)
    async fn pantry_upsert_batch(&self, user_id: Uuid, items: &[PantryItem]) -> AppResult<()>;

    // ================================
    // Meal Plan
    // ================================

    /// List every occupied plan cell for the user
    async fn plan_list(&self, user_id: Uuid) -> AppResult<Vec<(Day, MealSlot, PlanCellRef)>>;

    /// Upsert one plan cell by composite (day, slot) key
    async fn plan_upsert(
        &self,
        user_id: Uuid,
        day: Day,
        slot: MealSlot,
        cell: &PlanCellRef,
    ) -> AppResult<()>;

    /// Delete one plan cell by composite (day, slot) key
    async fn plan_delete(&self, user_id: Uuid, day: Day, slot: MealSlot) -> AppResult<()>;

    /// Delete every plan cell for the user
    async fn plan_delete_all(&self, user_id: Uuid) -> AppResult<()>;

    /// Subscribe to the user's plan change feed.
    ///
    /// The feed carries all plan mutations for the user, including those
    /// issued through this same store handle.
    async fn plan_subscribe(&self, user_id: Uuid) -> AppResult<broadcast::Receiver<PlanChange>>;

    // ================================
    // Favorites
    // ================================

    /// List the user's favorited recipes
    async fn favorites_list(&self, user_id: Uuid) -> AppResult<Vec<FavoriteEntry>>;

    /// Add a favorite; duplicates per (user, recipe) collapse to one entry
    async fn favorites_add(&self, entry: &FavoriteEntry) -> AppResult<()>;

    /// Remove a favorite by recipe id
    async fn favorites_remove(&self, user_id: Uuid, recipe_id: &str) -> AppResult<()>;

    // ================================
    // Meal Tracking
    // ================================

    /// List the user's tracked meals
    async fn tracking_list(&self, user_id: Uuid) -> AppResult<Vec<MealTrackingEntry>>;

    /// Upsert a tracked meal status by composite (day, slot) key
    async fn tracking_upsert(&self, user_id: Uuid, entry: &MealTrackingEntry) -> AppResult<()>;

    // ================================
    // Profile
    // ================================

    /// Get the user's profile, if one was ever saved
    async fn profile_get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>>;

    /// Upsert the user's profile (last write wins)
    async fn profile_upsert(&self, user_id: Uuid, profile: &UserProfile) -> AppResult<()>;
}
