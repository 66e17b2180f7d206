// ABOUTME: In-memory store implementation backing local mode and tests
// ABOUTME: Broadcasts plan changes per user, mirroring the hosted change feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # In-Memory Store
//!
//! Backs the local-device storage path when no session exists and serves
//! as the deterministic store double in tests. Plan mutations are
//! broadcast on a per-user channel exactly like the hosted change feed,
//! self-echoes included, so the sync controller behaves identically
//! against either backend.

use super::StoreProvider;
use crate::constants::sync::CHANGE_FEED_CHANNEL_SIZE;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Day, FavoriteEntry, MealSlot, MealStatus, MealTrackingEntry, PantryItem, PlanCellRef,
    PlanChange, UserProfile,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

#[derive(Debug, Default)]
struct UserRows {
    pantry: Vec<PantryItem>,
    plan: HashMap<(Day, MealSlot), PlanCellRef>,
    favorites: Vec<FavoriteEntry>,
    tracking: HashMap<(Day, MealSlot), MealStatus>,
    profile: Option<UserProfile>,
}

/// In-memory store with per-user partitions and a plan change feed
#[derive(Clone)]
pub struct MemoryStore {
    rows: Arc<RwLock<HashMap<Uuid, UserRows>>>,
    feeds: Arc<RwLock<HashMap<Uuid, broadcast::Sender<PlanChange>>>>,
    /// Fault injection for development and tests: when set, every write
    /// fails with a remote-write error while reads keep working
    fail_writes: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
            feeds: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle write fault injection
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::remote_write("store rejected the write"));
        }
        Ok(())
    }

    async fn feed_sender(&self, user_id: Uuid) -> broadcast::Sender<PlanChange> {
        let mut feeds = self.feeds.write().await;
        feeds
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(CHANGE_FEED_CHANNEL_SIZE).0)
            .clone()
    }

    async fn publish(&self, user_id: Uuid, change: PlanChange) {
        let sender = self.feed_sender(user_id).await;
        // send only fails when nobody is subscribed, which is fine
        let _ = sender.send(change);
    }
}

#[async_trait]
impl StoreProvider for MemoryStore {
    async fn pantry_list(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&user_id).map(|r| r.pantry.clone()).unwrap_or_default())
    }

    async fn pantry_upsert_batch(&self, user_id: Uuid, items: &[PantryItem]) -> AppResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.write().await;
        rows.entry(user_id).or_default().pantry = items.to_vec();
        Ok(())
    }

    async fn plan_list(&self, user_id: Uuid) -> AppResult<Vec<(Day, MealSlot, PlanCellRef)>> {
        let rows = self.rows.read().await;
        let mut cells: Vec<(Day, MealSlot, PlanCellRef)> = rows
            .get(&user_id)
            .map(|r| {
                r.plan
                    .iter()
                    .map(|(&(day, slot), cell)| (day, slot, cell.clone()))
                    .collect()
            })
            .unwrap_or_default();
        cells.sort_by_key(|&(day, slot, _)| (day, slot));
        Ok(cells)
    }

    async fn plan_upsert(
        &self,
        user_id: Uuid,
        day: Day,
        slot: MealSlot,
        cell: &PlanCellRef,
    ) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut rows = self.rows.write().await;
            rows.entry(user_id)
                .or_default()
                .plan
                .insert((day, slot), cell.clone());
        }
        self.publish(
            user_id,
            PlanChange::Upserted {
                day,
                slot,
                cell: cell.clone(),
            },
        )
        .await;
        Ok(())
    }

    async fn plan_delete(&self, user_id: Uuid, day: Day, slot: MealSlot) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut rows = self.rows.write().await;
            rows.entry(user_id).or_default().plan.remove(&(day, slot));
        }
        self.publish(user_id, PlanChange::Deleted { day, slot }).await;
        Ok(())
    }

    async fn plan_delete_all(&self, user_id: Uuid) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut rows = self.rows.write().await;
            rows.entry(user_id).or_default().plan.clear();
        }
        self.publish(user_id, PlanChange::AllDeleted).await;
        Ok(())
    }

    async fn plan_subscribe(&self, user_id: Uuid) -> AppResult<broadcast::Receiver<PlanChange>> {
        Ok(self.feed_sender(user_id).await.subscribe())
    }

    async fn favorites_list(&self, user_id: Uuid) -> AppResult<Vec<FavoriteEntry>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&user_id)
            .map(|r| r.favorites.clone())
            .unwrap_or_default())
    }

    async fn favorites_add(&self, entry: &FavoriteEntry) -> AppResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.write().await;
        let favorites = &mut rows.entry(entry.user_id).or_default().favorites;
        // unique per (user, recipe): replace instead of duplicating
        favorites.retain(|existing| existing.recipe_id != entry.recipe_id);
        favorites.push(entry.clone());
        Ok(())
    }

    async fn favorites_remove(&self, user_id: Uuid, recipe_id: &str) -> AppResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.write().await;
        rows.entry(user_id)
            .or_default()
            .favorites
            .retain(|existing| existing.recipe_id != recipe_id);
        Ok(())
    }

    async fn tracking_list(&self, user_id: Uuid) -> AppResult<Vec<MealTrackingEntry>> {
        let rows = self.rows.read().await;
        let mut entries: Vec<MealTrackingEntry> = rows
            .get(&user_id)
            .map(|r| {
                r.tracking
                    .iter()
                    .map(|(&(day, slot), &status)| MealTrackingEntry { day, slot, status })
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by_key(|entry| (entry.day, entry.slot));
        Ok(entries)
    }

    async fn tracking_upsert(&self, user_id: Uuid, entry: &MealTrackingEntry) -> AppResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.write().await;
        rows.entry(user_id)
            .or_default()
            .tracking
            .insert((entry.day, entry.slot), entry.status);
        Ok(())
    }

    async fn profile_get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&user_id).and_then(|r| r.profile.clone()))
    }

    async fn profile_upsert(&self, user_id: Uuid, profile: &UserProfile) -> AppResult<()> {
        self.check_writable()?;
        let mut rows = self.rows.write().await;
        rows.entry(user_id).or_default().profile = Some(profile.clone());
        Ok(())
    }
}
