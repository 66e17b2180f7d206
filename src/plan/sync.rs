// ABOUTME: Plan sync controller: optimistic grid writes mirrored to the store
// ABOUTME: Ingests the change feed and suppresses self-echo events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Plan Sync Controller
//!
//! Reconciles the in-memory [`MealPlanGrid`] with the remote store. Every
//! mutation lands on the grid first and is mirrored to the store from a
//! background task, so the grid never blocks on the network. Remote
//! failures surface as transient status events and never revert the
//! optimistic local state: a network blip must not look like data loss.
//!
//! The store's change feed echoes this controller's own writes back.
//! Before each remote write an "operation in flight" marker is recorded
//! for the touched coordinates; a fresh marker swallows exactly one
//! matching feed event. Markers expire unconditionally after a bounded
//! window so a lost feed event cannot wedge suppression.
//!
//! Known limitation: there is no reconciliation pass for long-term
//! local/remote divergence after failed writes; [`PlanSyncController::refresh`]
//! is the only repair mechanism.

use crate::config::PlannerConfig;
use crate::models::{Day, MealSlot, PlanCellRef, PlanChange};
use crate::plan::grid::MealPlanGrid;
use crate::store::StoreProvider;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::sync::STATUS_CHANNEL_SIZE;

/// Coordinates touched by an in-flight remote operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OpKey {
    /// One cell
    Cell(Day, MealSlot),
    /// The whole plan (clear-all)
    All,
}

/// Transient status events surfaced to the UI layer
#[derive(Debug, Clone)]
pub enum SyncStatus {
    /// A remote mirror write failed; the optimistic grid state stands
    WriteFailed {
        /// What went wrong, suitable for a toast
        detail: String,
    },
    /// A change from another session was applied to the grid
    RemoteChangeApplied,
    /// A full refresh replaced the grid
    Refreshed {
        /// Occupied cells after the refresh
        assigned: usize,
    },
}

/// Reconciles local grid mutations with the remote store
pub struct PlanSyncController<S: StoreProvider + 'static> {
    store: S,
    user_id: Uuid,
    grid: Arc<RwLock<MealPlanGrid>>,
    in_flight: Arc<DashMap<OpKey, Instant>>,
    suppression_window: Duration,
    write_timeout: Duration,
    status: broadcast::Sender<SyncStatus>,
    feed_task: Option<JoinHandle<()>>,
}

impl<S: StoreProvider + 'static> PlanSyncController<S> {
    /// Create a controller for one signed-in user
    #[must_use]
    pub fn new(store: S, user_id: Uuid, config: &PlannerConfig) -> Self {
        let (status, _) = broadcast::channel(STATUS_CHANNEL_SIZE);
        Self {
            store,
            user_id,
            grid: Arc::new(RwLock::new(MealPlanGrid::new())),
            in_flight: Arc::new(DashMap::new()),
            suppression_window: config.sync.suppression_window,
            write_timeout: config.store.write_timeout,
            status,
            feed_task: None,
        }
    }

    /// Shared handle to the grid the UI renders
    #[must_use]
    pub fn grid(&self) -> Arc<RwLock<MealPlanGrid>> {
        self.grid.clone()
    }

    /// Subscribe to transient status events
    #[must_use]
    pub fn subscribe_status(&self) -> broadcast::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Assign a recipe to a cell: optimistic grid write, then a mirrored
    /// remote upsert from a background task
    pub async fn assign(&self, day: Day, slot: MealSlot, cell: PlanCellRef) {
        self.grid.write().await.set_cell(day, slot, Some(cell.clone()));
        self.mark_in_flight(OpKey::Cell(day, slot));

        let store = self.store.clone();
        let user_id = self.user_id;
        let status = self.status.clone();
        let in_flight = self.in_flight.clone();
        let write_timeout = self.write_timeout;
        tokio::spawn(async move {
            let result = tokio::time::timeout(
                write_timeout,
                store.plan_upsert(user_id, day, slot, &cell),
            )
            .await;
            settle_write(&result, OpKey::Cell(day, slot), &in_flight, &status, "save meal");
        });
    }

    /// Clear a cell: optimistic grid write, then a mirrored remote delete
    pub async fn clear(&self, day: Day, slot: MealSlot) {
        self.grid.write().await.clear_cell(day, slot);
        self.mark_in_flight(OpKey::Cell(day, slot));

        let store = self.store.clone();
        let user_id = self.user_id;
        let status = self.status.clone();
        let in_flight = self.in_flight.clone();
        let write_timeout = self.write_timeout;
        tokio::spawn(async move {
            let result =
                tokio::time::timeout(write_timeout, store.plan_delete(user_id, day, slot)).await;
            settle_write(&result, OpKey::Cell(day, slot), &in_flight, &status, "clear meal");
        });
    }

    /// Clear the whole plan
    pub async fn clear_all(&self) {
        self.grid.write().await.clear_all();
        self.mark_in_flight(OpKey::All);

        let store = self.store.clone();
        let user_id = self.user_id;
        let status = self.status.clone();
        let in_flight = self.in_flight.clone();
        let write_timeout = self.write_timeout;
        tokio::spawn(async move {
            let result = tokio::time::timeout(write_timeout, store.plan_delete_all(user_id)).await;
            settle_write(&result, OpKey::All, &in_flight, &status, "clear plan");
        });
    }

    /// Move a cell onto another, swapping when the destination is occupied.
    ///
    /// The grid mutation is a single logical operation; the remote mirror
    /// issues the resulting upserts and deletes from one background task.
    pub async fn move_or_swap(
        &self,
        from_day: Day,
        from_slot: MealSlot,
        to_day: Day,
        to_slot: MealSlot,
    ) {
        if from_day == to_day && from_slot == to_slot {
            return;
        }
        let (source_after, destination_after) = {
            let mut grid = self.grid.write().await;
            grid.move_or_swap(from_day, from_slot, to_day, to_slot);
            (
                grid.cell(from_day, from_slot).cloned(),
                grid.cell(to_day, to_slot).cloned(),
            )
        };
        self.mark_in_flight(OpKey::Cell(from_day, from_slot));
        self.mark_in_flight(OpKey::Cell(to_day, to_slot));

        let store = self.store.clone();
        let user_id = self.user_id;
        let status = self.status.clone();
        let in_flight = self.in_flight.clone();
        let write_timeout = self.write_timeout;
        tokio::spawn(async move {
            let mirror = async {
                match &destination_after {
                    Some(cell) => store.plan_upsert(user_id, to_day, to_slot, cell).await?,
                    None => store.plan_delete(user_id, to_day, to_slot).await?,
                }
                match &source_after {
                    // occupied source after the move means a swap happened
                    Some(cell) => store.plan_upsert(user_id, from_day, from_slot, cell).await,
                    None => store.plan_delete(user_id, from_day, from_slot).await,
                }
            };
            let result = tokio::time::timeout(write_timeout, mirror).await;
            if !matches!(result, Ok(Ok(()))) {
                in_flight.remove(&OpKey::Cell(from_day, from_slot));
                in_flight.remove(&OpKey::Cell(to_day, to_slot));
            }
            report_write_result(&result, &status, "move meal");
        });
    }

    /// Replace the entire local grid with the remote plan.
    ///
    /// Used after sign-in and on the manual refresh action; this is the
    /// only divergence repair the client performs.
    ///
    /// # Errors
    ///
    /// Returns the store error when the remote read fails
    pub async fn refresh(&self) -> crate::errors::AppResult<()> {
        let cells = self.store.plan_list(self.user_id).await?;
        let mut fresh = MealPlanGrid::new();
        for (day, slot, cell) in cells {
            fresh.set_cell(day, slot, Some(cell));
        }
        let assigned = fresh.assigned_count();
        *self.grid.write().await = fresh;
        info!(assigned, "plan refreshed from store");
        let _ = self.status.send(SyncStatus::Refreshed { assigned });
        Ok(())
    }

    /// Start consuming the store's change feed for this user.
    ///
    /// The consumer task is aborted on drop, which is the unsubscribe
    /// guarantee for the feed.
    ///
    /// # Errors
    ///
    /// Returns the store error when the subscription cannot be created
    pub async fn start_feed(&mut self) -> crate::errors::AppResult<()> {
        let mut receiver = self.store.plan_subscribe(self.user_id).await?;
        let grid = self.grid.clone();
        let in_flight = self.in_flight.clone();
        let suppression_window = self.suppression_window;
        let status = self.status.clone();

        let task = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(change) => {
                        apply_remote_change(
                            &grid,
                            &in_flight,
                            suppression_window,
                            &status,
                            change,
                        )
                        .await;
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        warn!(missed, "plan feed lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("plan feed closed");
                        break;
                    }
                }
            }
        });
        if let Some(previous) = self.feed_task.replace(task) {
            previous.abort();
        }
        Ok(())
    }

    /// Stop consuming the change feed
    pub fn stop_feed(&mut self) {
        if let Some(task) = self.feed_task.take() {
            task.abort();
        }
    }

    fn mark_in_flight(&self, key: OpKey) {
        self.in_flight.insert(key, Instant::now());
    }
}

impl<S: StoreProvider + 'static> Drop for PlanSyncController<S> {
    fn drop(&mut self) {
        self.stop_feed();
    }
}

/// Report the outcome of a settled write and manage its marker.
///
/// A successful write keeps its marker until the bounded window expires:
/// the echo may still be queued behind the settle, and it must not
/// replay as a remote change. A failed or timed-out write produces no
/// echo, so its marker clears immediately and a genuinely remote event
/// for that cell applies without delay.
fn settle_write(
    result: &Result<crate::errors::AppResult<()>, tokio::time::error::Elapsed>,
    key: OpKey,
    in_flight: &DashMap<OpKey, Instant>,
    status: &broadcast::Sender<SyncStatus>,
    action: &str,
) {
    if !matches!(result, Ok(Ok(()))) {
        in_flight.remove(&key);
    }
    report_write_result(result, status, action);
}

fn report_write_result(
    result: &Result<crate::errors::AppResult<()>, tokio::time::error::Elapsed>,
    status: &broadcast::Sender<SyncStatus>,
    action: &str,
) {
    let detail = match result {
        Ok(Ok(())) => return,
        Ok(Err(e)) => format!("could not {action}: {e}"),
        Err(_) => format!("could not {action}: the request timed out"),
    };
    warn!(%detail, "remote plan write failed, keeping optimistic state");
    let _ = status.send(SyncStatus::WriteFailed { detail });
}

/// Replay one feed event onto the grid unless it is a fresh self-echo.
///
/// Echoes that slip past a cleared marker replay idempotently: a replay
/// that leaves the grid unchanged emits no status, so it cannot flicker
/// the UI either.
async fn apply_remote_change(
    grid: &Arc<RwLock<MealPlanGrid>>,
    in_flight: &DashMap<OpKey, Instant>,
    suppression_window: Duration,
    status: &broadcast::Sender<SyncStatus>,
    change: PlanChange,
) {
    let key = match &change {
        PlanChange::Upserted { day, slot, .. } | PlanChange::Deleted { day, slot } => {
            OpKey::Cell(*day, *slot)
        }
        PlanChange::AllDeleted => OpKey::All,
    };

    if is_suppressed(in_flight, key, suppression_window) {
        debug!(?key, "suppressed self-echo feed event");
        return;
    }

    let changed = {
        let mut grid = grid.write().await;
        match change {
            PlanChange::Upserted { day, slot, cell } => {
                grid.set_cell(day, slot, Some(cell.clone())) != Some(cell)
            }
            PlanChange::Deleted { day, slot } => grid.clear_cell(day, slot).is_some(),
            PlanChange::AllDeleted => {
                let assigned = grid.assigned_count();
                grid.clear_all();
                assigned > 0
            }
        }
    };
    if changed {
        let _ = status.send(SyncStatus::RemoteChangeApplied);
    }
}

/// True while a fresh marker exists for the key; stale markers are
/// dropped on sight so suppression cannot outlive the window
fn is_suppressed(
    in_flight: &DashMap<OpKey, Instant>,
    key: OpKey,
    suppression_window: Duration,
) -> bool {
    let fresh = in_flight
        .get(&key)
        .is_some_and(|marked_at| marked_at.elapsed() < suppression_window);
    if !fresh {
        in_flight.remove(&key);
    }
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppression_marker_expiry() {
        let map: DashMap<OpKey, Instant> = DashMap::new();
        let key = OpKey::Cell(Day::Monday, MealSlot::Lunch);
        let window = Duration::from_millis(1_500);

        // absent marker suppresses nothing
        assert!(!is_suppressed(&map, key, window));

        // a fresh marker suppresses every echo within the window
        map.insert(key, Instant::now());
        assert!(is_suppressed(&map, key, window));
        assert!(is_suppressed(&map, key, window));

        // a stale marker is dropped without suppressing
        map.insert(key, Instant::now() - Duration::from_secs(5));
        assert!(!is_suppressed(&map, key, window));
        assert!(map.is_empty());
    }
}
