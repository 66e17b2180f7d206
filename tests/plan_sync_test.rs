// ABOUTME: Integration tests for the plan sync controller
// ABOUTME: Optimistic writes, self-echo suppression, remote event replay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

mod common;

use anyhow::Result;
use common::{init_test_logging, test_config, wait_for};
use remy_meal_planner::models::{Day, MealSlot, PlanCellRef};
use remy_meal_planner::plan::{PlanSyncController, SyncStatus};
use remy_meal_planner::store::memory::MemoryStore;
use remy_meal_planner::store::StoreProvider;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

fn cell(id: &str) -> PlanCellRef {
    PlanCellRef::new(id, format!("Recipe {id}"))
}

async fn controller_with_feed(
    store: &MemoryStore,
    user_id: Uuid,
) -> Result<PlanSyncController<MemoryStore>> {
    let mut controller = PlanSyncController::new(store.clone(), user_id, &test_config());
    controller.start_feed().await?;
    Ok(controller)
}

async fn store_has_cell(store: MemoryStore, user_id: Uuid, day: Day, slot: MealSlot) -> bool {
    store
        .plan_list(user_id)
        .await
        .map(|cells| cells.iter().any(|(d, s, _)| *d == day && *s == slot))
        .unwrap_or(false)
}

async fn store_lacks_cell(store: MemoryStore, user_id: Uuid, day: Day, slot: MealSlot) -> bool {
    !store_has_cell(store, user_id, day, slot).await
}

async fn store_is_empty(store: MemoryStore, user_id: Uuid) -> bool {
    store
        .plan_list(user_id)
        .await
        .is_ok_and(|cells| cells.is_empty())
}

/// Await a status event matching the predicate, bounded by a deadline
async fn await_status(
    status: &mut broadcast::Receiver<SyncStatus>,
    matches: fn(&SyncStatus) -> bool,
) -> bool {
    tokio::time::timeout(Duration::from_secs(3), async {
        loop {
            match status.recv().await {
                Ok(event) if matches(&event) => return true,
                Ok(_) => {}
                Err(_) => return false,
            }
        }
    })
    .await
    .unwrap_or(false)
}

#[tokio::test]
async fn test_assign_mirrors_to_store() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;

    controller.assign(Day::Monday, MealSlot::Lunch, cell("r1")).await;

    // optimistic: the grid has the value before the mirror settles
    assert_eq!(
        controller.grid().read().await.cell(Day::Monday, MealSlot::Lunch),
        Some(&cell("r1"))
    );

    assert!(
        wait_for(|| store_has_cell(store.clone(), user_id, Day::Monday, MealSlot::Lunch)).await,
        "mirror write never reached the store"
    );
    Ok(())
}

#[tokio::test]
async fn test_clear_mirrors_delete() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;

    controller.assign(Day::Tuesday, MealSlot::Dinner, cell("r1")).await;
    assert!(wait_for(|| store_has_cell(store.clone(), user_id, Day::Tuesday, MealSlot::Dinner)).await);

    controller.clear(Day::Tuesday, MealSlot::Dinner).await;
    assert_eq!(
        controller.grid().read().await.cell(Day::Tuesday, MealSlot::Dinner),
        None
    );
    assert!(
        wait_for(|| store_lacks_cell(store.clone(), user_id, Day::Tuesday, MealSlot::Dinner))
            .await,
        "mirror delete never reached the store"
    );
    Ok(())
}

#[tokio::test]
async fn test_self_echo_is_suppressed() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;
    let mut status = controller.subscribe_status();

    // two sequential writes to the same cell: neither echo may surface
    // as a remote change
    controller.assign(Day::Monday, MealSlot::Lunch, cell("r1")).await;
    controller.assign(Day::Monday, MealSlot::Lunch, cell("r2")).await;
    assert!(wait_for(|| store_has_cell(store.clone(), user_id, Day::Monday, MealSlot::Lunch)).await);

    // give the feed task time to drain both echoes
    tokio::time::sleep(Duration::from_millis(100)).await;
    loop {
        match status.try_recv() {
            Ok(SyncStatus::RemoteChangeApplied) => {
                panic!("self-echo surfaced as a remote change")
            }
            Ok(_) => {}
            Err(TryRecvError::Empty) => break,
            Err(e) => panic!("status channel broken: {e}"),
        }
    }

    // the optimistic value survived its own echoes
    assert_eq!(
        controller.grid().read().await.cell(Day::Monday, MealSlot::Lunch),
        Some(&cell("r2"))
    );
    Ok(())
}

#[tokio::test]
async fn test_external_change_is_applied() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;
    let mut status = controller.subscribe_status();

    // a write from another device of the same user
    store
        .plan_upsert(user_id, Day::Sunday, MealSlot::Breakfast, &cell("other"))
        .await?;

    assert!(
        await_status(&mut status, |event| matches!(
            event,
            SyncStatus::RemoteChangeApplied
        ))
        .await,
        "external change never surfaced"
    );
    assert_eq!(
        controller
            .grid()
            .read()
            .await
            .cell(Day::Sunday, MealSlot::Breakfast),
        Some(&cell("other"))
    );
    Ok(())
}

#[tokio::test]
async fn test_failed_write_keeps_optimistic_state() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;
    let mut status = controller.subscribe_status();

    store.set_fail_writes(true);
    controller.assign(Day::Wednesday, MealSlot::Lunch, cell("r1")).await;

    assert!(
        await_status(&mut status, |event| matches!(
            event,
            SyncStatus::WriteFailed { .. }
        ))
        .await,
        "write failure never surfaced"
    );
    // the grid keeps the optimistic value, the store has nothing
    assert_eq!(
        controller.grid().read().await.cell(Day::Wednesday, MealSlot::Lunch),
        Some(&cell("r1"))
    );
    assert!(store.plan_list(user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_move_or_swap_mirrors_both_cells() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;

    controller.assign(Day::Monday, MealSlot::Lunch, cell("a")).await;
    controller.assign(Day::Friday, MealSlot::Dinner, cell("b")).await;
    assert!(wait_for(|| store_has_cell(store.clone(), user_id, Day::Friday, MealSlot::Dinner)).await);

    controller
        .move_or_swap(Day::Monday, MealSlot::Lunch, Day::Friday, MealSlot::Dinner)
        .await;

    // grid swapped immediately
    {
        let grid = controller.grid();
        let grid = grid.read().await;
        assert_eq!(grid.cell(Day::Monday, MealSlot::Lunch), Some(&cell("b")));
        assert_eq!(grid.cell(Day::Friday, MealSlot::Dinner), Some(&cell("a")));
    }

    // store converges to the same exchange
    assert!(
        wait_for(|| {
            let store = store.clone();
            async move {
                store.plan_list(user_id).await.is_ok_and(|cells| {
                    cells.contains(&(Day::Monday, MealSlot::Lunch, cell("b")))
                        && cells.contains(&(Day::Friday, MealSlot::Dinner, cell("a")))
                })
            }
        })
        .await,
        "swap never converged in the store"
    );
    Ok(())
}

#[tokio::test]
async fn test_refresh_replaces_grid() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();

    store
        .plan_upsert(user_id, Day::Thursday, MealSlot::Breakfast, &cell("remote"))
        .await?;

    let controller = PlanSyncController::new(store.clone(), user_id, &test_config());
    let mut status = controller.subscribe_status();

    // a stale local-only value (its mirror write fails) that the
    // refresh must drop
    store.set_fail_writes(true);
    controller.assign(Day::Monday, MealSlot::Lunch, cell("stale")).await;
    assert!(
        await_status(&mut status, |event| matches!(
            event,
            SyncStatus::WriteFailed { .. }
        ))
        .await
    );
    store.set_fail_writes(false);

    controller.refresh().await?;
    let grid = controller.grid();
    let grid = grid.read().await;
    assert_eq!(
        grid.cell(Day::Thursday, MealSlot::Breakfast),
        Some(&cell("remote"))
    );
    assert_eq!(grid.assigned_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_clear_all_empties_grid_and_store() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let user_id = Uuid::new_v4();
    let controller = controller_with_feed(&store, user_id).await?;

    controller.assign(Day::Monday, MealSlot::Lunch, cell("a")).await;
    controller.assign(Day::Sunday, MealSlot::Dinner, cell("b")).await;
    assert!(wait_for(|| store_has_cell(store.clone(), user_id, Day::Sunday, MealSlot::Dinner)).await);

    controller.clear_all().await;
    assert_eq!(controller.grid().read().await.assigned_count(), 0);
    assert!(
        wait_for(|| store_is_empty(store.clone(), user_id)).await,
        "clear-all never reached the store"
    );
    Ok(())
}
