// ABOUTME: Tests for the in-memory store backend and its change feed
// ABOUTME: Per-user partitioning, upsert semantics, feed event shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

mod common;

use anyhow::Result;
use common::init_test_logging;
use remy_meal_planner::models::{Day, FavoriteEntry, MealSlot, PlanCellRef, PlanChange};
use remy_meal_planner::store::memory::MemoryStore;
use remy_meal_planner::store::StoreProvider;
use uuid::Uuid;

#[tokio::test]
async fn test_plan_rows_are_partitioned_per_user() -> Result<()> {
    init_test_logging();
    let store = MemoryStore::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let cell = PlanCellRef::new("r1", "Stew");

    store.plan_upsert(alice, Day::Monday, MealSlot::Lunch, &cell).await?;

    assert_eq!(store.plan_list(alice).await?.len(), 1);
    assert!(store.plan_list(bob).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_plan_upsert_is_last_write_wins() -> Result<()> {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();

    store
        .plan_upsert(user, Day::Monday, MealSlot::Lunch, &PlanCellRef::new("a", "A"))
        .await?;
    store
        .plan_upsert(user, Day::Monday, MealSlot::Lunch, &PlanCellRef::new("b", "B"))
        .await?;

    let cells = store.plan_list(user).await?;
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].2.recipe_id, "b");
    Ok(())
}

#[tokio::test]
async fn test_feed_carries_every_plan_mutation() -> Result<()> {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let mut feed = store.plan_subscribe(user).await?;
    let cell = PlanCellRef::new("r1", "Stew");

    store.plan_upsert(user, Day::Monday, MealSlot::Lunch, &cell).await?;
    store.plan_delete(user, Day::Monday, MealSlot::Lunch).await?;
    store.plan_delete_all(user).await?;

    assert_eq!(
        feed.recv().await?,
        PlanChange::Upserted {
            day: Day::Monday,
            slot: MealSlot::Lunch,
            cell
        }
    );
    assert_eq!(
        feed.recv().await?,
        PlanChange::Deleted {
            day: Day::Monday,
            slot: MealSlot::Lunch
        }
    );
    assert_eq!(feed.recv().await?, PlanChange::AllDeleted);
    Ok(())
}

#[tokio::test]
async fn test_feed_is_per_user() -> Result<()> {
    let store = MemoryStore::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let mut bob_feed = store.plan_subscribe(bob).await?;

    store
        .plan_upsert(alice, Day::Monday, MealSlot::Lunch, &PlanCellRef::new("a", "A"))
        .await?;
    store
        .plan_upsert(bob, Day::Friday, MealSlot::Dinner, &PlanCellRef::new("b", "B"))
        .await?;

    // bob's feed sees only bob's write
    assert_eq!(
        bob_feed.recv().await?,
        PlanChange::Upserted {
            day: Day::Friday,
            slot: MealSlot::Dinner,
            cell: PlanCellRef::new("b", "B")
        }
    );
    assert!(bob_feed.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn test_favorites_unique_per_user_and_recipe() -> Result<()> {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    let entry = FavoriteEntry {
        user_id: user,
        recipe_id: "r1".into(),
        title: "Stew".into(),
        image: None,
    };

    store.favorites_add(&entry).await?;
    let renamed = FavoriteEntry {
        title: "Beef Stew".into(),
        ..entry.clone()
    };
    store.favorites_add(&renamed).await?;

    let favorites = store.favorites_list(user).await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Beef Stew");

    store.favorites_remove(user, "r1").await?;
    assert!(store.favorites_list(user).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_write_fault_injection_spares_reads() -> Result<()> {
    let store = MemoryStore::new();
    let user = Uuid::new_v4();
    store
        .plan_upsert(user, Day::Monday, MealSlot::Lunch, &PlanCellRef::new("a", "A"))
        .await?;

    store.set_fail_writes(true);
    assert!(store
        .plan_upsert(user, Day::Tuesday, MealSlot::Lunch, &PlanCellRef::new("b", "B"))
        .await
        .is_err());
    // reads keep working and show the pre-failure state
    assert_eq!(store.plan_list(user).await?.len(), 1);
    Ok(())
}
