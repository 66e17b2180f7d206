// ABOUTME: Integration tests for favorites, meal tracking, and profile ops
// ABOUTME: Identity-requiring writes refuse locally without a session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

mod common;

use anyhow::Result;
use common::{create_signed_in_planner, create_test_planner};
use remy_meal_planner::errors::ErrorCode;
use remy_meal_planner::models::{Day, MealSlot, MealStatus, Recipe, UserProfile};

#[tokio::test]
async fn test_identity_writes_refused_without_session() -> Result<()> {
    let planner = create_test_planner()?;
    let recipe = Recipe::new("r1", "Stew");

    let err = planner.favorites_add(&recipe).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
    assert!(err.message.contains("log in"));

    let err = planner
        .track_meal(Day::Monday, MealSlot::Lunch, MealStatus::Made)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);

    let err = planner.profile_save(UserProfile::default()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
    Ok(())
}

#[tokio::test]
async fn test_favorites_roundtrip_and_uniqueness() -> Result<()> {
    let (planner, _session) = create_signed_in_planner().await?;
    let mut recipe = Recipe::new("r1", "Stew");
    recipe.image = Some("https://img.example.com/stew.jpg".into());

    planner.favorites_add(&recipe).await?;
    // favoriting twice must not duplicate the entry
    planner.favorites_add(&recipe).await?;

    let favorites = planner.favorites_list().await?;
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].recipe_id, "r1");
    assert_eq!(favorites[0].title, "Stew");

    planner.favorites_remove("r1").await?;
    assert!(planner.favorites_list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_meal_tracking_roundtrip() -> Result<()> {
    let (planner, _session) = create_signed_in_planner().await?;

    planner
        .track_meal(Day::Monday, MealSlot::Breakfast, MealStatus::Made)
        .await?;
    planner
        .track_meal(Day::Monday, MealSlot::Breakfast, MealStatus::Eaten)
        .await?;
    planner
        .track_meal(Day::Friday, MealSlot::Dinner, MealStatus::Made)
        .await?;

    let tracked = planner.tracking_list().await?;
    assert_eq!(tracked.len(), 2);
    // the second upsert for the same (day, slot) won
    let monday = tracked
        .iter()
        .find(|e| e.day == Day::Monday && e.slot == MealSlot::Breakfast)
        .expect("monday entry");
    assert_eq!(monday.status, MealStatus::Eaten);
    Ok(())
}

#[tokio::test]
async fn test_profile_validation_rejects_before_network() -> Result<()> {
    let (planner, _session) = create_signed_in_planner().await?;
    let err = planner
        .profile_save(UserProfile {
            calorie_goal: Some(50.0),
            ..UserProfile::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    // nothing was stored
    assert_eq!(planner.profile_load().await?, None);
    Ok(())
}

#[tokio::test]
async fn test_profile_roundtrip_feeds_scoring() -> Result<()> {
    let (planner, _session) = create_signed_in_planner().await?;
    let profile = UserProfile {
        diet: Some("vegan".into()),
        calorie_goal: Some(2000.0),
        allergies: Some("nuts, dairy".into()),
        ..UserProfile::default()
    };
    planner.profile_save(profile.clone()).await?;

    let loaded = planner.profile_load().await?;
    assert_eq!(loaded, Some(profile));
    Ok(())
}
