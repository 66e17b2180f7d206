// ABOUTME: Core data models for the Remy meal planning client
// ABOUTME: Re-exports recipe, pantry, plan, and user data structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

/// Pantry item and category models
pub mod pantry;
/// Meal plan grid coordinate and cell models
pub mod plan;
/// Recipe and annotated recipe models
pub mod recipe;
/// User profile, favorites, and meal tracking models
pub mod user;

pub use pantry::{PantryCategory, PantryItem};
pub use plan::{Day, MealSlot, MealStatus, MealTrackingEntry, PlanCellRef, PlanChange};
pub use recipe::{AnnotatedRecipe, Ingredient, Nutrient, Recipe};
pub use user::{FavoriteEntry, MacroTargets, UserProfile};
