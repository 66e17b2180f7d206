// ABOUTME: User profile, dietary preferences, favorites, and macro targets
// ABOUTME: Profile data is a read-only input to the compatibility scorer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Protein target
    pub protein_g: f64,
    /// Carbohydrate target
    pub carbs_g: f64,
    /// Fat target
    pub fat_g: f64,
}

/// User profile and dietary preferences.
///
/// Owned by the auth/store collaborators; the scorer only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Preferred diet tag (vegetarian, vegan, ...), matched against
    /// recipe diet tags
    #[serde(default)]
    pub diet: Option<String>,
    /// Daily calorie goal
    #[serde(default)]
    pub calorie_goal: Option<f64>,
    /// Comma-separated allergen list as typed by the user
    #[serde(default)]
    pub allergies: Option<String>,
    /// Preferred cuisines
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
    /// Optional macro targets
    #[serde(default)]
    pub macro_targets: Option<MacroTargets>,
}

impl UserProfile {
    /// Allergen tokens: comma-split, trimmed, lowercased, empties dropped
    #[must_use]
    pub fn allergen_tokens(&self) -> Vec<String> {
        self.allergies
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect()
    }
}

/// A favorited recipe, unique per (user, recipe)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Owning user
    pub user_id: Uuid,
    /// Catalog recipe id
    pub recipe_id: String,
    /// Display title
    pub title: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}
