// ABOUTME: Recipe data models normalized from the recipe catalog service
// ABOUTME: Recipe, Ingredient, Nutrient, and the derived AnnotatedRecipe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Free-text ingredient name, the pantry match key
    pub name: String,
    /// Amount in the given unit, when the catalog provides one
    #[serde(default)]
    pub amount: Option<f64>,
    /// Free-text unit (grams, cups, pieces)
    #[serde(default)]
    pub unit: Option<String>,
}

impl Ingredient {
    /// Create an ingredient from a bare name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: None,
            unit: None,
        }
    }
}

/// A nutrient entry from the catalog's nutrition table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    /// Nutrient name (Calories, Protein, Fat, ...)
    pub name: String,
    /// Amount in the given unit
    pub amount: f64,
    /// Unit string (kcal, g, mg)
    pub unit: String,
}

/// Normalized recipe as returned by the catalog service or the cache.
///
/// Immutable once fetched; derived compatibility data lives on
/// [`AnnotatedRecipe`], never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Catalog identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Calories per serving, when the catalog surfaces it top-level
    #[serde(default)]
    pub calories: Option<f64>,
    /// Number of servings
    #[serde(default)]
    pub servings: Option<u32>,
    /// Total time until ready, in minutes
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time: Option<u32>,
    /// Link to the original recipe
    #[serde(default)]
    pub source_url: Option<String>,
    /// Name of the original publisher
    #[serde(default)]
    pub source_name: Option<String>,
    /// Dish type tags (main course, dessert, ...)
    #[serde(default)]
    pub dish_types: Vec<String>,
    /// Diet tags (vegetarian, vegan, gluten free, ...)
    #[serde(default)]
    pub diets: Vec<String>,
    /// Nutrition table
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Step-by-step instructions
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Minimal recipe with just an id and title, everything else empty
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image: None,
            calories: None,
            servings: None,
            ready_in_minutes: None,
            prep_time: None,
            cook_time: None,
            source_url: None,
            source_name: None,
            dish_types: Vec::new(),
            diets: Vec::new(),
            nutrients: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Calories per serving, falling back to the nutrition table when the
    /// top-level field is absent (some catalog payloads only carry the table)
    #[must_use]
    pub fn calories_value(&self) -> Option<f64> {
        self.calories.or_else(|| {
            self.nutrients
                .iter()
                .find(|n| n.name.eq_ignore_ascii_case("calories"))
                .map(|n| n.amount)
        })
    }
}

/// A recipe annotated with derived compatibility data.
///
/// Every field besides `recipe` is a pure function of
/// (recipe, pantry, profile) and is recomputed whenever any of those
/// change; annotations are never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRecipe {
    /// The underlying recipe
    pub recipe: Recipe,
    /// True when every ingredient matched a pantry item
    pub pantry_compatible: bool,
    /// Ingredient names with no pantry match
    pub missing_ingredients: Vec<String>,
    /// Share of ingredients covered by the pantry, 0-100
    pub pantry_match_percentage: u8,
    /// True when the recipe carries the user's diet tag
    /// (or no preference is set)
    pub matches_user_diet: bool,
    /// True when any ingredient contains a declared allergen
    pub contains_allergens: bool,
    /// True when calories fit the goal with a 10% tolerance
    /// (or no goal is set)
    pub within_calorie_target: bool,
    /// Signed calories-minus-goal difference, when both are known
    pub calorie_target_diff: Option<f64>,
}
