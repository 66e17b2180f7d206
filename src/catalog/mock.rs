// ABOUTME: Deterministic mock catalog for offline mode, development, tests
// ABOUTME: Applies the same query, diet, and calorie semantics as the live path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Mock Recipe Catalog
//!
//! A pre-loaded catalog that requires no network or API key. Unlike the
//! hosted catalog it is fully deterministic, which makes it the offline
//! substitute for read paths and the fixture source in tests. Filtering
//! mirrors the live path exactly: case-insensitive title match for the
//! query, exact diet tag membership, calorie upper bound, then the limit.

use super::{RecipeCatalog, SearchFilters};
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, Nutrient, Recipe};
use async_trait::async_trait;
use std::sync::Arc;

/// Pre-loaded catalog used when the hosted service is unreachable
#[derive(Clone)]
pub struct MockCatalog {
    recipes: Arc<Vec<Recipe>>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self {
            recipes: Arc::new(builtin_recipes()),
        }
    }
}

impl MockCatalog {
    /// Catalog with the built-in demo dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog over a custom dataset
    #[must_use]
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: Arc::new(recipes),
        }
    }

    fn matches(recipe: &Recipe, query: &str, filters: &SearchFilters) -> bool {
        let query = query.trim().to_lowercase();
        if !query.is_empty() && !recipe.title.to_lowercase().contains(&query) {
            return false;
        }
        if let Some(diet) = filters.diet.as_deref() {
            if !diet.trim().is_empty()
                && !recipe
                    .diets
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(diet.trim()))
            {
                return false;
            }
        }
        if let Some(max_calories) = filters.max_calories {
            match recipe.calories_value() {
                Some(calories) if calories <= max_calories => {}
                _ => return false,
            }
        }
        true
    }
}

#[async_trait]
impl RecipeCatalog for MockCatalog {
    async fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        limit: usize,
    ) -> AppResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|recipe| Self::matches(recipe, query, filters))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Recipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("recipe {id}")))
    }
}

fn demo_recipe(
    id: &str,
    title: &str,
    calories: f64,
    diets: &[&str],
    ingredients: &[&str],
) -> Recipe {
    let mut recipe = Recipe::new(id, title);
    recipe.calories = Some(calories);
    recipe.servings = Some(2);
    recipe.ready_in_minutes = Some(30);
    recipe.source_name = Some("Remy Demo Kitchen".into());
    recipe.diets = diets.iter().map(|d| (*d).to_owned()).collect();
    recipe.ingredients = ingredients.iter().map(|i| Ingredient::named(*i)).collect();
    recipe.nutrients = vec![Nutrient {
        name: "Calories".into(),
        amount: calories,
        unit: "kcal".into(),
    }];
    recipe.instructions = vec![
        "Prepare the ingredients.".into(),
        "Cook and season to taste.".into(),
        "Plate and serve.".into(),
    ];
    recipe
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        demo_recipe(
            "mock-1",
            "Grilled Chicken with Rice",
            620.0,
            &[],
            &["chicken breast", "rice", "olive oil", "garlic"],
        ),
        demo_recipe(
            "mock-2",
            "Vegetable Stir Fry",
            410.0,
            &["vegan", "vegetarian"],
            &["broccoli", "carrot", "soy sauce", "rice"],
        ),
        demo_recipe(
            "mock-3",
            "Creamy Tomato Pasta",
            750.0,
            &["vegetarian"],
            &["pasta", "tomato", "cream", "garlic", "basil"],
        ),
        demo_recipe(
            "mock-4",
            "Salmon and Quinoa Bowl",
            540.0,
            &["pescetarian", "gluten free"],
            &["salmon", "quinoa", "spinach", "lemon"],
        ),
        demo_recipe(
            "mock-5",
            "Peanut Butter Banana Toast",
            380.0,
            &["vegetarian"],
            &["bread", "peanut butter", "banana", "honey"],
        ),
        demo_recipe(
            "mock-6",
            "Chicken Caesar Salad",
            460.0,
            &[],
            &["chicken breast", "lettuce", "parmesan cheese", "croutons"],
        ),
        demo_recipe(
            "mock-7",
            "Mushroom Omelette",
            320.0,
            &["vegetarian", "gluten free"],
            &["eggs", "mushroom", "cheese", "butter"],
        ),
        demo_recipe(
            "mock-8",
            "Beef Tacos",
            680.0,
            &[],
            &["ground beef", "tortilla", "onion", "tomato", "cheddar cheese"],
        ),
    ]
}
