// ABOUTME: Stable ordering of annotated recipes by compatibility signals
// ABOUTME: Precedence is allergens, diet, full pantry match, match percentage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Recipe Ranker
//!
//! A stable total ordering over annotated recipes. The precedence encodes
//! safety before dietary fit before availability: allergen-free recipes
//! always rank above flagged ones, then diet matches, then fully
//! pantry-compatible recipes, then higher partial match percentages.
//! Everything still tied keeps its original catalog order.

use crate::models::AnnotatedRecipe;
use std::cmp::Ordering;

/// Compare two annotated recipes by the fixed signal precedence
#[must_use]
pub fn compare(a: &AnnotatedRecipe, b: &AnnotatedRecipe) -> Ordering {
    // false (no allergens) sorts before true
    a.contains_allergens
        .cmp(&b.contains_allergens)
        // true (diet match) sorts before false
        .then_with(|| b.matches_user_diet.cmp(&a.matches_user_diet))
        // true (fully compatible) sorts before false
        .then_with(|| b.pantry_compatible.cmp(&a.pantry_compatible))
        // higher match percentage first
        .then_with(|| b.pantry_match_percentage.cmp(&a.pantry_match_percentage))
}

/// Rank a result list in place; stable, so catalog order breaks ties
pub fn rank(recipes: &mut [AnnotatedRecipe]) {
    recipes.sort_by(compare);
}
