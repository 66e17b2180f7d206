// ABOUTME: Pure compatibility scoring of recipes against pantry and profile
// ABOUTME: Produces AnnotatedRecipe with match, diet, allergen, calorie flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Recipe Compatibility Scorer
//!
//! Maps `(recipe, pantry items, profile)` to an [`AnnotatedRecipe`]. The
//! transform is pure: no network, no persistence, no state carried between
//! invocations, so it is safe to rerun on every render tick.

use crate::constants::CALORIE_TOLERANCE_FACTOR;
use crate::models::{AnnotatedRecipe, PantryItem, Recipe, UserProfile};

/// Annotate a single recipe against the pantry and profile
#[must_use]
pub fn annotate(
    recipe: &Recipe,
    pantry: &[PantryItem],
    profile: Option<&UserProfile>,
) -> AnnotatedRecipe {
    let (pantry_compatible, missing_ingredients, pantry_match_percentage) =
        score_pantry(recipe, pantry);
    let matches_user_diet = matches_diet(recipe, profile);
    let contains_allergens = contains_allergens(recipe, profile);
    let (within_calorie_target, calorie_target_diff) = score_calories(recipe, profile);

    AnnotatedRecipe {
        recipe: recipe.clone(),
        pantry_compatible,
        missing_ingredients,
        pantry_match_percentage,
        matches_user_diet,
        contains_allergens,
        within_calorie_target,
        calorie_target_diff,
    }
}

/// Annotate a whole result list, preserving catalog order
#[must_use]
pub fn annotate_all(
    recipes: &[Recipe],
    pantry: &[PantryItem],
    profile: Option<&UserProfile>,
) -> Vec<AnnotatedRecipe> {
    recipes
        .iter()
        .map(|recipe| annotate(recipe, pantry, profile))
        .collect()
}

/// Bidirectional case-insensitive substring match between an ingredient
/// name and a pantry item name.
///
/// "chicken" on hand covers "chicken breast" in a recipe, and a pantry
/// entry "chicken breast" covers a recipe's plain "chicken".
fn ingredient_matches(ingredient_name: &str, pantry_name: &str) -> bool {
    let ingredient = ingredient_name.to_lowercase();
    let pantry = pantry_name.to_lowercase();
    ingredient.contains(&pantry) || pantry.contains(&ingredient)
}

fn score_pantry(recipe: &Recipe, pantry: &[PantryItem]) -> (bool, Vec<String>, u8) {
    if recipe.ingredients.is_empty() {
        // An ingredient-less recipe cannot be cooked from the pantry
        return (false, Vec::new(), 0);
    }

    let mut missing = Vec::new();
    let mut matched = 0_usize;
    for ingredient in &recipe.ingredients {
        let covered = pantry
            .iter()
            .any(|item| ingredient_matches(&ingredient.name, &item.name));
        if covered {
            matched += 1;
        } else {
            missing.push(ingredient.name.clone());
        }
    }

    let total = recipe.ingredients.len();
    let percentage = ((matched as f64 / total as f64) * 100.0).round() as u8;
    (missing.is_empty(), missing, percentage)
}

fn matches_diet(recipe: &Recipe, profile: Option<&UserProfile>) -> bool {
    match profile.and_then(|p| p.diet.as_deref()) {
        Some(diet) if !diet.trim().is_empty() => recipe
            .diets
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(diet.trim())),
        _ => true,
    }
}

fn contains_allergens(recipe: &Recipe, profile: Option<&UserProfile>) -> bool {
    let tokens = match profile {
        Some(p) => p.allergen_tokens(),
        None => return false,
    };
    if tokens.is_empty() {
        return false;
    }
    recipe.ingredients.iter().any(|ingredient| {
        let name = ingredient.name.to_lowercase();
        tokens.iter().any(|token| {
            // A plural token still has to flag its singular occurrences:
            // "nuts" must catch "peanut butter"
            let stem = token.strip_suffix('s').unwrap_or(token);
            name.contains(stem)
        })
    })
}

fn score_calories(recipe: &Recipe, profile: Option<&UserProfile>) -> (bool, Option<f64>) {
    let goal = profile.and_then(|p| p.calorie_goal);
    let calories = recipe.calories_value();
    match (goal, calories) {
        (Some(goal), Some(calories)) => (
            calories <= goal * CALORIE_TOLERANCE_FACTOR,
            Some(calories - goal),
        ),
        _ => (true, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;

    fn recipe_with_ingredients(names: &[&str]) -> Recipe {
        let mut recipe = Recipe::new("r1", "Test Dish");
        recipe.ingredients = names.iter().map(|n| Ingredient::named(*n)).collect();
        recipe
    }

    fn pantry_of(names: &[&str]) -> Vec<PantryItem> {
        names
            .iter()
            .map(|n| PantryItem::new(*n, 1.0, "pcs"))
            .collect()
    }

    #[test]
    fn test_full_pantry_match_is_compatible() {
        let recipe = recipe_with_ingredients(&["chicken breast", "rice"]);
        let pantry = pantry_of(&["chicken", "brown rice"]);
        let annotated = annotate(&recipe, &pantry, None);
        assert!(annotated.pantry_compatible);
        assert_eq!(annotated.pantry_match_percentage, 100);
        assert!(annotated.missing_ingredients.is_empty());
    }

    #[test]
    fn test_partial_match_half() {
        let recipe = recipe_with_ingredients(&["chicken breast", "rice"]);
        let pantry = pantry_of(&["chicken breast"]);
        let annotated = annotate(&recipe, &pantry, None);
        assert!(!annotated.pantry_compatible);
        assert_eq!(annotated.pantry_match_percentage, 50);
        assert_eq!(annotated.missing_ingredients, vec!["rice".to_owned()]);
    }

    #[test]
    fn test_bidirectional_substring_match() {
        // pantry name inside ingredient name
        assert!(ingredient_matches("chicken breast", "chicken"));
        // ingredient name inside pantry name
        assert!(ingredient_matches("chicken", "chicken breast"));
        assert!(!ingredient_matches("rice", "chicken"));
    }

    #[test]
    fn test_zero_ingredient_recipe_is_incompatible() {
        let recipe = Recipe::new("r2", "Mystery");
        let annotated = annotate(&recipe, &pantry_of(&["salt"]), None);
        assert!(!annotated.pantry_compatible);
        assert!(annotated.missing_ingredients.is_empty());
        assert_eq!(annotated.pantry_match_percentage, 0);
    }

    #[test]
    fn test_match_percentage_rounds_to_nearest() {
        let recipe = recipe_with_ingredients(&["a", "b", "c"]);
        let pantry = pantry_of(&["a"]);
        // 1 of 3 is 33.33%, rounds to 33
        let annotated = annotate(&recipe, &pantry, None);
        assert_eq!(annotated.pantry_match_percentage, 33);

        let pantry = pantry_of(&["a", "b"]);
        // 2 of 3 is 66.67%, rounds to 67
        let annotated = annotate(&recipe, &pantry, None);
        assert_eq!(annotated.pantry_match_percentage, 67);
    }

    #[test]
    fn test_diet_matching_defaults_true() {
        let mut recipe = recipe_with_ingredients(&["tofu"]);
        recipe.diets = vec!["Vegan".into()];

        assert!(annotate(&recipe, &[], None).matches_user_diet);

        let no_pref = UserProfile::default();
        assert!(annotate(&recipe, &[], Some(&no_pref)).matches_user_diet);

        let vegan = UserProfile {
            diet: Some("vegan".into()),
            ..UserProfile::default()
        };
        assert!(annotate(&recipe, &[], Some(&vegan)).matches_user_diet);

        let keto = UserProfile {
            diet: Some("ketogenic".into()),
            ..UserProfile::default()
        };
        assert!(!annotate(&recipe, &[], Some(&keto)).matches_user_diet);
    }

    #[test]
    fn test_allergen_substring_detection() {
        let recipe = recipe_with_ingredients(&["peanut butter", "bread"]);
        let profile = UserProfile {
            allergies: Some("nuts, dairy".into()),
            ..UserProfile::default()
        };
        // the plural token "nuts" stems to "nut" and flags "peanut butter"
        let annotated = annotate(&recipe, &[], Some(&profile));
        assert!(annotated.contains_allergens);

        let profile = UserProfile {
            allergies: Some("shellfish".into()),
            ..UserProfile::default()
        };
        let annotated = annotate(&recipe, &[], Some(&profile));
        assert!(!annotated.contains_allergens);
    }

    #[test]
    fn test_calorie_tolerance_boundary() {
        let mut recipe = recipe_with_ingredients(&["x"]);
        let profile = UserProfile {
            calorie_goal: Some(2000.0),
            ..UserProfile::default()
        };

        recipe.calories = Some(2150.0);
        let annotated = annotate(&recipe, &[], Some(&profile));
        assert!(annotated.within_calorie_target);
        assert_eq!(annotated.calorie_target_diff, Some(150.0));

        recipe.calories = Some(2300.0);
        let annotated = annotate(&recipe, &[], Some(&profile));
        assert!(!annotated.within_calorie_target);
        assert_eq!(annotated.calorie_target_diff, Some(300.0));
    }

    #[test]
    fn test_calorie_defaults_when_data_missing() {
        let recipe = recipe_with_ingredients(&["x"]);
        let profile = UserProfile {
            calorie_goal: Some(2000.0),
            ..UserProfile::default()
        };
        let annotated = annotate(&recipe, &[], Some(&profile));
        assert!(annotated.within_calorie_target);
        assert_eq!(annotated.calorie_target_diff, None);
    }
}
