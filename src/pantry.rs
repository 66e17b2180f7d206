// ABOUTME: In-memory pantry collection with ordered entries and categorization
// ABOUTME: Mutations are optimistic; persistence is layered on by the planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Pantry Model
//!
//! The user's on-hand ingredient inventory, ordered most-recent-first.
//! All operations are synchronous in-memory mutations; the planner service
//! mirrors them to the store (or local storage) best-effort afterwards, so
//! the UI always reflects the state held here.

use crate::constants::taxonomy::CATEGORY_KEYWORDS;
use crate::errors::{AppError, AppResult};
use crate::models::{pantry::coerce_quantity, PantryCategory, PantryItem};
use uuid::Uuid;

/// Partial update applied to an existing pantry item
#[derive(Debug, Clone, Default)]
pub struct PantryItemPatch {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement quantity, coerced to non-negative
    pub quantity: Option<f64>,
    /// Replacement unit
    pub unit: Option<String>,
}

/// Ordered collection of the user's pantry items
#[derive(Debug, Clone, Default)]
pub struct PantryModel {
    items: Vec<PantryItem>,
}

impl PantryModel {
    /// Empty pantry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pantry pre-seeded with items, preserving the given order
    #[must_use]
    pub fn with_items(items: Vec<PantryItem>) -> Self {
        Self { items }
    }

    /// Add an ingredient, newest first.
    ///
    /// # Errors
    ///
    /// Rejects names that are empty after trimming; nothing is mutated.
    pub fn add(
        &mut self,
        name: &str,
        quantity: f64,
        unit: impl Into<String>,
    ) -> AppResult<PantryItem> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("ingredient name cannot be empty"));
        }
        let item = PantryItem::new(trimmed, quantity, unit);
        self.items.insert(0, item.clone());
        Ok(item)
    }

    /// Update an item in place.
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids and rejects patches that would
    /// blank the name.
    pub fn update(&mut self, id: Uuid, patch: PantryItemPatch) -> AppResult<PantryItem> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::not_found(format!("pantry item {id}")))?;

        if let Some(name) = patch.name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AppError::invalid_input("ingredient name cannot be empty"));
            }
            item.name = trimmed.to_owned();
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = coerce_quantity(quantity);
        }
        if let Some(unit) = patch.unit {
            item.unit = unit;
        }
        Ok(item.clone())
    }

    /// Remove an item.
    ///
    /// # Errors
    ///
    /// Returns not-found for unknown ids.
    pub fn remove(&mut self, id: Uuid) -> AppResult<PantryItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| AppError::not_found(format!("pantry item {id}")))?;
        Ok(self.items.remove(position))
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// All items, most-recent-first
    #[must_use]
    pub fn list(&self) -> &[PantryItem] {
        &self.items
    }

    /// Number of items on hand
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pantry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the whole collection, e.g. after a store refresh
    pub fn replace_all(&mut self, items: Vec<PantryItem>) {
        self.items = items;
    }

    /// Categorize an ingredient name against the fixed keyword taxonomy.
    ///
    /// Case-insensitive substring match over the ordered table; the first
    /// matching keyword decides, unmatched names are Other.
    #[must_use]
    pub fn categorize(name: &str) -> PantryCategory {
        let lowered = name.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map_or(PantryCategory::Other, |(_, category)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_prepends_and_trims() {
        let mut pantry = PantryModel::new();
        pantry.add("rice", 500.0, "g").unwrap();
        let item = pantry.add("  chicken breast  ", 2.0, "pcs").unwrap();
        assert_eq!(item.name, "chicken breast");
        assert_eq!(pantry.list()[0].name, "chicken breast");
        assert_eq!(pantry.list()[1].name, "rice");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut pantry = PantryModel::new();
        assert!(pantry.add("   ", 1.0, "pcs").is_err());
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_update_patch_fields() {
        let mut pantry = PantryModel::new();
        let item = pantry.add("milk", 1.0, "l").unwrap();
        let updated = pantry
            .update(
                item.id,
                PantryItemPatch {
                    quantity: Some(-2.0),
                    ..PantryItemPatch::default()
                },
            )
            .unwrap();
        // negative quantities coerce to zero
        assert_eq!(updated.quantity, 0.0);
        assert_eq!(updated.name, "milk");
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut pantry = PantryModel::new();
        assert!(pantry.remove(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_categorize_first_keyword_wins() {
        // "peanut butter" contains both "peanut" (Protein) and "butter"
        // (Condiments); Protein appears first in the table
        assert_eq!(
            PantryModel::categorize("peanut butter"),
            PantryCategory::Protein
        );
        assert_eq!(PantryModel::categorize("Butter"), PantryCategory::Condiments);
        assert_eq!(PantryModel::categorize("brown rice"), PantryCategory::Grains);
        assert_eq!(PantryModel::categorize("dragonfruit jam"), PantryCategory::Other);
    }
}
