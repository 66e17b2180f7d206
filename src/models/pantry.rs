// ABOUTME: Pantry item model and the fixed ingredient category taxonomy
// ABOUTME: PantryItem entries are owned by the user's pantry collection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One on-hand ingredient in the user's pantry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItem {
    /// Stable identifier, assigned on creation
    pub id: Uuid,
    /// Free-text ingredient name; case-insensitive match key
    pub name: String,
    /// On-hand quantity, always non-negative
    pub quantity: f64,
    /// Free-text unit (pcs, g, ml)
    pub unit: String,
}

impl PantryItem {
    /// Create a pantry item with a fresh id.
    ///
    /// The quantity is coerced to a non-negative finite number; anything
    /// else (negative, NaN, infinite) becomes 0.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: coerce_quantity(quantity),
            unit: unit.into(),
        }
    }
}

/// Coerce a quantity to a non-negative finite number; invalid input is 0
#[must_use]
pub fn coerce_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity >= 0.0 {
        quantity
    } else {
        0.0
    }
}

/// Fixed ingredient category taxonomy used for pantry display grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PantryCategory {
    /// Meat, fish, eggs, legumes
    Protein,
    /// Vegetables and greens
    Vegetables,
    /// Fruits and berries
    Fruits,
    /// Grains, bread, pasta
    Grains,
    /// Milk products
    Dairy,
    /// Sauces, oils, spices
    Condiments,
    /// Everything without a keyword match
    Other,
}

impl PantryCategory {
    /// Category name as displayed in the UI
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Grains => "Grains",
            Self::Dairy => "Dairy",
            Self::Condiments => "Condiments",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PantryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
