// ABOUTME: System-wide constants and static configuration tables for Remy
// ABOUTME: Category taxonomy, quick-select catalog, timeouts, and channel sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Constants Module
//!
//! Static configuration data and system limits. The keyword taxonomy and
//! quick-select catalog are declarative tables, not logic; their ordering
//! is a first-class contract covered by tests.

use crate::models::PantryCategory;

/// Pantry categorization taxonomy
pub mod taxonomy {
    use super::PantryCategory;

    /// Ordered (keyword, category) table for pantry categorization.
    ///
    /// Matching is case-insensitive substring, first match wins, so the
    /// category priority is Protein, Grains, Dairy, Fruits, Vegetables,
    /// Condiments; anything unmatched is Other. "butter" sits under
    /// Condiments while "peanut butter" hits Protein first via "peanut".
    pub const CATEGORY_KEYWORDS: &[(&str, PantryCategory)] = &[
        // Protein
        ("chicken", PantryCategory::Protein),
        ("beef", PantryCategory::Protein),
        ("pork", PantryCategory::Protein),
        ("turkey", PantryCategory::Protein),
        ("fish", PantryCategory::Protein),
        ("salmon", PantryCategory::Protein),
        ("tuna", PantryCategory::Protein),
        ("shrimp", PantryCategory::Protein),
        ("egg", PantryCategory::Protein),
        ("tofu", PantryCategory::Protein),
        ("bean", PantryCategory::Protein),
        ("lentil", PantryCategory::Protein),
        ("peanut", PantryCategory::Protein),
        // Grains
        ("rice", PantryCategory::Grains),
        ("pasta", PantryCategory::Grains),
        ("bread", PantryCategory::Grains),
        ("oat", PantryCategory::Grains),
        ("flour", PantryCategory::Grains),
        ("quinoa", PantryCategory::Grains),
        ("noodle", PantryCategory::Grains),
        ("tortilla", PantryCategory::Grains),
        ("cereal", PantryCategory::Grains),
        // Dairy
        ("milk", PantryCategory::Dairy),
        ("cheese", PantryCategory::Dairy),
        ("yogurt", PantryCategory::Dairy),
        ("cream", PantryCategory::Dairy),
        // Fruits
        ("apple", PantryCategory::Fruits),
        ("banana", PantryCategory::Fruits),
        ("orange", PantryCategory::Fruits),
        ("berry", PantryCategory::Fruits),
        ("strawberry", PantryCategory::Fruits),
        ("blueberry", PantryCategory::Fruits),
        ("lemon", PantryCategory::Fruits),
        ("lime", PantryCategory::Fruits),
        ("grape", PantryCategory::Fruits),
        ("mango", PantryCategory::Fruits),
        ("avocado", PantryCategory::Fruits),
        // Vegetables
        ("tomato", PantryCategory::Vegetables),
        ("onion", PantryCategory::Vegetables),
        ("garlic", PantryCategory::Vegetables),
        ("pepper", PantryCategory::Vegetables),
        ("carrot", PantryCategory::Vegetables),
        ("broccoli", PantryCategory::Vegetables),
        ("spinach", PantryCategory::Vegetables),
        ("lettuce", PantryCategory::Vegetables),
        ("potato", PantryCategory::Vegetables),
        ("cucumber", PantryCategory::Vegetables),
        ("mushroom", PantryCategory::Vegetables),
        ("zucchini", PantryCategory::Vegetables),
        ("celery", PantryCategory::Vegetables),
        ("corn", PantryCategory::Vegetables),
        // Condiments
        ("oil", PantryCategory::Condiments),
        ("vinegar", PantryCategory::Condiments),
        ("salt", PantryCategory::Condiments),
        ("sauce", PantryCategory::Condiments),
        ("ketchup", PantryCategory::Condiments),
        ("mustard", PantryCategory::Condiments),
        ("mayo", PantryCategory::Condiments),
        ("honey", PantryCategory::Condiments),
        ("sugar", PantryCategory::Condiments),
        ("butter", PantryCategory::Condiments),
        ("spice", PantryCategory::Condiments),
    ];
}

/// Quick-select pantry catalog shown as one-tap add buttons
pub mod quick_select {
    /// (name, unit) pairs grouped the way the pantry screen renders them
    pub const COMMON_INGREDIENTS: &[(&str, &str)] = &[
        ("chicken breast", "pcs"),
        ("eggs", "pcs"),
        ("milk", "ml"),
        ("cheese", "g"),
        ("rice", "g"),
        ("pasta", "g"),
        ("bread", "slices"),
        ("tomato", "pcs"),
        ("onion", "pcs"),
        ("garlic", "cloves"),
        ("potato", "pcs"),
        ("carrot", "pcs"),
        ("apple", "pcs"),
        ("banana", "pcs"),
        ("olive oil", "ml"),
        ("butter", "g"),
    ];
}

/// Synchronization timing constants
pub mod sync {
    /// Self-echo suppression window in milliseconds; an in-flight marker
    /// expires unconditionally after this long so a lost change-feed
    /// event cannot wedge suppression (bound required: under 2 s)
    pub const SUPPRESSION_WINDOW_MS: u64 = 1_500;

    /// Wall-clock budget for user-facing remote writes, in seconds
    pub const WRITE_TIMEOUT_SECS: u64 = 8;

    /// Wall-clock budget for remote reads, in seconds
    pub const READ_TIMEOUT_SECS: u64 = 10;

    /// Plan change-feed broadcast channel capacity
    pub const CHANGE_FEED_CHANNEL_SIZE: usize = 64;

    /// Transient status message channel capacity
    pub const STATUS_CHANNEL_SIZE: usize = 32;

    /// Auth state change channel capacity
    pub const AUTH_EVENT_CHANNEL_SIZE: usize = 16;
}

/// Recipe cache defaults
pub mod cache {
    /// Maximum cached recipe details
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 500;

    /// Default recipe detail TTL in seconds (6 hours)
    pub const TTL_RECIPE_SECS: u64 = 6 * 60 * 60;

    /// Background cleanup interval in seconds
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;
}

/// Validation limits
pub mod limits {
    /// Lowest accepted daily calorie goal
    pub const MIN_CALORIE_GOAL: f64 = 500.0;

    /// Highest accepted daily calorie goal
    pub const MAX_CALORIE_GOAL: f64 = 10_000.0;

    /// Default catalog search result limit
    pub const DEFAULT_SEARCH_LIMIT: usize = 20;
}

/// Calorie target tolerance: a recipe fits the goal when its calories are
/// at most goal times this factor
pub const CALORIE_TOLERANCE_FACTOR: f64 = 1.10;
