// ABOUTME: Meal plan coordinate types, cell values, and change-feed events
// ABOUTME: Day and MealSlot are fixed ordered sets spanning the weekly grid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week, Monday-first as rendered in the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Day {
    /// All days in display order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based position within the week
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase wire name used in store row keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Parse a wire name back into a day
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal occasion within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
}

impl MealSlot {
    /// All slots in display order
    pub const ALL: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];

    /// Zero-based position within the day
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase wire name used in store row keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Parse a wire name back into a slot
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight recipe reference stored in a plan cell.
///
/// Carries just enough to render the grid without a catalog round-trip;
/// full details are fetched by id on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCellRef {
    /// Catalog recipe id
    pub recipe_id: String,
    /// Display title
    pub title: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

impl PlanCellRef {
    /// Create a cell reference
    #[must_use]
    pub fn new(recipe_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            title: title.into(),
            image: None,
        }
    }
}

/// A change-feed event for the signed-in user's meal plan.
///
/// Emitted by the store for every plan mutation, including this client's
/// own writes (the self-echo the sync controller suppresses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanChange {
    /// A cell was assigned or replaced
    Upserted {
        /// Day coordinate
        day: Day,
        /// Slot coordinate
        slot: MealSlot,
        /// New cell value
        cell: PlanCellRef,
    },
    /// A cell was cleared
    Deleted {
        /// Day coordinate
        day: Day,
        /// Slot coordinate
        slot: MealSlot,
    },
    /// The whole plan was cleared
    AllDeleted,
}

/// Tracking status of a planned meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealStatus {
    /// The meal was cooked
    Made,
    /// The meal was eaten
    Eaten,
}

/// A tracked meal, keyed by (day, slot); absence means untracked.
///
/// Independent of the plan cell at the same coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealTrackingEntry {
    /// Day coordinate
    pub day: Day,
    /// Slot coordinate
    pub slot: MealSlot,
    /// Tracked status
    pub status: MealStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_ordering_and_roundtrip() {
        assert_eq!(Day::ALL.len(), 7);
        assert_eq!(Day::Monday.index(), 0);
        assert_eq!(Day::Sunday.index(), 6);
        for day in Day::ALL {
            assert_eq!(Day::parse(day.as_str()), Some(day));
        }
        assert_eq!(Day::parse("MONDAY"), Some(Day::Monday));
        assert_eq!(Day::parse("noday"), None);
    }

    #[test]
    fn test_slot_ordering_and_roundtrip() {
        assert_eq!(MealSlot::ALL.len(), 3);
        assert_eq!(MealSlot::Breakfast.index(), 0);
        for slot in MealSlot::ALL {
            assert_eq!(MealSlot::parse(slot.as_str()), Some(slot));
        }
    }
}
