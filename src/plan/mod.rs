// ABOUTME: Weekly meal plan module: the grid state and its sync controller
// ABOUTME: Grid mutations are optimistic; the controller mirrors them remotely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

/// The day-by-slot assignment grid
pub mod grid;
/// Remote mirroring and change-feed ingestion
pub mod sync;

pub use grid::MealPlanGrid;
pub use sync::{PlanSyncController, SyncStatus};
