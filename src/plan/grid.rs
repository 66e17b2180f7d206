// ABOUTME: Dense day-by-slot meal assignment grid with move and swap semantics
// ABOUTME: Always exactly |days| x |slots| addressable cells, each nullable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Meal Plan Grid
//!
//! The full 7-day by 3-slot assignment matrix. The representation is a
//! dense array indexed by the `Day` and `MealSlot` enums, so every
//! coordinate is always addressable and the cell count is structural
//! rather than checked. Cells hold a lightweight recipe reference or
//! nothing.

use crate::models::{Day, MealSlot, PlanCellRef};

/// Dense weekly assignment matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPlanGrid {
    cells: [[Option<PlanCellRef>; MealSlot::ALL.len()]; Day::ALL.len()],
}

impl MealPlanGrid {
    /// All-empty grid
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one cell
    #[must_use]
    pub fn cell(&self, day: Day, slot: MealSlot) -> Option<&PlanCellRef> {
        self.cells[day.index()][slot.index()].as_ref()
    }

    /// Assign or clear one cell, returning the previous value
    pub fn set_cell(
        &mut self,
        day: Day,
        slot: MealSlot,
        value: Option<PlanCellRef>,
    ) -> Option<PlanCellRef> {
        std::mem::replace(&mut self.cells[day.index()][slot.index()], value)
    }

    /// Clear one cell, returning the removed value
    pub fn clear_cell(&mut self, day: Day, slot: MealSlot) -> Option<PlanCellRef> {
        self.set_cell(day, slot, None)
    }

    /// Clear every cell
    pub fn clear_all(&mut self) {
        self.cells = Default::default();
    }

    /// Move the source cell onto the destination.
    ///
    /// Both cells are read before either write so an observer of the
    /// completed operation sees an exact exchange: an empty destination
    /// makes this a pure move (source becomes empty), an occupied one a
    /// swap. Same-coordinate calls are a no-op.
    pub fn move_or_swap(
        &mut self,
        from_day: Day,
        from_slot: MealSlot,
        to_day: Day,
        to_slot: MealSlot,
    ) {
        if from_day == to_day && from_slot == to_slot {
            return;
        }
        let source = self.cells[from_day.index()][from_slot.index()].take();
        let destination = std::mem::replace(&mut self.cells[to_day.index()][to_slot.index()], source);
        self.cells[from_day.index()][from_slot.index()] = destination;
    }

    /// Every cell with its coordinates, in day-major display order
    #[must_use]
    pub fn cells(&self) -> Vec<(Day, MealSlot, Option<&PlanCellRef>)> {
        Day::ALL
            .into_iter()
            .flat_map(|day| {
                MealSlot::ALL
                    .into_iter()
                    .map(move |slot| (day, slot, self.cells[day.index()][slot.index()].as_ref()))
            })
            .collect()
    }

    /// Occupied cells only, with their coordinates
    #[must_use]
    pub fn assignments(&self) -> Vec<(Day, MealSlot, PlanCellRef)> {
        self.cells()
            .into_iter()
            .filter_map(|(day, slot, cell)| cell.map(|c| (day, slot, c.clone())))
            .collect()
    }

    /// Number of occupied cells
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }
}
