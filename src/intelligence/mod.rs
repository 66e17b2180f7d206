// ABOUTME: Recipe intelligence module for pantry-aware compatibility analysis
// ABOUTME: Re-exports the compatibility scorer and the recipe ranker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Recipe Intelligence
//!
//! Pure transforms over recipes, the pantry, and the user profile.
//! Nothing in this module performs I/O; annotations are recomputed from
//! scratch on every invocation and never cached between runs.

/// Recipe-to-pantry compatibility scoring
pub mod compatibility;
/// Stable ranking of annotated recipes
pub mod ranking;

pub use compatibility::{annotate, annotate_all};
pub use ranking::rank;
