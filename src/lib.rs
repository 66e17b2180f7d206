// ABOUTME: Main library entry point for the Remy meal planning client
// ABOUTME: Pantry-aware recipe intelligence with offline-first plan sync
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

// Crate-level attributes:
// - deny(unsafe_code): zero-tolerance unsafe policy, nothing here needs it
#![deny(unsafe_code)]

//! # Remy Meal Planner
//!
//! Client engine for a pantry-aware meal planning application: users keep
//! an ingredient inventory, search a hosted recipe catalog, assign
//! recipes to a weekly day-by-slot grid, and sync everything against a
//! hosted store that may be slow, flaky, or entirely absent.
//!
//! ## Architecture
//!
//! The crate follows a modular architecture:
//! - **Models**: shared data structures for recipes, pantry, and the plan
//! - **Intelligence**: pure compatibility scoring and ranking
//! - **Plan**: the weekly grid and its sync controller
//! - **Store / Catalog / Cache / Auth**: pluggable collaborator backends
//! - **Offline**: per-operation routing between remote and local paths
//! - **Planner**: the operation surface the UI calls
//!
//! ## Design posture
//!
//! Mutations are optimistic: the in-memory state the UI renders updates
//! first and remote mirroring is best effort. Failed writes surface as
//! transient status events and are never rolled back, because a network
//! blip that visibly deletes a user's meal plan is the worse failure.
//! Reads degrade to deterministic offline substitutes instead of
//! erroring.
//!
//! ## Example
//!
//! ```rust,no_run
//! use remy_meal_planner::config::PlannerConfig;
//! use remy_meal_planner::context::PlannerResources;
//! use remy_meal_planner::planner::PlannerService;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PlannerConfig::from_env()?;
//! let resources = PlannerResources::from_config(config)?;
//! let planner = PlannerService::new(resources);
//!
//! planner.pantry_add("chicken breast", 2.0, "pcs").await?;
//! let results = planner
//!     .search_recipes("chicken", &Default::default())
//!     .await?;
//! println!("top match: {}", results[0].recipe.title);
//! # Ok(())
//! # }
//! ```

/// Authentication and session management
pub mod auth;

/// Recipe cache to avoid redundant catalog calls
pub mod cache;

/// Recipe catalog collaborators (remote, mock, cached)
pub mod catalog;

/// Environment-based configuration
pub mod config;

/// Static configuration tables and system limits
pub mod constants;

/// Centralized resource container for dependency injection
pub mod context;

/// Unified error handling
pub mod errors;

/// Pure recipe compatibility scoring and ranking
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// Offline fallback routing
pub mod offline;

/// The user's pantry collection
pub mod pantry;

/// The weekly meal plan grid and sync controller
pub mod plan;

/// UI-facing planner service
pub mod planner;

/// In-flight request supersession
pub mod requests;

/// Persistent store collaborators
pub mod store;
