// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides resource wiring, sign-in, and async polling helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence
#![allow(dead_code)]

//! Shared test utilities for `remy_meal_planner`

use anyhow::Result;
use remy_meal_planner::auth::{AuthProvider, Session};
use remy_meal_planner::config::PlannerConfig;
use remy_meal_planner::context::PlannerResources;
use remy_meal_planner::planner::PlannerService;
use std::future::Future;
use std::sync::Once;
use std::time::Duration;
use tokio::time::Instant;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Test configuration: local backends, no background tasks
pub fn test_config() -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.cache.enable_background_cleanup = false;
    config.store.write_timeout = Duration::from_secs(2);
    config
}

/// Wire resources over the in-memory backends
pub fn create_test_resources() -> Result<PlannerResources> {
    init_test_logging();
    Ok(PlannerResources::from_config(test_config())?)
}

/// Planner service over in-memory backends
pub fn create_test_planner() -> Result<PlannerService> {
    Ok(PlannerService::new(create_test_resources()?))
}

/// Sign a fresh test user in and return the session
pub async fn sign_in(resources: &PlannerResources) -> Result<Session> {
    Ok(resources
        .auth
        .sign_up("test@example.com", "password123")
        .await?)
}

/// Planner with a signed-in user, returns (planner, session)
pub async fn create_signed_in_planner() -> Result<(PlannerService, Session)> {
    let planner = create_test_planner()?;
    let session = sign_in(planner.resources()).await?;
    Ok((planner, session))
}

/// Poll a condition until it holds or a deadline passes; background
/// mirror writes settle within this window in tests
pub async fn wait_for<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
