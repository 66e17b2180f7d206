// ABOUTME: Per-resource abortable request handles for supersession
// ABOUTME: A newer request for the same logical key cancels the older one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Request Supersession
//!
//! In-flight search and detail fetches are keyed by the logical resource
//! they target (the search box, a recipe id). Issuing a new request for
//! the same key aborts the previous one, so a stale response can never
//! overwrite the result of a newer query or re-enable a dismissed
//! loading state.

use crate::errors::{AppError, AppResult};
use dashmap::DashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Tracks the newest in-flight request per logical resource key
#[derive(Clone, Default)]
pub struct RequestTracker {
    inflight: Arc<DashMap<String, (u64, AbortHandle)>>,
    sequence: Arc<AtomicU64>,
}

impl RequestTracker {
    /// Empty tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a request for a logical resource, aborting any in-flight
    /// predecessor for the same key.
    ///
    /// # Errors
    ///
    /// Returns a cancellation error when this request is itself
    /// superseded before completing, or the request's own error.
    pub async fn run<T, F>(&self, key: &str, request: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: Future<Output = AppResult<T>> + Send + 'static,
    {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst);
        let task = tokio::spawn(request);
        if let Some((_, previous)) = self
            .inflight
            .insert(key.to_owned(), (ticket, task.abort_handle()))
        {
            debug!(key, "aborting superseded request");
            previous.abort();
        }

        let result = task.await;
        // only the owner of the newest ticket may clear the slot
        self.inflight
            .remove_if(key, |_, (slot_ticket, _)| *slot_ticket == ticket);

        match result {
            Ok(output) => output,
            Err(join_error) if join_error.is_cancelled() => Err(AppError::cancelled(format!(
                "request for {key} was superseded"
            ))),
            Err(join_error) => {
                Err(AppError::internal(format!("request task failed: {join_error}")))
            }
        }
    }

    /// Abort the in-flight request for a key, if any
    pub fn cancel(&self, key: &str) {
        if let Some((_, (_, handle))) = self.inflight.remove(key) {
            debug!(key, "cancelling in-flight request");
            handle.abort();
        }
    }

    /// Number of tracked in-flight requests
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use std::time::Duration;

    #[tokio::test]
    async fn test_request_completes_and_clears_slot() {
        let tracker = RequestTracker::new();
        let value = tracker.run("search", async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let tracker = RequestTracker::new();
        let slow = {
            let tracker = tracker.clone();
            tokio::spawn(async move {
                tracker
                    .run("search", async {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok("slow")
                    })
                    .await
            })
        };
        // give the slow request time to register
        tokio::time::sleep(Duration::from_millis(50)).await;

        let fast = tracker.run("search", async { Ok("fast") }).await.unwrap();
        assert_eq!(fast, "fast");

        let superseded = slow.await.unwrap().unwrap_err();
        assert_eq!(superseded.code, ErrorCode::Cancelled);
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_interfere() {
        let tracker = RequestTracker::new();
        let a = tracker.run("detail:1", async { Ok(1) });
        let b = tracker.run("detail:2", async { Ok(2) });
        let (a, b) = tokio::join!(a, b);
        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 2);
    }
}
