// ABOUTME: Offline fallback routing between remote and local/mock data paths
// ABOUTME: Hard short-circuit when offline; transparent substitution on failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Offline Fallback Controller
//!
//! Decides per operation whether to use the remote services or the
//! local/mock data path. Missing network or missing credentials is a
//! hard short-circuit to the local path, never a try-and-fail, so the
//! offline UI stays snappy. When the remote path is chosen and a read
//! still fails, the failure is logged and the local substitute served
//! transparently; read operations never surface a hard failure.
//!
//! Writes have no mock substitute: a failed remote write leaves the
//! optimistic local state standing and is only reported.

use crate::errors::AppResult;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Chosen data path for one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRoute {
    /// Talk to the hosted services
    Remote,
    /// Use local/mock data without attempting a remote call
    Local,
}

/// Where a served read actually came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    /// The remote service answered
    Remote,
    /// The local/mock substitute answered
    Fallback,
}

/// A read result together with its origin
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    /// The data served to the UI
    pub value: T,
    /// Which path produced it
    pub source: FetchSource,
}

/// Outcome of a best-effort write
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    /// The remote store accepted the write
    Synced,
    /// Only the local optimistic state holds the write
    LocalOnly {
        /// Why the remote mirror did not happen
        detail: String,
    },
}

/// Per-operation routing between remote and local data paths
#[derive(Clone)]
pub struct OfflineFallbackController {
    forced_offline: bool,
    network_online: Arc<AtomicBool>,
}

impl OfflineFallbackController {
    /// Create a controller; `forced_offline` pins every route to local
    #[must_use]
    pub fn new(forced_offline: bool) -> Self {
        Self {
            forced_offline,
            network_online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Record the host shell's connectivity signal
    pub fn set_network_online(&self, online: bool) {
        self.network_online.store(online, Ordering::SeqCst);
    }

    /// Last known connectivity
    #[must_use]
    pub fn network_online(&self) -> bool {
        self.network_online.load(Ordering::SeqCst)
    }

    /// Route decision: remote only with network and credentials, and never
    /// in forced offline mode
    #[must_use]
    pub fn route(&self, credentials_present: bool) -> DataRoute {
        if self.forced_offline || !self.network_online() || !credentials_present {
            DataRoute::Local
        } else {
            DataRoute::Remote
        }
    }

    /// Serve a read from the remote path with transparent local fallback.
    ///
    /// On a local route the remote future is dropped unexecuted; on a
    /// remote route a failure is logged and the fallback substitutes, so
    /// the only error this returns is the fallback's own.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the fallback path itself
    pub async fn read_with_fallback<T, R, L>(
        &self,
        credentials_present: bool,
        remote: R,
        fallback: L,
    ) -> AppResult<Fetched<T>>
    where
        R: Future<Output = AppResult<T>> + Send,
        L: Future<Output = AppResult<T>> + Send,
    {
        if self.route(credentials_present) == DataRoute::Local {
            debug!("read routed to local path");
            let value = fallback.await?;
            return Ok(Fetched {
                value,
                source: FetchSource::Fallback,
            });
        }

        match remote.await {
            Ok(value) => Ok(Fetched {
                value,
                source: FetchSource::Remote,
            }),
            Err(e) => {
                warn!(error = %e, "remote read failed, serving local substitute");
                let value = fallback.await?;
                Ok(Fetched {
                    value,
                    source: FetchSource::Fallback,
                })
            }
        }
    }

    /// Mirror a local mutation to the remote store, best effort.
    ///
    /// The caller has already applied the mutation locally; whatever
    /// happens here, that state stands. A local route, a failure, or a
    /// timeout all degrade to [`WriteOutcome::LocalOnly`].
    pub async fn write_best_effort<W>(
        &self,
        credentials_present: bool,
        budget: Duration,
        write: W,
    ) -> WriteOutcome
    where
        W: Future<Output = AppResult<()>> + Send,
    {
        if self.route(credentials_present) == DataRoute::Local {
            debug!("write kept local, no remote route available");
            return WriteOutcome::LocalOnly {
                detail: "saved on this device only".into(),
            };
        }

        match tokio::time::timeout(budget, write).await {
            Ok(Ok(())) => WriteOutcome::Synced,
            Ok(Err(e)) => {
                warn!(error = %e, "remote write failed, keeping local state");
                WriteOutcome::LocalOnly {
                    detail: format!("saved locally, sync failed: {e}"),
                }
            }
            Err(_) => {
                warn!("remote write timed out, keeping local state");
                WriteOutcome::LocalOnly {
                    detail: "saved locally, sync timed out".into(),
                }
            }
        }
    }
}
