// ABOUTME: Client-side session management against the hosted auth service
// ABOUTME: AuthProvider trait, Session lifecycle, and auth state broadcasts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Authentication and Session Management
//!
//! The planner delegates credential handling entirely to the hosted auth
//! service; this module only tracks the resulting session and fans out
//! auth state changes so controllers can react to sign-in and sign-out.
//! Identity-requiring writes are refused locally when no live session
//! exists, before any network call is attempted.

use crate::constants::sync::AUTH_EVENT_CHANNEL_SIZE;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::info;
use uuid::Uuid;

/// Minimum accepted password length on sign-up
const MIN_PASSWORD_LEN: usize = 8;

/// Session lifetime issued by the development auth backend
const SESSION_HOURS: i64 = 24;

/// A signed-in user session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Account email
    pub email: String,
    /// Bearer token for store requests
    pub access_token: String,
    /// Expiry timestamp
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has passed its expiry
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Auth state change broadcast to interested controllers
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A user signed in
    SignedIn(Session),
    /// The current user signed out
    SignedOut,
}

/// Auth service abstraction
#[async_trait]
pub trait AuthProvider: Send + Sync + Clone {
    /// Create an account and sign in
    ///
    /// # Errors
    ///
    /// Rejects malformed email addresses, short passwords, and duplicate
    /// accounts
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Sign in with existing credentials
    ///
    /// # Errors
    ///
    /// Returns an auth error for unknown accounts or wrong passwords
    async fn log_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Sign the current user out
    ///
    /// # Errors
    ///
    /// Returns an error when the sign-out cannot be recorded
    async fn log_out(&self) -> AppResult<()>;

    /// The live session, if any; expired sessions are reported as absent
    async fn current_session(&self) -> Option<Session>;

    /// Subscribe to auth state changes
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Require a live session or fail with an actionable auth error
///
/// # Errors
///
/// Returns an auth-required error describing the blocked action
pub async fn require_session<A: AuthProvider>(auth: &A, action: &str) -> AppResult<Session> {
    auth.current_session()
        .await
        .ok_or_else(|| AppError::auth_required(format!("log in to {action}")))
}

/// In-process auth backend for offline mode, development, and tests.
///
/// Accounts live only for the process lifetime and passwords are held
/// verbatim; nothing here is a credential store, it exists so the rest of
/// the client exercises real session flows without the hosted service.
#[derive(Clone)]
pub struct MemoryAuth {
    accounts: Arc<RwLock<HashMap<String, (Uuid, String)>>>,
    current: Arc<RwLock<Option<Session>>>,
    events: broadcast::Sender<AuthEvent>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CHANNEL_SIZE);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            current: Arc::new(RwLock::new(None)),
            events,
        }
    }
}

/// Validate credentials locally before any network call
fn validate_credentials(email: &str, password: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AppError::invalid_input("email address is malformed"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid_input(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(email)
}

impl MemoryAuth {
    /// Empty auth backend with no accounts
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_session(user_id: Uuid, email: String) -> Session {
        Session {
            user_id,
            email,
            access_token: Uuid::new_v4().to_string(),
            expires_at: Utc::now() + Duration::hours(SESSION_HOURS),
        }
    }

    async fn install_session(&self, session: Session) {
        *self.current.write().await = Some(session.clone());
        let _ = self.events.send(AuthEvent::SignedIn(session));
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = validate_credentials(email, password)?;
        let user_id = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&email) {
                return Err(AppError::auth_invalid("an account with this email exists"));
            }
            let user_id = Uuid::new_v4();
            accounts.insert(email.clone(), (user_id, password.to_owned()));
            user_id
        };
        info!(%email, "account created");
        let session = Self::issue_session(user_id, email);
        self.install_session(session.clone()).await;
        Ok(session)
    }

    async fn log_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = email.trim().to_lowercase();
        let user_id = {
            let accounts = self.accounts.read().await;
            match accounts.get(&email) {
                Some((user_id, stored)) if stored == password => *user_id,
                _ => return Err(AppError::auth_invalid("unknown email or wrong password")),
            }
        };
        info!(%email, "signed in");
        let session = Self::issue_session(user_id, email);
        self.install_session(session.clone()).await;
        Ok(session)
    }

    async fn log_out(&self) -> AppResult<()> {
        *self.current.write().await = None;
        let _ = self.events.send(AuthEvent::SignedOut);
        info!("signed out");
        Ok(())
    }

    async fn current_session(&self) -> Option<Session> {
        let session = self.current.read().await.clone()?;
        if session.is_expired() {
            return None;
        }
        Some(session)
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

/// Hosted auth service client.
///
/// Credentials go straight to the service; only the issued session is
/// kept in process. Local validation still runs first so malformed input
/// never costs a network round-trip.
#[derive(Clone)]
pub struct RestAuth {
    client: reqwest::Client,
    base_url: url::Url,
    api_key: Option<String>,
    current: Arc<RwLock<Option<Session>>>,
    events: broadcast::Sender<AuthEvent>,
}

#[derive(Debug, serde::Deserialize)]
struct SessionResponse {
    user_id: Uuid,
    email: String,
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl RestAuth {
    /// Create a client for the hosted auth endpoints of the store service
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is malformed or the HTTP client
    /// cannot be constructed
    pub fn new(config: &crate::config::StoreConfig) -> AppResult<Self> {
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| AppError::invalid_input(format!("auth base url: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(config.write_timeout)
            .build()
            .map_err(AppError::from)?;
        let (events, _) = broadcast::channel(AUTH_EVENT_CHANNEL_SIZE);
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            current: Arc::new(RwLock::new(None)),
            events,
        })
    }

    fn endpoint(&self, action: &str) -> AppResult<url::Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::invalid_input("auth base url cannot be a base"))?
            .extend(["auth", action]);
        Ok(url)
    }

    async fn credential_call(&self, action: &str, email: &str, password: &str) -> AppResult<Session> {
        let url = self.endpoint(action)?;
        let mut request = self.client.post(url).json(&serde_json::json!({
            "email": email,
            "password": password,
        }));
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::auth_invalid("the auth service rejected the credentials"));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "auth service returned {status}: {body}"
            )));
        }
        let session: SessionResponse = response.json().await.map_err(AppError::from)?;
        let session = Session {
            user_id: session.user_id,
            email: session.email,
            access_token: session.access_token,
            expires_at: session.expires_at,
        };
        *self.current.write().await = Some(session.clone());
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl AuthProvider for RestAuth {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = validate_credentials(email, password)?;
        self.credential_call("sign_up", &email, password).await
    }

    async fn log_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let email = email.trim().to_lowercase();
        self.credential_call("log_in", &email, password).await
    }

    async fn log_out(&self) -> AppResult<()> {
        let session = self.current.write().await.take();
        let _ = self.events.send(AuthEvent::SignedOut);
        if let Some(session) = session {
            // best effort: the local session is gone either way
            let url = self.endpoint("log_out")?;
            let result = self
                .client
                .post(url)
                .header("Authorization", format!("Bearer {}", session.access_token))
                .send()
                .await;
            if let Err(e) = result {
                tracing::warn!(error = %e, "remote sign-out failed, local session cleared");
            }
        }
        Ok(())
    }

    async fn current_session(&self) -> Option<Session> {
        let session = self.current.read().await.clone()?;
        if session.is_expired() {
            return None;
        }
        Some(session)
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}

/// Auth backend selected at startup
#[derive(Clone)]
pub enum Auth {
    /// In-process accounts for offline mode and tests
    Memory(MemoryAuth),
    /// Hosted auth service
    Rest(RestAuth),
}

impl Auth {
    /// Pick a backend from configuration, mirroring the store selection
    ///
    /// # Errors
    ///
    /// Returns an error when the hosted client cannot be constructed
    pub fn from_config(config: &crate::config::PlannerConfig) -> AppResult<Self> {
        if config.offline_mode || config.store.api_key.is_none() {
            return Ok(Self::Memory(MemoryAuth::new()));
        }
        Ok(Self::Rest(RestAuth::new(&config.store)?))
    }
}

#[async_trait]
impl AuthProvider for Auth {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<Session> {
        match self {
            Self::Memory(auth) => auth.sign_up(email, password).await,
            Self::Rest(auth) => auth.sign_up(email, password).await,
        }
    }

    async fn log_in(&self, email: &str, password: &str) -> AppResult<Session> {
        match self {
            Self::Memory(auth) => auth.log_in(email, password).await,
            Self::Rest(auth) => auth.log_in(email, password).await,
        }
    }

    async fn log_out(&self) -> AppResult<()> {
        match self {
            Self::Memory(auth) => auth.log_out().await,
            Self::Rest(auth) => auth.log_out().await,
        }
    }

    async fn current_session(&self) -> Option<Session> {
        match self {
            Self::Memory(auth) => auth.current_session().await,
            Self::Rest(auth) => auth.current_session().await,
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        match self {
            Self::Memory(auth) => auth.subscribe(),
            Self::Rest(auth) => auth.subscribe(),
        }
    }
}
