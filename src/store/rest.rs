// ABOUTME: Hosted store REST client with an SSE-backed plan change feed
// ABOUTME: Per-user row routes, JSON bodies, last-write-wins upserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Hosted Store Client
//!
//! Client for the hosted backend-as-a-service the planner syncs against.
//! Rows live under per-user routes (`/users/{id}/pantry`, `.../plan`,
//! `.../favorites`, `.../tracking`, `.../profile`); the plan change feed
//! is a server-sent-event stream re-broadcast locally so any number of
//! in-process consumers can subscribe.

use super::StoreProvider;
use crate::config::StoreConfig;
use crate::constants::sync::CHANGE_FEED_CHANNEL_SIZE;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Day, FavoriteEntry, MealSlot, MealTrackingEntry, PantryItem, PlanCellRef, PlanChange,
    UserProfile,
};
use async_trait::async_trait;
use dashmap::DashMap;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// Wire representation of one plan row
#[derive(Debug, Serialize, Deserialize)]
struct PlanRow {
    day: String,
    slot: String,
    #[serde(flatten)]
    cell: PlanCellRef,
}

impl PlanRow {
    fn coordinates(&self) -> AppResult<(Day, MealSlot)> {
        let day = Day::parse(&self.day)
            .ok_or_else(|| AppError::serialization(format!("unknown day {}", self.day)))?;
        let slot = MealSlot::parse(&self.slot)
            .ok_or_else(|| AppError::serialization(format!("unknown slot {}", self.slot)))?;
        Ok((day, slot))
    }
}

/// REST store backed by the hosted service
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    /// Separate client without a request timeout for the long-lived feed
    feed_client: Client,
    base_url: Url,
    api_key: Option<String>,
    feeds: Arc<DashMap<Uuid, broadcast::Sender<PlanChange>>>,
}

impl RestStore {
    /// Create a client from store configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is malformed or the HTTP client
    /// cannot be constructed
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::invalid_input(format!("store base url: {e}")))?;
        let client = Client::builder()
            .timeout(config.read_timeout)
            .build()
            .map_err(AppError::from)?;
        let feed_client = Client::builder().build().map_err(AppError::from)?;
        Ok(Self {
            client,
            feed_client,
            base_url,
            api_key: config.api_key.clone(),
            feeds: Arc::new(DashMap::new()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| AppError::invalid_input("store base url cannot be a base"))?;
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }

    async fn parse_response<T>(response: reqwest::Response) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }
        response.json().await.map_err(AppError::from)
    }

    async fn expect_success(response: reqwest::Response) -> AppResult<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }
        Ok(())
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> AppError {
        let message = format!("store returned {status}: {body}");
        match status.as_u16() {
            401 | 403 => AppError::auth_invalid(message),
            404 => AppError::not_found(message),
            _ => AppError::external_service(message),
        }
    }

    async fn get_json<T>(&self, segments: &[&str]) -> AppResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "store GET");
        let response = self.authorize(self.client.get(url)).send().await?;
        Self::parse_response(response).await
    }

    async fn put_json<B: Serialize + Sync>(&self, segments: &[&str], body: &B) -> AppResult<()> {
        let url = self.endpoint(segments)?;
        debug!(%url, "store PUT");
        let response = self
            .authorize(self.client.put(url))
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn post_json<B: Serialize + Sync>(&self, segments: &[&str], body: &B) -> AppResult<()> {
        let url = self.endpoint(segments)?;
        debug!(%url, "store POST");
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete(&self, segments: &[&str]) -> AppResult<()> {
        let url = self.endpoint(segments)?;
        debug!(%url, "store DELETE");
        let response = self.authorize(self.client.delete(url)).send().await?;
        Self::expect_success(response).await
    }

    /// Connect the SSE feed for a user and pump events into the local
    /// broadcast channel until the stream ends
    async fn pump_feed(
        feed_client: Client,
        api_key: Option<String>,
        url: Url,
        sender: broadcast::Sender<PlanChange>,
    ) {
        let mut request = feed_client.get(url.clone());
        if let Some(key) = &api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "plan feed connection failed");
                return;
            }
        };

        let mut stream = response.bytes_stream().eventsource();
        while let Some(event) = stream.next().await {
            match event {
                Ok(event) => match serde_json::from_str::<PlanChange>(&event.data) {
                    Ok(change) => {
                        // send only fails when every receiver is gone
                        if sender.send(change).is_err() {
                            debug!("plan feed has no listeners, closing");
                            return;
                        }
                    }
                    Err(e) => warn!(error = %e, "unparseable plan feed event"),
                },
                Err(e) => {
                    warn!(error = %e, "plan feed stream error");
                    return;
                }
            }
        }
    }
}

#[async_trait]
impl StoreProvider for RestStore {
    async fn pantry_list(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>> {
        self.get_json(&["users", &user_id.to_string(), "pantry"]).await
    }

    async fn pantry_upsert_batch(&self, user_id: Uuid, items: &[PantryItem]) -> AppResult<()> {
        self.put_json(&["users", &user_id.to_string(), "pantry"], &items)
            .await
    }

    async fn plan_list(&self, user_id: Uuid) -> AppResult<Vec<(Day, MealSlot, PlanCellRef)>> {
        let rows: Vec<PlanRow> = self.get_json(&["users", &user_id.to_string(), "plan"]).await?;
        let mut cells = Vec::with_capacity(rows.len());
        for row in rows {
            let (day, slot) = row.coordinates()?;
            cells.push((day, slot, row.cell));
        }
        Ok(cells)
    }

    async fn plan_upsert(
        &self,
        user_id: Uuid,
        day: Day,
        slot: MealSlot,
        cell: &PlanCellRef,
    ) -> AppResult<()> {
        self.put_json(
            &[
                "users",
                &user_id.to_string(),
                "plan",
                day.as_str(),
                slot.as_str(),
            ],
            cell,
        )
        .await
        .map_err(|e| match e.code {
            crate::errors::ErrorCode::ExternalServiceError => {
                AppError::remote_write(e.message.clone()).with_source(e)
            }
            _ => e,
        })
    }

    async fn plan_delete(&self, user_id: Uuid, day: Day, slot: MealSlot) -> AppResult<()> {
        self.delete(&[
            "users",
            &user_id.to_string(),
            "plan",
            day.as_str(),
            slot.as_str(),
        ])
        .await
    }

    async fn plan_delete_all(&self, user_id: Uuid) -> AppResult<()> {
        self.delete(&["users", &user_id.to_string(), "plan"]).await
    }

    async fn plan_subscribe(&self, user_id: Uuid) -> AppResult<broadcast::Receiver<PlanChange>> {
        if let Some(sender) = self.feeds.get(&user_id) {
            return Ok(sender.subscribe());
        }
        let (sender, receiver) = broadcast::channel(CHANGE_FEED_CHANNEL_SIZE);
        self.feeds.insert(user_id, sender.clone());

        let url = self.endpoint(&["users", &user_id.to_string(), "plan", "feed"])?;
        let feed_client = self.feed_client.clone();
        let api_key = self.api_key.clone();
        let feeds = self.feeds.clone();
        tokio::spawn(async move {
            Self::pump_feed(feed_client, api_key, url, sender).await;
            feeds.remove(&user_id);
        });

        Ok(receiver)
    }

    async fn favorites_list(&self, user_id: Uuid) -> AppResult<Vec<FavoriteEntry>> {
        self.get_json(&["users", &user_id.to_string(), "favorites"])
            .await
    }

    async fn favorites_add(&self, entry: &FavoriteEntry) -> AppResult<()> {
        self.post_json(&["users", &entry.user_id.to_string(), "favorites"], entry)
            .await
    }

    async fn favorites_remove(&self, user_id: Uuid, recipe_id: &str) -> AppResult<()> {
        self.delete(&["users", &user_id.to_string(), "favorites", recipe_id])
            .await
    }

    async fn tracking_list(&self, user_id: Uuid) -> AppResult<Vec<MealTrackingEntry>> {
        self.get_json(&["users", &user_id.to_string(), "tracking"])
            .await
    }

    async fn tracking_upsert(&self, user_id: Uuid, entry: &MealTrackingEntry) -> AppResult<()> {
        self.put_json(
            &[
                "users",
                &user_id.to_string(),
                "tracking",
                entry.day.as_str(),
                entry.slot.as_str(),
            ],
            entry,
        )
        .await
    }

    async fn profile_get(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        match self
            .get_json(&["users", &user_id.to_string(), "profile"])
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.code == crate::errors::ErrorCode::ResourceNotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn profile_upsert(&self, user_id: Uuid, profile: &UserProfile) -> AppResult<()> {
        self.put_json(&["users", &user_id.to_string(), "profile"], profile)
            .await
    }
}
