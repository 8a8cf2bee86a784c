// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for fetching club activities.
//!
//! Handles:
//! - One bounded request per club (`after` + `per_page`)
//! - Rate limit and token rejection detection
//! - Decoding the raw activity JSON

use crate::error::AppError;
use crate::models::ClubConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Default Strava API base URL.
pub const STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";

/// Default upper bound on a whole club request, body included.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw club activities.
#[async_trait]
pub trait ClubDataSource: Send + Sync {
    /// Fetch activities for `club` started after `after` (epoch seconds).
    async fn fetch_club_activities(
        &self,
        club: &ClubConfig,
        after: i64,
    ) -> Result<Vec<RawActivity>, AppError>;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    per_page: u32,
}

impl StravaClient {
    /// Create a new Strava client with a static access token.
    ///
    /// Requests that take longer than `timeout` fail with [`AppError::Fetch`].
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        per_page: u32,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building Strava HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            per_page,
        })
    }

    /// List recent activities of a club.
    pub async fn list_club_activities(
        &self,
        club_id: u64,
        after: i64, // Unix timestamp
    ) -> Result<Vec<RawActivity>, AppError> {
        let url = format!("{}/clubs/{}/activities", self.base_url, club_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("after", after.to_string()),
                ("per_page", self.per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(club_id, "Strava request timed out");
                    AppError::Fetch(format!("Request timed out: {}", e))
                } else {
                    AppError::Fetch(e.to_string())
                }
            })?;

        let items: Vec<serde_json::Value> = self.check_response_json(response).await?;

        // A badly typed activity is malformed input, not a fetch failure.
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| {
                    AppError::MalformedInput(format!("activity {}: {}", index, e))
                })
            })
            .collect()
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
                return Err(AppError::Fetch(AppError::STRAVA_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 {
                return Err(AppError::Fetch(AppError::STRAVA_TOKEN_ERROR.to_string()));
            }

            return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl ClubDataSource for StravaClient {
    async fn fetch_club_activities(
        &self,
        club: &ClubConfig,
        after: i64,
    ) -> Result<Vec<RawActivity>, AppError> {
        let activities = self.list_club_activities(club.club_id, after).await?;
        tracing::debug!(
            club = %club.name,
            club_id = club.club_id,
            count = activities.len(),
            "Fetched club activities"
        );
        Ok(activities)
    }
}

/// Club activity as returned by Strava.
///
/// Every field is optional here; the normalizer decides which are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivity {
    pub athlete: Option<RawAthlete>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Seconds
    pub moving_time: Option<u64>,
    /// Meters
    pub distance: Option<f64>,
    /// Meters per second
    pub average_speed: Option<f64>,
    pub start_date: Option<String>,
}

/// Athlete summary embedded in a club activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAthlete {
    pub id: Option<u64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub profile: Option<String>,
}
