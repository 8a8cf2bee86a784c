// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Refresh and rotation scheduling.
//!
//! The [`Scheduler`] owns all mutable state of the service:
//! - the current snapshot set, swapped whole after each successful refresh
//! - the rotation cursor selecting the club to publish next
//! - the in-flight guard that keeps refreshes from overlapping
//! - the refresh status reported by the API

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ClubConfig, ClubSnapshot};
use crate::services::pipeline::build_snapshot;
use crate::services::publish::PublishSink;
use crate::services::strava::ClubDataSource;
use crate::time_utils::{format_utc_rfc3339, window_start};
use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Complete set of club snapshots, in configured club order.
pub type SnapshotSet = Arc<Vec<ClubSnapshot>>;

/// Timing and publishing parameters.
#[derive(Debug, Clone)]
pub struct ScheduleSettings {
    pub refresh_interval: Duration,
    pub rotation_interval: Duration,
    pub activity_window_days: u32,
    pub publish_key: String,
}

impl From<&Config> for ScheduleSettings {
    fn from(config: &Config) -> Self {
        Self {
            refresh_interval: config.refresh_interval,
            rotation_interval: config.rotation_interval,
            activity_window_days: config.activity_window_days,
            publish_key: config.publish_key.clone(),
        }
    }
}

/// Result of a refresh attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// All clubs refreshed and the snapshot set was replaced.
    Published { clubs: usize },
    /// Another refresh was still running.
    Skipped,
}

/// Operational view of the refresh cycles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefreshStatus {
    pub refreshes_succeeded: u64,
    pub refreshes_failed: u64,
    pub refreshes_skipped: u64,
    pub last_success_at: Option<String>,
    pub last_failure_at: Option<String>,
    pub last_error: Option<String>,
    /// Club whose snapshot was published most recently
    pub published_club: Option<String>,
}

/// Drives periodic refresh of all clubs and rotation of the published club.
pub struct Scheduler {
    clubs: Vec<ClubConfig>,
    source: Arc<dyn ClubDataSource>,
    sink: Arc<dyn PublishSink>,
    settings: ScheduleSettings,
    snapshots: watch::Sender<Option<SnapshotSet>>,
    cursor: AtomicUsize,
    /// Held for the duration of a refresh.
    refresh_lock: Mutex<()>,
    status: Mutex<RefreshStatus>,
}

impl Scheduler {
    pub fn new(
        clubs: Vec<ClubConfig>,
        settings: ScheduleSettings,
        source: Arc<dyn ClubDataSource>,
        sink: Arc<dyn PublishSink>,
    ) -> Self {
        let (snapshots, _) = watch::channel(None);
        Self {
            clubs,
            source,
            sink,
            settings,
            snapshots,
            cursor: AtomicUsize::new(0),
            refresh_lock: Mutex::new(()),
            status: Mutex::new(RefreshStatus::default()),
        }
    }

    /// Build a scheduler for the clubs and timings in `config`.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn ClubDataSource>,
        sink: Arc<dyn PublishSink>,
    ) -> Self {
        Self::new(config.clubs.clone(), config.into(), source, sink)
    }

    /// The current snapshot set, or `None` before the first successful refresh.
    pub fn snapshots(&self) -> Option<SnapshotSet> {
        self.snapshots.borrow().clone()
    }

    pub async fn status(&self) -> RefreshStatus {
        self.status.lock().await.clone()
    }

    /// Fetch every club and replace the snapshot set if all of them succeed.
    ///
    /// On any club failure the previous set stays published and
    /// [`AppError::RefreshFailed`] lists the failing clubs.
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            tracing::warn!("Refresh already in flight, skipping");
            self.status.lock().await.refreshes_skipped += 1;
            return Ok(RefreshOutcome::Skipped);
        };

        let started = std::time::Instant::now();
        let Some(after) = window_start(Utc::now(), self.settings.activity_window_days) else {
            let message = format!(
                "activity window of {} days is out of range",
                self.settings.activity_window_days
            );
            tracing::error!(error = %message, "Refresh cycle cannot start");
            self.record_failure(&message).await;
            return Err(AppError::InvalidInput(message));
        };

        let results = join_all(self.clubs.iter().map(|club| self.refresh_club(club, after))).await;

        let mut snapshots = Vec::with_capacity(self.clubs.len());
        let mut failures = Vec::new();
        for (club, result) in self.clubs.iter().zip(results) {
            match result {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    if e.is_strava_token_error() {
                        tracing::error!(
                            club = %club.name,
                            "Strava rejected the access token; check STRAVA_ACCESS_TOKEN"
                        );
                    } else if e.is_rate_limited() {
                        tracing::warn!(club = %club.name, "Strava rate limit reached");
                    } else {
                        tracing::error!(club = %club.name, error = %e, "Club refresh failed");
                    }
                    failures.push(format!("{}: {}", club.name, e));
                }
            }
        }

        if !failures.is_empty() {
            let message = failures.join("; ");
            self.record_failure(&message).await;
            tracing::warn!(
                failed = failures.len(),
                total = self.clubs.len(),
                "Keeping previous snapshots"
            );
            return Err(AppError::RefreshFailed(message));
        }

        let clubs = snapshots.len();
        self.snapshots.send_replace(Some(Arc::new(snapshots)));
        {
            let mut status = self.status.lock().await;
            status.refreshes_succeeded += 1;
            status.last_success_at = Some(format_utc_rfc3339(Utc::now()));
        }
        tracing::info!(
            clubs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Club snapshots refreshed"
        );

        self.rotate().await;
        Ok(RefreshOutcome::Published { clubs })
    }

    async fn record_failure(&self, message: &str) {
        let mut status = self.status.lock().await;
        status.refreshes_failed += 1;
        status.last_failure_at = Some(format_utc_rfc3339(Utc::now()));
        status.last_error = Some(message.to_string());
    }

    async fn refresh_club(&self, club: &ClubConfig, after: i64) -> Result<ClubSnapshot> {
        let raw = self.source.fetch_club_activities(club, after).await?;
        build_snapshot(club, raw)
    }

    /// Publish the next club's snapshot. Returns the published club name.
    ///
    /// Does nothing until the first refresh has populated the snapshot set.
    pub async fn rotate(&self) -> Option<String> {
        let snapshots = self.snapshots()?;
        if snapshots.is_empty() {
            return None;
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % snapshots.len();
        let snapshot = &snapshots[index];

        if let Err(e) = self.sink.publish(&self.settings.publish_key, snapshot) {
            tracing::error!(club = %snapshot.name, error = %e, "Failed to publish snapshot");
            return None;
        }

        tracing::info!(
            club = %snapshot.name,
            index,
            key = %self.settings.publish_key,
            "Published club snapshot"
        );
        self.status.lock().await.published_club = Some(snapshot.name.clone());
        Some(snapshot.name.clone())
    }

    /// Start the refresh and rotation loops.
    pub fn spawn(self: &Arc<Self>) -> (JoinHandle<()>, JoinHandle<()>) {
        let refresh = tokio::spawn(Arc::clone(self).run_refresh_loop());
        let rotation = tokio::spawn(Arc::clone(self).run_rotation_loop());
        (refresh, rotation)
    }

    /// Refresh immediately, then every `refresh_interval`.
    ///
    /// Each tick runs in its own task so a slow refresh never delays the
    /// timer; overlapping ticks are skipped by the in-flight guard.
    async fn run_refresh_loop(self: Arc<Self>) {
        tracing::info!(
            interval_secs = self.settings.refresh_interval.as_secs(),
            clubs = self.clubs.len(),
            "Starting refresh loop"
        );

        let mut ticker = tokio::time::interval(self.settings.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let scheduler = Arc::clone(&self);
            tokio::spawn(async move {
                if let Err(e) = scheduler.refresh().await {
                    tracing::warn!(error = %e, "Refresh cycle failed; retrying next interval");
                }
            });
        }
    }

    /// Publish the next club every `rotation_interval`, once snapshots exist.
    async fn run_rotation_loop(self: Arc<Self>) {
        let mut updates = self.snapshots.subscribe();
        let ready = updates.wait_for(Option::is_some).await.is_ok();
        if !ready {
            return;
        }

        tracing::info!(
            interval_secs = self.settings.rotation_interval.as_secs(),
            "Starting rotation loop"
        );

        // The refresh that populated the set already published once.
        let period = self.settings.rotation_interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.rotate().await;
        }
    }
}
