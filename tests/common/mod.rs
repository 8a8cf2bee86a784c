// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use club_leaderboard::config::Config;
use club_leaderboard::error::AppError;
use club_leaderboard::models::{ClubConfig, ClubKind, ClubSnapshot};
use club_leaderboard::routes::create_router;
use club_leaderboard::services::{
    ClubDataSource, DataChannel, PublishSink, RawActivity, RawAthlete, ScheduleSettings, Scheduler,
};
use club_leaderboard::AppState;
use std::collections::HashMap;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

pub const RIDE_CLUB_ID: u64 = 1;
pub const RUN_CLUB_ID: u64 = 2;

/// Raw activities from the club fixture.
#[allow(dead_code)]
pub fn fixture_activities() -> Vec<RawActivity> {
    let json = fs::read_to_string("tests/fixtures/club_activities.json")
        .expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

/// A minimal, valid raw activity.
#[allow(dead_code)]
pub fn raw_activity(athlete_id: u64, kind: &str, meters: f64, seconds: u64, date: &str) -> RawActivity {
    RawActivity {
        athlete: Some(RawAthlete {
            id: Some(athlete_id),
            firstname: Some("Athlete".to_string()),
            lastname: Some(athlete_id.to_string()),
            profile: None,
        }),
        name: Some(format!("{} by {}", kind, athlete_id)),
        activity_type: Some(kind.to_string()),
        moving_time: Some(seconds),
        distance: Some(meters),
        average_speed: Some(if seconds > 0 { meters / seconds as f64 } else { 0.0 }),
        start_date: Some(date.to_string()),
    }
}

#[allow(dead_code)]
pub fn ride_club() -> ClubConfig {
    ClubConfig {
        kind: ClubKind::Ride,
        name: "Riders".to_string(),
        club_id: RIDE_CLUB_ID,
    }
}

#[allow(dead_code)]
pub fn run_club() -> ClubConfig {
    ClubConfig {
        kind: ClubKind::Run,
        name: "Runners".to_string(),
        club_id: RUN_CLUB_ID,
    }
}

#[allow(dead_code)]
pub fn test_settings(rotation_interval: Duration) -> ScheduleSettings {
    ScheduleSettings {
        refresh_interval: Duration::from_secs(3600),
        rotation_interval,
        activity_window_days: 30,
        publish_key: "strava".to_string(),
    }
}

/// Club data source serving canned responses per club ID.
#[allow(dead_code)]
#[derive(Default)]
pub struct StubSource {
    responses: Mutex<HashMap<u64, Result<Vec<RawActivity>, String>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
    started: Arc<Notify>,
}

#[allow(dead_code)]
impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches block until `gate` has permits.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn set_ok(&self, club_id: u64, activities: Vec<RawActivity>) {
        self.responses
            .lock()
            .unwrap()
            .insert(club_id, Ok(activities));
    }

    pub fn set_err(&self, club_id: u64, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(club_id, Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Notified whenever a fetch starts.
    pub fn started(&self) -> Arc<Notify> {
        Arc::clone(&self.started)
    }
}

#[async_trait]
impl ClubDataSource for StubSource {
    async fn fetch_club_activities(
        &self,
        club: &ClubConfig,
        _after: i64,
    ) -> Result<Vec<RawActivity>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| AppError::Fetch(e.to_string()))?;
        }

        let response = self.responses.lock().unwrap().get(&club.club_id).cloned();
        match response {
            Some(Ok(activities)) => Ok(activities),
            Some(Err(message)) => Err(AppError::Fetch(message)),
            None => Ok(Vec::new()),
        }
    }
}

/// Publish sink recording every published snapshot.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<(String, ClubSnapshot)>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn names(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(_, snapshot)| snapshot.name.clone())
            .collect()
    }

    pub fn keys(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl PublishSink for RecordingSink {
    fn publish(&self, key: &str, snapshot: &ClubSnapshot) -> club_leaderboard::error::Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((key.to_string(), snapshot.clone()));
        Ok(())
    }
}

/// Create a test app backed by a stub source.
/// Returns the router, the shared state and the source.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<StubSource>) {
    let mut config = Config::default();
    config.clubs = vec![ride_club(), run_club()];

    let source = Arc::new(StubSource::new());
    let channel = DataChannel::new();
    let scheduler = Arc::new(Scheduler::from_config(
        &config,
        source.clone(),
        Arc::new(channel.clone()),
    ));

    let state = Arc::new(AppState {
        config,
        channel,
        scheduler,
    });

    (create_router(state.clone()), state, source)
}
