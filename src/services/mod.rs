// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod leaderboard;
pub mod pipeline;
pub mod publish;
pub mod recent;
pub mod scheduler;
pub mod strava;

pub use activity::{normalize_activities, normalize_activity};
pub use leaderboard::build_leaderboard;
pub use pipeline::build_snapshot;
pub use publish::{DataChannel, PublishSink};
pub use recent::select_recent;
pub use scheduler::{RefreshOutcome, RefreshStatus, ScheduleSettings, Scheduler};
pub use strava::{ClubDataSource, RawActivity, RawAthlete, StravaClient};
