// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Club leaderboard: rotating Strava club snapshots
//!
//! This crate fetches recent activities of Strava clubs, derives a
//! leaderboard and a latest-activities feed per club, and publishes one
//! club's snapshot at a time to a downstream channel.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod units;

use config::Config;
use services::{DataChannel, Scheduler};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub channel: DataChannel,
    pub scheduler: Arc<Scheduler>,
}
