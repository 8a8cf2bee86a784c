// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-club aggregation pipeline: raw activities to a publishable snapshot.

use crate::error::Result;
use crate::models::{ClubConfig, ClubSnapshot};
use crate::services::activity::normalize_activities;
use crate::services::leaderboard::build_leaderboard;
use crate::services::recent::select_recent;
use crate::services::strava::RawActivity;

/// Build a club's snapshot from its raw activities.
///
/// Any malformed activity fails the whole club; no partial snapshot is
/// produced.
pub fn build_snapshot(club: &ClubConfig, raw: Vec<RawActivity>) -> Result<ClubSnapshot> {
    let activities = normalize_activities(raw)?;

    let leaderboard = build_leaderboard(&activities, club.kind);
    let recent = select_recent(&activities);

    tracing::debug!(
        club = %club.name,
        activities = activities.len(),
        leaders = leaderboard.len(),
        "Built club snapshot"
    );

    Ok(ClubSnapshot {
        name: club.name.clone(),
        kind: club.kind,
        leaderboard,
        activities: recent,
    })
}
