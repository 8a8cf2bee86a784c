// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Club configuration and the publishable club snapshot.

use serde::{Deserialize, Serialize};

use crate::models::{ActivityKind, AthleteTotals, NormalizedActivity};

/// Kind of activity a club ranks its athletes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClubKind {
    Ride,
    Run,
}

impl ClubKind {
    pub fn activity_kind(self) -> ActivityKind {
        match self {
            ClubKind::Ride => ActivityKind::Ride,
            ClubKind::Run => ActivityKind::Run,
        }
    }
}

/// A Strava club to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubConfig {
    pub kind: ClubKind,
    /// Display name
    pub name: String,
    /// Strava club ID
    pub club_id: u64,
}

/// Fully computed state for one club as of the last successful refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ClubKind,
    /// Top athletes, descending by total distance
    pub leaderboard: Vec<AthleteTotals>,
    /// Most recent activities, newest first
    pub activities: Vec<NormalizedActivity>,
}
