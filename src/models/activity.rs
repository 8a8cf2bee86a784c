// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Normalized activity model published in club snapshots.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ClubKind;
use crate::units;

/// Strava athlete as shown on the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Athlete {
    /// Strava athlete ID
    pub id: u64,
    /// First and last name joined by a space
    pub name: String,
    /// Profile image URL, omitted when Strava serves its placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Activity category resolved once from Strava's `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Ride,
    Run,
    Other,
}

impl ActivityKind {
    /// Exact, case-sensitive match on the Strava type.
    pub fn from_strava_type(value: &str) -> Self {
        match value {
            "Ride" => ActivityKind::Ride,
            "Run" => ActivityKind::Run,
            _ => ActivityKind::Other,
        }
    }

    /// The club kind whose averages apply, if any.
    pub fn club_kind(self) -> Option<ClubKind> {
        match self {
            ActivityKind::Ride => Some(ClubKind::Ride),
            ActivityKind::Run => Some(ClubKind::Run),
            ActivityKind::Other => None,
        }
    }
}

/// Average value: speed for rides, pace for runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AverageValue {
    /// km/h
    Speed(f64),
    /// `M:SS` per km
    Pace(String),
}

/// Unit label for [`AverageValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AverageMetric {
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "min/km")]
    MinutesPerKilometer,
}

/// Average with its unit, flattened into activity and leaderboard JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Average {
    pub average: AverageValue,
    pub average_metric: AverageMetric,
}

impl Average {
    /// Compute the average for a kind from a speed in meters per second.
    pub fn from_speed(kind: ClubKind, meters_per_second: f64) -> Result<Self> {
        Ok(match kind {
            ClubKind::Ride => Average {
                average: AverageValue::Speed(units::speed_to_kmh(meters_per_second)),
                average_metric: AverageMetric::KilometersPerHour,
            },
            ClubKind::Run => Average {
                average: AverageValue::Pace(units::speed_to_pace(meters_per_second)?),
                average_metric: AverageMetric::MinutesPerKilometer,
            },
        })
    }
}

/// Activity after unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedActivity {
    pub athlete: Athlete,
    /// Activity name/title
    pub name: String,
    /// Strava type as received (Ride, Run, Walk, ...)
    #[serde(rename = "type")]
    pub sport_type: String,
    /// Resolved from `sport_type`; not part of the published JSON
    #[serde(skip)]
    pub kind: ActivityKind,
    /// Moving time as `HH:MM:SS`
    pub time: String,
    pub time_seconds: u64,
    /// Start date/time as received (ISO 8601)
    pub date: String,
    /// Start date/time in epoch seconds
    pub date_ts: i64,
    /// Distance in kilometers
    pub distance: f64,
    pub distance_meters: f64,
    /// Present for rides and runs only
    #[serde(flatten)]
    pub average: Option<Average>,
}

impl NormalizedActivity {
    pub fn is_ride(&self) -> bool {
        self.kind == ActivityKind::Ride
    }

    pub fn is_run(&self) -> bool {
        self.kind == ActivityKind::Run
    }
}
