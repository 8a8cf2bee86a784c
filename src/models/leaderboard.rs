// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-athlete totals shown on a club leaderboard.

use serde::Serialize;

use crate::models::{Athlete, Average};

/// Aggregated activity totals for one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteTotals {
    pub athlete: Athlete,
    /// Number of activities counted
    pub activities: usize,
    /// Longest single activity (km)
    pub longest: f64,
    /// Total distance (km)
    pub distance: f64,
    /// Total distance in whole meters (truncated)
    pub distance_meters: u64,
    /// Total moving time as `HH:MM:SS`
    pub time: String,
    pub time_seconds: u64,
    /// Derived from total distance over total time
    #[serde(flatten)]
    pub average: Average,
}
