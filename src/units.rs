// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversions from Strava's raw units (m, s, m/s) to display units.

use crate::error::{AppError, Result};
use chrono::NaiveTime;

/// Minutes per kilometer at 1 m/s.
const PACE_FACTOR: f64 = 16.666666666667;

const SECONDS_PER_DAY: u64 = 86_400;

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Meters per second to km/h, two decimals.
pub fn speed_to_kmh(meters_per_second: f64) -> f64 {
    round2(meters_per_second * 3.6)
}

/// Meters per second to a running pace formatted as `M:SS` per kilometer.
///
/// The seconds part is truncated, not rounded, so `5.3` minutes renders as
/// `5:17` rather than `5:18`. Speeds that are zero, negative or not finite
/// have no pace and are rejected.
pub fn speed_to_pace(meters_per_second: f64) -> Result<String> {
    if !meters_per_second.is_finite() || meters_per_second <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "pace is undefined for speed {} m/s",
            meters_per_second
        )));
    }

    let value = round2(PACE_FACTOR / meters_per_second);
    let minutes = value.trunc();
    let fraction = if minutes >= 1.0 {
        value % minutes
    } else {
        value.fract()
    };
    let seconds = (fraction * 60.0).trunc() as u32;

    Ok(format!("{}:{:02}", minutes as u64, seconds))
}

/// Meters to kilometers, two decimals.
pub fn distance_to_km(meters: f64) -> f64 {
    round2(meters / 1000.0)
}

/// Format a duration as `HH:MM:SS` wall-clock time.
///
/// Durations of a day or more wrap around: 90000 seconds formats as
/// `01:00:00`.
pub fn seconds_to_clock(seconds: u64) -> String {
    let since_midnight = (seconds % SECONDS_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(since_midnight, 0)
        .unwrap_or(NaiveTime::MIN)
        .format("%H:%M:%S")
        .to_string()
}
