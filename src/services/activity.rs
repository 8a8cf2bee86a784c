// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity normalization.
//!
//! Maps a raw Strava club activity into a [`NormalizedActivity`]:
//! 1. Resolve the athlete (name, avatar)
//! 2. Resolve the activity kind once
//! 3. Convert time, distance and start date
//! 4. Derive the average for rides and runs

use crate::error::{AppError, Result};
use crate::models::{ActivityKind, Athlete, Average, NormalizedActivity};
use crate::services::strava::{RawActivity, RawAthlete};
use crate::time_utils::parse_epoch_seconds;
use crate::units;

/// Profile image Strava returns for athletes without a photo.
const PLACEHOLDER_AVATAR: &str = "avatar/athlete/large.png";

/// Normalize a single raw activity.
pub fn normalize_activity(raw: RawActivity) -> Result<NormalizedActivity> {
    let athlete = normalize_athlete(required(raw.athlete, "athlete")?)?;
    let name = required(raw.name, "name")?;
    let sport_type = required(raw.activity_type, "type")?;
    let time_seconds = required(raw.moving_time, "moving_time")?;
    let distance_meters = required(raw.distance, "distance")?;
    let date = required(raw.start_date, "start_date")?;

    let date_ts = parse_epoch_seconds(&date).map_err(|e| {
        AppError::MalformedInput(format!("invalid start_date {:?}: {}", date, e))
    })?;

    let kind = ActivityKind::from_strava_type(&sport_type);
    let average = match kind.club_kind() {
        Some(club_kind) => {
            let speed = required(raw.average_speed, "average_speed")?;
            match Average::from_speed(club_kind, speed) {
                Ok(average) => Some(average),
                Err(e) => {
                    tracing::warn!(
                        athlete_id = athlete.id,
                        activity = %name,
                        error = %e,
                        "Skipping average for activity"
                    );
                    None
                }
            }
        }
        None => None,
    };

    Ok(NormalizedActivity {
        athlete,
        name,
        sport_type,
        kind,
        time: units::seconds_to_clock(time_seconds),
        time_seconds,
        date,
        date_ts,
        distance: units::distance_to_km(distance_meters),
        distance_meters,
        average,
    })
}

/// Normalize every activity of a club, failing on the first malformed one.
pub fn normalize_activities(raw: Vec<RawActivity>) -> Result<Vec<NormalizedActivity>> {
    raw.into_iter().map(normalize_activity).collect()
}

fn normalize_athlete(raw: RawAthlete) -> Result<Athlete> {
    let id = required(raw.id, "athlete.id")?;
    let firstname = required(raw.firstname, "athlete.firstname")?;
    let lastname = required(raw.lastname, "athlete.lastname")?;

    Ok(Athlete {
        id,
        name: format!("{} {}", firstname, lastname),
        avatar: raw.profile.filter(|p| p != PLACEHOLDER_AVATAR),
    })
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| AppError::MalformedInput(format!("missing field `{}`", field)))
}
