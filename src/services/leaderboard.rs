// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club leaderboard aggregation.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{AthleteTotals, Average, ClubKind, NormalizedActivity};
use crate::units;

/// Number of athletes shown on a leaderboard.
pub const LEADERBOARD_SIZE: usize = 3;

/// Rank the athletes of a club by total distance for the club's kind.
///
/// Athletes whose average cannot be computed (zero total time, or zero
/// distance for a run) are left off the board.
pub fn build_leaderboard(activities: &[NormalizedActivity], kind: ClubKind) -> Vec<AthleteTotals> {
    let target = kind.activity_kind();

    let mut totals: Vec<(f64, AthleteTotals)> = group_by_athlete(
        activities.iter().filter(|activity| activity.kind == target),
    )
    .into_iter()
    .filter_map(|group| match sum_group(&group, kind) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!(
                athlete_id = group[0].athlete.id,
                error = %e,
                "Excluding athlete from leaderboard"
            );
            None
        }
    })
    .collect();

    // Rank on the raw sum, not the rounded km value; ties go to the lower athlete ID.
    totals.sort_by(|(a_meters, a), (b_meters, b)| {
        b_meters
            .total_cmp(a_meters)
            .then_with(|| a.athlete.id.cmp(&b.athlete.id))
    });

    totals
        .into_iter()
        .take(LEADERBOARD_SIZE)
        .map(|(_, entry)| entry)
        .collect()
}

/// Group activities by athlete ID, in order of first appearance.
fn group_by_athlete<'a>(
    activities: impl Iterator<Item = &'a NormalizedActivity>,
) -> Vec<Vec<&'a NormalizedActivity>> {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut groups: Vec<Vec<&NormalizedActivity>> = Vec::new();

    for activity in activities {
        let slot = *index.entry(activity.athlete.id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(activity);
    }

    groups
}

/// Sum one athlete's activities. Returns the exact meter total for ranking.
fn sum_group(group: &[&NormalizedActivity], kind: ClubKind) -> Result<(f64, AthleteTotals)> {
    let first = group
        .first()
        .ok_or_else(|| AppError::InvalidInput("empty athlete group".to_string()))?;

    let distance_meters: f64 = group.iter().map(|a| a.distance_meters).sum();
    let time_seconds: u64 = group.iter().map(|a| a.time_seconds).sum();
    let longest_meters = group
        .iter()
        .map(|a| a.distance_meters)
        .fold(f64::NEG_INFINITY, f64::max);

    if time_seconds == 0 {
        return Err(AppError::InvalidInput(format!(
            "total moving time is zero over {} activities",
            group.len()
        )));
    }

    let average = Average::from_speed(kind, distance_meters / time_seconds as f64)?;

    Ok((
        distance_meters,
        AthleteTotals {
            athlete: first.athlete.clone(),
            activities: group.len(),
            longest: units::distance_to_km(longest_meters),
            distance: units::distance_to_km(distance_meters),
            distance_meters: distance_meters as u64,
            time: units::seconds_to_clock(time_seconds),
            time_seconds,
            average,
        },
    ))
}
