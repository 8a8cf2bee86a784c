// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Latest activities feed.

use crate::models::NormalizedActivity;

/// Number of activities in a club's feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Most recent activities, newest first.
///
/// Activities sharing a start time keep their relative input order before
/// the final reversal, so the later one in the input is shown first.
pub fn select_recent(activities: &[NormalizedActivity]) -> Vec<NormalizedActivity> {
    let mut ordered = activities.to_vec();
    ordered.sort_by_key(|activity| activity.date_ts);

    let mut recent = ordered.split_off(ordered.len().saturating_sub(RECENT_ACTIVITY_LIMIT));
    recent.reverse();
    recent
}
