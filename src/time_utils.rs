// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a Strava start date into epoch seconds.
pub fn parse_epoch_seconds(date: &str) -> Result<i64, chrono::ParseError> {
    DateTime::parse_from_rfc3339(date).map(|dt| dt.timestamp())
}

/// Lower bound of the fetch window, as epoch seconds.
///
/// `None` when the window reaches past the representable date range.
pub fn window_start(now: DateTime<Utc>, days: u32) -> Option<i64> {
    let window = Duration::try_days(i64::from(days))?;
    now.checked_sub_signed(window).map(|start| start.timestamp())
}
