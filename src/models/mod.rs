// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod club;
pub mod leaderboard;

pub use activity::{ActivityKind, Athlete, Average, AverageMetric, AverageValue, NormalizedActivity};
pub use club::{ClubConfig, ClubKind, ClubSnapshot};
pub use leaderboard::AthleteTotals;
