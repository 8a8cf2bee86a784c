// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only API over published data and refresh state.

use crate::error::{AppError, Result};
use crate::models::ClubSnapshot;
use crate::services::RefreshStatus;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/data/{key}", get(get_channel_value))
        .route("/api/clubs", get(get_clubs))
        .route("/api/status", get(get_status))
}

// ─── Channel ─────────────────────────────────────────────────

/// Current value published under `key`.
async fn get_channel_value(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state
        .channel
        .get(&key)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Nothing published under {:?}", key)))
}

// ─── Snapshots ───────────────────────────────────────────────

/// Every club's snapshot from the last successful refresh.
async fn get_clubs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ClubSnapshot>>> {
    let snapshots = state
        .scheduler
        .snapshots()
        .ok_or_else(|| AppError::NotFound("No successful refresh yet".to_string()))?;

    tracing::debug!(clubs = snapshots.len(), "Serving club snapshots");
    Ok(Json(snapshots.to_vec()))
}

// ─── Status ──────────────────────────────────────────────────

async fn get_status(State(state): State<Arc<AppState>>) -> Json<RefreshStatus> {
    Json(state.scheduler.status().await)
}
