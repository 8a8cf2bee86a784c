// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type shared by the pipeline, scheduler and routes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Network or API failure while fetching a club's activities.
    #[error("Strava fetch failed: {0}")]
    Fetch(String),

    /// Raw activity missing a required field, or carrying an unparseable value.
    #[error("Malformed activity: {0}")]
    MalformedInput(String),

    /// Arithmetic domain error (zero speed, zero duration).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// At least one club failed during a refresh cycle.
    #[error("Refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const STRAVA_RATE_LIMIT: &'static str = "Rate limit exceeded";
    pub const STRAVA_TOKEN_ERROR: &'static str = "Access token rejected";

    /// True when Strava refused the configured access token.
    pub fn is_strava_token_error(&self) -> bool {
        matches!(self, AppError::Fetch(msg) if msg.contains(Self::STRAVA_TOKEN_ERROR))
    }

    /// True when Strava throttled the request.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::Fetch(msg) if msg.contains(Self::STRAVA_RATE_LIMIT))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone())),
            AppError::MalformedInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "malformed_input",
                Some(msg.clone()),
            ),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", Some(msg.clone()))
            }
            AppError::RefreshFailed(msg) => {
                (StatusCode::BAD_GATEWAY, "refresh_failed", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;
