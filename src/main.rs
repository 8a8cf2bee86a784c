// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Club Leaderboard Server
//!
//! Periodically refreshes Strava club leaderboards and rotates the
//! published club snapshot.

use club_leaderboard::{
    config::Config,
    services::{DataChannel, Scheduler, StravaClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        clubs = config.clubs.len(),
        "Starting club leaderboard"
    );

    let strava = StravaClient::new(
        config.strava_api_base.clone(),
        config.strava_access_token.clone(),
        config.activities_per_page,
        config.strava_timeout,
    )?;
    let channel = DataChannel::new();

    let scheduler = Arc::new(Scheduler::from_config(
        &config,
        Arc::new(strava),
        Arc::new(channel.clone()),
    ));
    let _loops = scheduler.spawn();

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        channel,
        scheduler,
    });

    // Build router
    let app = club_leaderboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,club_leaderboard=debug"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
