// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Downstream channel that receives the currently selected club snapshot.

use crate::error::{AppError, Result};
use crate::models::ClubSnapshot;
use dashmap::DashMap;
use std::sync::Arc;

/// Receiver of published snapshots.
pub trait PublishSink: Send + Sync {
    /// Set the current value for `key`.
    fn publish(&self, key: &str, snapshot: &ClubSnapshot) -> Result<()>;
}

/// In-memory keyed channel holding the latest JSON value per key.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct DataChannel {
    values: Arc<DashMap<String, serde_json::Value>>,
}

impl DataChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `key`, if anything has been published.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.get(key).map(|entry| entry.value().clone())
    }
}

impl PublishSink for DataChannel {
    fn publish(&self, key: &str, snapshot: &ClubSnapshot) -> Result<()> {
        let value = serde_json::to_value(snapshot)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Snapshot serialization: {}", e)))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
