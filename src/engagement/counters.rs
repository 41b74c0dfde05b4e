// Per-event engagement counters and the update flow.
//
// One record per event, keyed `engagement:{event_id}` in the store.
// Created zeroed on first action, mutated additively, never deleted.

use anyhow::Result;
use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::intensity::{compute_intensity, IntensityWeights};
use crate::store::{read_json, write_json, Store};

/// The three engagement actions a client can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionKind {
    View,
    Share,
    Confirm,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::View => "view",
            ActionKind::Share => "share",
            ActionKind::Confirm => "confirm",
        }
    }
}

/// Engagement counters for a single event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementCounters {
    pub event_id: String,
    pub views: u32,
    pub shares: u32,
    pub confirmations: u32,
    /// Derived intensity score, always in [0, 100]
    pub intensity: u32,
    /// RFC 3339 timestamp of the last update
    pub last_updated: String,
}

impl EngagementCounters {
    /// A zeroed record for an event that has no stored counters yet.
    pub fn zeroed(event_id: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            views: 0,
            shares: 0,
            confirmations: 0,
            intensity: 0,
            last_updated: Utc::now().to_rfc3339(),
        }
    }
}

fn storage_key(event_id: &str) -> String {
    format!("engagement:{}", event_id)
}

/// Load the counters for an event.
///
/// Absent or malformed records read as zeroed counters — a page render
/// never fails because of a bad stored value.
pub async fn load_counters(store: &dyn Store, event_id: &str) -> Result<EngagementCounters> {
    let record = read_json(store, &storage_key(event_id)).await?;
    Ok(record.unwrap_or_else(|| EngagementCounters::zeroed(event_id)))
}

/// Record one engagement action and return the updated counters.
///
/// Each call is a discrete event: two identical calls produce two
/// increments (not idempotent by design). Rejects an empty event id.
pub async fn update_counters(
    store: &dyn Store,
    event_id: &str,
    kind: ActionKind,
    weights: &IntensityWeights,
) -> Result<EngagementCounters> {
    if event_id.is_empty() {
        anyhow::bail!("Invalid argument: event id must not be empty");
    }

    let mut counters = load_counters(store, event_id).await?;

    match kind {
        ActionKind::View => counters.views += 1,
        ActionKind::Share => counters.shares += 1,
        ActionKind::Confirm => counters.confirmations += 1,
    }

    counters.intensity = compute_intensity(
        counters.views,
        counters.shares,
        counters.confirmations,
        weights,
    );
    counters.last_updated = Utc::now().to_rfc3339();

    write_json(store, &storage_key(event_id), &counters).await?;

    debug!(
        event_id = event_id,
        action = kind.as_str(),
        intensity = counters.intensity,
        "Recorded engagement action"
    );

    Ok(counters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn update_increments_matching_counter() {
        let store = MemoryStore::new();
        let weights = IntensityWeights::default();

        let c = update_counters(&store, "e1", ActionKind::View, &weights)
            .await
            .unwrap();
        assert_eq!((c.views, c.shares, c.confirmations), (1, 0, 0));

        let c = update_counters(&store, "e1", ActionKind::Share, &weights)
            .await
            .unwrap();
        assert_eq!((c.views, c.shares, c.confirmations), (1, 1, 0));

        let c = update_counters(&store, "e1", ActionKind::Confirm, &weights)
            .await
            .unwrap();
        assert_eq!((c.views, c.shares, c.confirmations), (1, 1, 1));
    }

    #[tokio::test]
    async fn empty_event_id_is_rejected() {
        let store = MemoryStore::new();
        let weights = IntensityWeights::default();
        let result = update_counters(&store, "", ActionKind::View, &weights).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_stored_record_reads_as_zeroed() {
        let store = MemoryStore::new();
        store.set("engagement:e1", "{not json").await.unwrap();

        let counters = load_counters(&store, "e1").await.unwrap();
        assert_eq!(counters.views, 0);
        assert_eq!(counters.intensity, 0);
    }
}
