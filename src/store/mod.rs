// Key-value persistence layer.
//
// The original client kept every record in browser localStorage as an
// ambient singleton. Here the store is an injected trait so the scoring,
// badge, and dedup logic can be unit-tested against an in-memory backend.
//
// Key scheme (one namespace per purpose):
//   engagement:{event_id}            -> EngagementCounters JSON
//   rsvp:{event_id}:{fingerprint}    -> FingerprintRecord JSON
//   participation:{user_id}          -> UserParticipation JSON
//   badges:{user_id}                 -> earned badge-id set JSON

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Get a raw value by key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value (upsert, last write wins).
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Count keys with the given prefix ("" counts everything).
    async fn key_count(&self, prefix: &str) -> Result<u64>;
}

/// Read a JSON record from the store.
///
/// A malformed stored value reads as absent rather than erroring — the
/// worst case of losing a record here is a slightly wrong engagement
/// number, never data loss that matters.
pub async fn read_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = key, error = %e, "Discarding malformed stored record");
            Ok(None)
        }
    }
}

/// Serialize a record to JSON and store it under the given key.
pub async fn write_json<T: Serialize>(store: &dyn Store, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
