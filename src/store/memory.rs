// MemoryStore — HashMap backend for tests.
//
// Same last-write-wins semantics as the SQLite backend, no filesystem.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Store;

#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.map.lock().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.map.lock().await;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.map.lock().await;
        map.remove(key);
        Ok(())
    }

    async fn key_count(&self, prefix: &str) -> Result<u64> {
        let map = self.map.lock().await;
        Ok(map.keys().filter(|k| k.starts_with(prefix)).count() as u64)
    }
}
