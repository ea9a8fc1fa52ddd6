//! In-memory store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::ConfigStore;
use crate::error::FetchError;

/// In-process store backed by a concurrent map.
///
/// Nothing survives a restart; hosts that need persistence use
/// [`JsonFileStore`](super::JsonFileStore) or their own backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, FetchError> {
        let mut result = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.entries.get(*key) {
                result.insert((*key).to_string(), value.clone());
            }
        }
        Ok(result)
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), FetchError> {
        for (key, value) in entries {
            self.entries.insert(key, value);
        }
        Ok(())
    }
}
