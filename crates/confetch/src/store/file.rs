//! Single-file JSON store backend.
//!
//! The whole mapping lives in one JSON object on disk. Writes land in a
//! temporary file next to the target and are renamed into place, so a reader
//! never observes a torn file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::ConfigStore;
use crate::error::FetchError;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full mapping. A missing file is an empty mapping.
    async fn load(&self) -> Result<HashMap<String, Value>, FetchError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, mapping: &HashMap<String, Value>) -> Result<(), FetchError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(mapping)?;
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, FetchError> {
        let mut mapping = self.load().await?;

        let mut result = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = mapping.remove(*key) {
                result.insert((*key).to_string(), value);
            }
        }
        Ok(result)
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), FetchError> {
        let mut mapping = self.load().await?;
        mapping.extend(entries);
        self.persist(&mapping).await?;

        debug!(
            path = %self.path.display(),
            entries = mapping.len(),
            "Persisted config store"
        );
        Ok(())
    }
}
