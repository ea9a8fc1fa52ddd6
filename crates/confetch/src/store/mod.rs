//! Config persistence abstraction.
//!
//! The cache keeps its payload and fetch timestamp under two fixed keys in an
//! associative store. The concrete backend is injected: an in-memory map for
//! tests and embedding hosts, or a JSON file on disk.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the requested keys. Keys without a stored value are simply
    /// missing from the result.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, Value>, FetchError>;

    /// Write all entries together; readers never observe a subset of this
    /// write.
    async fn set(&self, entries: HashMap<String, Value>) -> Result<(), FetchError>;
}
