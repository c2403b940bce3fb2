//! Store factory for runtime backend selection

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::storage::KeyValueStore;

use super::file::JsonFileStore;
use super::in_memory::InMemoryKeyValueStore;

/// Supported store backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// Process-local map (for testing/development)
    InMemory,
    /// Single JSON document on disk
    File,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "file" | "json" => Some(Self::File),
            _ => None,
        }
    }
}

/// Factory for creating store instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a store for the given backend; `path` is used by the file backend
    pub fn create(
        storage_type: &StorageType,
        path: impl Into<PathBuf>,
    ) -> Arc<dyn KeyValueStore> {
        match storage_type {
            StorageType::InMemory => {
                info!("Using in-memory store");
                Arc::new(InMemoryKeyValueStore::new())
            }
            StorageType::File => {
                let path = path.into();
                info!(path = %path.display(), "Using JSON file store");
                Arc::new(JsonFileStore::new(path))
            }
        }
    }
}
