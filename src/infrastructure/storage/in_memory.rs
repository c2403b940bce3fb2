//! In-memory key-value store

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::storage::KeyValueStore;
use crate::domain::DomainError;

/// Thread-safe in-memory store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<Map<String, Value>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries
    pub fn with_entries(entries: Map<String, Value>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(keys
            .iter()
            .filter_map(|key| entries.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, patch: Map<String, Value>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.extend(patch);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        entries.clear();
        Ok(())
    }
}
