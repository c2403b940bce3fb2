//! Key-value store contract

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Key holding the profile list
pub const MODELS_KEY: &str = "models";

/// Key holding the application configuration object
pub const CONFIG_KEY: &str = "config";

/// Key holding the explanation history list
pub const HISTORY_KEY: &str = "history";

/// Top-level keys written by the single-model releases, migrated on startup
pub const LEGACY_API_KEY: &str = "apiKey";
pub const LEGACY_MODEL_KEY: &str = "defaultModel";
pub const LEGACY_MAX_TOKENS_KEY: &str = "maxTokens";
pub const LEGACY_TEMPERATURE_KEY: &str = "temperature";

/// Durable mapping from string keys to JSON values
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Returns the stored values for the requested keys; missing keys are omitted
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, DomainError>;

    /// Writes every entry of `patch` in a single operation
    async fn set(&self, patch: Map<String, Value>) -> Result<(), DomainError>;

    /// Removes the given keys; unknown keys are ignored
    async fn remove(&self, keys: &[&str]) -> Result<(), DomainError>;

    /// Removes everything
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Typed helpers on top of the raw JSON contract
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads and deserializes a single key
    fn get_json<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            let mut values = self.get(&[key]).await?;

            match values.remove(key) {
                Some(Value::Null) | None => Ok(None),
                Some(value) => {
                    let typed = serde_json::from_value(value).map_err(|e| {
                        DomainError::storage(format!("Failed to deserialize '{}': {}", key, e))
                    })?;
                    Ok(Some(typed))
                }
            }
        }
    }

    /// Serializes and writes a single key
    fn set_json<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let value = serde_json::to_value(value).map_err(|e| {
                DomainError::storage(format!("Failed to serialize '{}': {}", key, e))
            })?;

            let mut patch = Map::new();
            patch.insert(key.to_string(), value);
            self.set(patch).await
        }
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}
