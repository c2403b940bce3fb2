//! JSON file backed key-value store

use std::io::ErrorKind;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::storage::KeyValueStore;
use crate::domain::DomainError;

/// Stores every key in a single JSON object on disk
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a crash never leaves a half-written document. All operations are
/// serialized through one async mutex.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>, DomainError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(DomainError::storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(DomainError::storage(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_all(&self, entries: &Map<String, Value>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let data = serde_json::to_vec_pretty(entries)?;
        let tmp = temp_path(&self.path);

        tokio::fs::write(&tmp, data).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), keys = entries.len(), "Store written");
        Ok(())
    }
}

/// Sibling of `path` with `.tmp` appended to the full file name
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;

        Ok(keys
            .iter()
            .filter_map(|key| entries.remove(*key).map(|v| (key.to_string(), v)))
            .collect())
    }

    async fn set(&self, patch: Map<String, Value>) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.extend(patch);
        self.write_all(&entries).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;

        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }

        if entries.len() == before {
            return Ok(());
        }
        self.write_all(&entries).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let _guard = self.lock.lock().await;
        self.write_all(&Map::new()).await
    }
}
