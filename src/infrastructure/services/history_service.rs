//! Explanation history - bounded, newest-first list of past explanations

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::domain::storage::HISTORY_KEY;
use crate::domain::{DomainError, ExplanationResult, HistoryEntry, KeyValueStore, KeyValueStoreExt};

pub const DEFAULT_MAX_ENTRIES: usize = 100;
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Limits applied to the stored history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryConfig {
    pub max_entries: usize,
    pub retention: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }
}

/// Reads and writes the `history` key
#[derive(Debug, Clone)]
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
    config: HistoryConfig,
}

impl HistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, HistoryConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: HistoryConfig) -> Self {
        Self { store, config }
    }

    /// Stored entries, newest first
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, DomainError> {
        let entries: Option<Vec<HistoryEntry>> = self.store.get_json(HISTORY_KEY).await?;
        Ok(entries.unwrap_or_default())
    }

    /// Prepend an entry for `result`, dropping the oldest beyond the limit
    pub async fn record(&self, result: &ExplanationResult) -> Result<HistoryEntry, DomainError> {
        self.record_at(result, Utc::now()).await
    }

    pub async fn record_at(
        &self,
        result: &ExplanationResult,
        at: DateTime<Utc>,
    ) -> Result<HistoryEntry, DomainError> {
        let entry = HistoryEntry::new(result, at);

        let mut entries = self.list().await?;
        entries.insert(0, entry.clone());
        entries.truncate(self.config.max_entries);

        self.store.set_json(HISTORY_KEY, &entries).await?;
        debug!(term = %entry.term, model_id = %entry.model_id, "Recorded explanation");
        Ok(entry)
    }

    pub async fn clear(&self) -> Result<(), DomainError> {
        self.store
            .set_json(HISTORY_KEY, &Vec::<HistoryEntry>::new())
            .await?;
        info!("Cleared explanation history");
        Ok(())
    }

    /// Drop entries past the retention window; writes only when something
    /// was removed. Returns the number of dropped entries.
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let entries = self.list().await?;
        let before = entries.len();

        let kept: Vec<HistoryEntry> = entries
            .into_iter()
            .filter(|e| !e.is_expired(now, self.config.retention))
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            self.store.set_json(HISTORY_KEY, &kept).await?;
            info!(removed, "Removed expired history entries");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockKeyValueStore;
    use crate::domain::ModelProfile;

    fn result(term: &str) -> ExplanationResult {
        let profile = ModelProfile::new("p1", "Profile One", "https://example.test/v1", "m1");
        ExplanationResult::new(term, format!("{} explained", term), &profile)
    }

    #[tokio::test]
    async fn test_record_prepends() {
        let service = HistoryService::new(Arc::new(MockKeyValueStore::new()));

        service.record(&result("first")).await.unwrap();
        service.record(&result("second")).await.unwrap();

        let terms: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.term)
            .collect();
        assert_eq!(terms, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_record_truncates_to_limit() {
        let config = HistoryConfig {
            max_entries: 3,
            ..HistoryConfig::default()
        };
        let service = HistoryService::with_config(Arc::new(MockKeyValueStore::new()), config);

        for i in 0..5 {
            service.record(&result(&format!("term-{i}"))).await.unwrap();
        }

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].term, "term-4");
        assert_eq!(entries[2].term, "term-2");
    }

    #[tokio::test]
    async fn test_clear() {
        let service = HistoryService::new(Arc::new(MockKeyValueStore::new()));
        service.record(&result("x")).await.unwrap();

        service.clear().await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = Arc::new(MockKeyValueStore::new());
        let service = HistoryService::new(store.clone());
        let now = Utc::now();

        service
            .record_at(&result("old"), now - Duration::days(40))
            .await
            .unwrap();
        service
            .record_at(&result("recent"), now - Duration::days(2))
            .await
            .unwrap();

        assert_eq!(service.cleanup_expired(now).await.unwrap(), 1);

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].term, "recent");
        assert_eq!(store.writes().len(), 3);
    }

    #[tokio::test]
    async fn test_cleanup_without_expired_entries_does_not_write() {
        let store = Arc::new(MockKeyValueStore::new());
        let service = HistoryService::new(store.clone());
        service.record(&result("fresh")).await.unwrap();

        assert_eq!(service.cleanup_expired(Utc::now()).await.unwrap(), 0);
        assert_eq!(store.writes().len(), 1);
    }
}
