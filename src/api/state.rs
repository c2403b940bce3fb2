//! Application state for shared services

use std::sync::Arc;

use crate::domain::{CompletionClient, KeyValueStore};
use crate::infrastructure::services::{
    ExplanationService, HistoryConfig, HistoryService, ModelRegistry,
};

/// Services shared by every handler; cloning is cheap
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: ModelRegistry,
    pub history: HistoryService,
    pub explanations: ExplanationService,
}

impl AppState {
    /// Wire the services on top of one store and one completion client
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        client: Arc<dyn CompletionClient>,
        history_config: HistoryConfig,
    ) -> Self {
        let registry = ModelRegistry::new(store.clone());
        let history = HistoryService::with_config(store, history_config);
        let explanations = ExplanationService::new(registry.clone(), client, history.clone());

        Self {
            registry,
            history,
            explanations,
        }
    }
}
