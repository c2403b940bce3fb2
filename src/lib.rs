//! Term Explainer
//!
//! Plain-language explanations of AI terms through configurable
//! OpenAI-compatible model profiles:
//! - A registry of model profiles with validation and default resolution
//! - A single chat-completion call path with a typed error taxonomy
//! - A bounded explanation history
//! - A type-tagged message contract for UI surfaces

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing::warn;

use api::state::AppState;
use infrastructure::llm::ChatCompletionClient;
use infrastructure::services::{run_startup_tasks, HistoryConfig};
use infrastructure::storage::{StorageFactory, StorageType};

/// Create the application state and run the startup tasks against its store
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_type = StorageType::from_str(&config.storage.backend).with_context(|| {
        format!(
            "Unknown storage backend '{}', expected 'memory' or 'file'",
            config.storage.backend
        )
    })?;
    let store = StorageFactory::create(&storage_type, &config.storage.path);

    let client = ChatCompletionClient::with_timeout(config.client.timeout())
        .context("Failed to build HTTP client")?;

    let state = AppState::new(
        store,
        Arc::new(client),
        HistoryConfig::from(&config.history),
    );

    let report = run_startup_tasks(&state.registry, &state.history, Utc::now()).await;
    if !report.failed.is_empty() {
        warn!(failed = ?report.failed, "Continuing after failed startup tasks");
    }

    Ok(state)
}
