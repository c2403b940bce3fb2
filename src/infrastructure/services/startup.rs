//! One-time tasks run before the service starts answering requests

use chrono::{DateTime, Utc};
use tracing::{error, info};

use super::{HistoryService, ModelRegistry};
use crate::domain::DomainError;

/// What the startup tasks changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupReport {
    pub config_written: bool,
    pub presets_seeded: bool,
    pub legacy_migrated: bool,
    pub expired_history_removed: usize,
    pub selection_repaired: bool,
    /// Names of tasks that failed
    pub failed: Vec<&'static str>,
}

/// Run every startup task. A failing task is logged and the remaining ones still run.
pub async fn run_startup_tasks(
    registry: &ModelRegistry,
    history: &HistoryService,
    now: DateTime<Utc>,
) -> StartupReport {
    let mut report = StartupReport::default();

    match registry.config().ensure_defaults().await {
        Ok(written) => report.config_written = written,
        Err(e) => fail(&mut report, "ensure_config", e),
    }

    match registry.initialize_defaults().await {
        Ok(seeded) => report.presets_seeded = seeded,
        Err(e) => fail(&mut report, "initialize_defaults", e),
    }

    match registry.migrate_legacy_settings().await {
        Ok(migrated) => report.legacy_migrated = migrated,
        Err(e) => fail(&mut report, "migrate_legacy_settings", e),
    }

    match history.cleanup_expired(now).await {
        Ok(removed) => report.expired_history_removed = removed,
        Err(e) => fail(&mut report, "cleanup_history", e),
    }

    match repair_selection(registry).await {
        Ok(repaired) => report.selection_repaired = repaired,
        Err(e) => fail(&mut report, "repair_selection", e),
    }

    info!(?report, "Startup tasks finished");
    report
}

/// Replace a selection that no longer names an eligible profile
async fn repair_selection(registry: &ModelRegistry) -> Result<bool, DomainError> {
    let mut config = registry.config().get().await?;
    let Some(selected) = config.selected_model_id().map(str::to_string) else {
        return Ok(false);
    };

    let eligible = registry
        .get_by_id(&selected)
        .await?
        .is_some_and(|p| p.is_eligible());
    if eligible {
        return Ok(false);
    }

    match registry.resolve_default_id().await? {
        Some(id) => config.set_selected_model_id(id),
        None => config.clear_selected_model_id(),
    }
    registry.config().save(&config).await?;

    info!(
        previous = %selected,
        current = config.selected_model_id().unwrap_or(""),
        "Replaced stale model selection"
    );
    Ok(true)
}

fn fail(report: &mut StartupReport, task: &'static str, e: DomainError) {
    error!(task, error = %e, "Startup task failed");
    report.failed.push(task);
}
