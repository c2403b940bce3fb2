//! Infrastructure services

mod config_service;
mod explanation_service;
mod history_service;
mod model_registry;
mod startup;

pub use config_service::ConfigService;
pub use explanation_service::{ConnectionTestOutcome, ExplanationService};
pub use history_service::{
    HistoryConfig, HistoryService, DEFAULT_MAX_ENTRIES, DEFAULT_RETENTION_DAYS,
};
pub use model_registry::{ImportReport, ModelRegistry};
pub use startup::{run_startup_tasks, StartupReport};
