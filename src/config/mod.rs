//! Process configuration

mod app_config;

pub use app_config::{
    AppConfig, ClientConfig, HistorySettings, LogFormat, LoggingConfig, ServerConfig,
    StorageConfig,
};
