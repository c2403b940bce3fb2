//! Configuration service - reads and writes the UI configuration object

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::storage::CONFIG_KEY;
use crate::domain::{AppConfiguration, DomainError, KeyValueStore, KeyValueStoreExt};

/// Access to the `config` key of the store
#[derive(Debug, Clone)]
pub struct ConfigService {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored configuration, if one was ever written
    pub async fn find(&self) -> Result<Option<AppConfiguration>, DomainError> {
        self.store.get_json(CONFIG_KEY).await
    }

    /// The stored configuration, or an empty one when nothing is stored
    pub async fn get(&self) -> Result<AppConfiguration, DomainError> {
        Ok(self.find().await?.unwrap_or_default())
    }

    /// Replace the whole configuration object in one write
    pub async fn save(&self, config: &AppConfiguration) -> Result<(), DomainError> {
        debug!(
            selected_model_id = config.selected_model_id().unwrap_or(""),
            "Saving configuration"
        );
        self.store.set_json(CONFIG_KEY, config).await
    }

    /// Write the default configuration when none exists, or fill fields an
    /// older configuration lacks. Returns true when a write happened.
    pub async fn ensure_defaults(&self) -> Result<bool, DomainError> {
        match self.find().await? {
            None => {
                info!("No configuration found, writing defaults");
                self.save(&AppConfiguration::with_defaults()).await?;
                Ok(true)
            }
            Some(mut config) => {
                if config.fill_missing() {
                    info!("Filling missing configuration fields");
                    self.save(&config).await?;
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }
}
