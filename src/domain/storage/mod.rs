//! Storage domain - key-value store abstraction

mod repository;

pub use repository::{
    KeyValueStore, KeyValueStoreExt, CONFIG_KEY, HISTORY_KEY, LEGACY_API_KEY,
    LEGACY_MAX_TOKENS_KEY, LEGACY_MODEL_KEY, LEGACY_TEMPERATURE_KEY, MODELS_KEY,
};

#[cfg(test)]
pub use repository::mock;
