//! Domain layer - Core entities, contracts and errors

pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod profile;
pub mod storage;

pub use config::AppConfiguration;
pub use error::DomainError;
pub use history::HistoryEntry;
pub use llm::{CompletionClient, ExplanationResult, Message, MessageRole};
pub use profile::{
    preset_profiles, validate_profile, CredentialValidator, HeuristicCredentialValidator,
    ModelProfile, ProfileDraft, ProfileValidationError,
};
pub use storage::{KeyValueStore, KeyValueStoreExt};
