//! Profile domain - model profile definition, validation and presets

mod entity;
mod preset;
mod validation;

pub use entity::{ModelProfile, ProfileDraft, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use preset::{preset_profiles, LEGACY_MODEL_NAME, LEGACY_PROFILE_ID};
#[cfg(test)]
pub use validation::MockCredentialValidator;
pub use validation::{
    is_valid_api_url, validate_profile, CredentialValidator, HeuristicCredentialValidator,
    ProfileValidationError, MAX_MAX_TOKENS, MAX_TEMPERATURE, MIN_MAX_TOKENS, MIN_TEMPERATURE,
};
