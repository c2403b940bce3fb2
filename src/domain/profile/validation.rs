//! Profile validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ProfileDraft;

/// Regex pattern for valid profile IDs
static PROFILE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("profile id pattern is valid"));

/// Credential prefixes recognized by the heuristic validator
static CREDENTIAL_PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(sk-|ak-|key-|api-)").expect("credential pattern is valid"));

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;
pub const MIN_MAX_TOKENS: f64 = 1.0;
pub const MAX_MAX_TOKENS: f64 = 32000.0;

/// Profile validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileValidationError {
    EmptyId,
    InvalidIdFormat { id: String },
    EmptyDisplayName,
    EmptyApiUrl,
    InvalidApiUrl { url: String },
    EmptyDefaultModelName,
    InvalidCredential,
    InvalidTemperature { value: f64 },
    InvalidMaxTokens { value: f64 },
}

impl ProfileValidationError {
    /// Name of the profile field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::InvalidIdFormat { .. } => "id",
            Self::EmptyDisplayName => "displayName",
            Self::EmptyApiUrl | Self::InvalidApiUrl { .. } => "apiUrl",
            Self::EmptyDefaultModelName => "defaultModelName",
            Self::InvalidCredential => "credential",
            Self::InvalidTemperature { .. } => "temperature",
            Self::InvalidMaxTokens { .. } => "maxTokens",
        }
    }
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Profile ID cannot be empty"),
            Self::InvalidIdFormat { id } => write!(
                f,
                "Invalid profile ID '{}': only letters, digits, underscores and hyphens are allowed",
                id
            ),
            Self::EmptyDisplayName => write!(f, "Display name cannot be empty"),
            Self::EmptyApiUrl => write!(f, "API URL cannot be empty"),
            Self::InvalidApiUrl { url } => {
                write!(f, "Invalid API URL '{}': must be an absolute http(s) URL", url)
            }
            Self::EmptyDefaultModelName => write!(f, "Default model name cannot be empty"),
            Self::InvalidCredential => write!(f, "Credential format is invalid"),
            Self::InvalidTemperature { value } => write!(
                f,
                "Invalid temperature {}: must be a number between {} and {}",
                value, MIN_TEMPERATURE, MAX_TEMPERATURE
            ),
            Self::InvalidMaxTokens { value } => write!(
                f,
                "Invalid max tokens {}: must be an integer between {} and {}",
                value, MIN_MAX_TOKENS, MAX_MAX_TOKENS
            ),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Decides whether a credential looks usable for a backend
#[cfg_attr(test, mockall::automock)]
pub trait CredentialValidator: Send + Sync {
    fn is_valid(&self, credential: &str) -> bool;
}

/// Vendor-agnostic heuristic: at least 10 characters, and either a well-known
/// prefix (`sk-`, `ak-`, `key-`, `api-`) or longer than 20 characters
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCredentialValidator;

impl CredentialValidator for HeuristicCredentialValidator {
    fn is_valid(&self, credential: &str) -> bool {
        let trimmed = credential.trim();

        if trimmed.chars().count() < 10 {
            return false;
        }

        CREDENTIAL_PREFIX_PATTERN.is_match(trimmed) || trimmed.chars().count() > 20
    }
}

/// Validate an absolute http(s) URL
pub fn is_valid_api_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Validate a profile draft, collecting every failure in field order
pub fn validate_profile(
    draft: &ProfileDraft,
    credentials: &dyn CredentialValidator,
) -> Vec<ProfileValidationError> {
    let mut errors = Vec::new();

    match draft.id.as_deref() {
        None => errors.push(ProfileValidationError::EmptyId),
        Some(id) if id.trim().is_empty() => errors.push(ProfileValidationError::EmptyId),
        Some(id) if !PROFILE_ID_PATTERN.is_match(id) => {
            errors.push(ProfileValidationError::InvalidIdFormat { id: id.to_string() });
        }
        Some(_) => {}
    }

    if is_blank(draft.display_name.as_deref()) {
        errors.push(ProfileValidationError::EmptyDisplayName);
    }

    match draft.api_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            if !is_valid_api_url(url) {
                errors.push(ProfileValidationError::InvalidApiUrl {
                    url: url.to_string(),
                });
            }
        }
        _ => errors.push(ProfileValidationError::EmptyApiUrl),
    }

    if is_blank(draft.default_model_name.as_deref()) {
        errors.push(ProfileValidationError::EmptyDefaultModelName);
    }

    if let Some(credential) = draft.credential.as_deref() {
        if !credential.is_empty() && !credentials.is_valid(credential) {
            errors.push(ProfileValidationError::InvalidCredential);
        }
    }

    if let Some(value) = draft.temperature {
        if !value.is_finite() || !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
            errors.push(ProfileValidationError::InvalidTemperature { value });
        }
    }

    if let Some(value) = draft.max_tokens {
        let integral = value.is_finite() && value.fract() == 0.0;
        if !integral || !(MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(&value) {
            errors.push(ProfileValidationError::InvalidMaxTokens { value });
        }
    }

    errors
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
