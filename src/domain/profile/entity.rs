//! Model profile entity and related types

use serde::{Deserialize, Serialize};

/// Temperature used when a profile does not set one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Completion token limit used when a profile does not set one
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// A configured chat-completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    /// Unique identifier, `[A-Za-z0-9_-]+`
    id: String,

    /// Human label shown to the user
    display_name: String,

    /// Base URL of the OpenAI-compatible API (e.g. `https://api.openai.com/v1`)
    api_url: String,

    /// Backend model identifier sent as `model` (e.g. "gpt-3.5-turbo")
    #[serde(alias = "defaultModel")]
    default_model_name: String,

    /// Bearer token; empty means the profile is not configured yet
    #[serde(default, alias = "apiKey")]
    credential: String,

    #[serde(default, alias = "isEnabled")]
    enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ModelProfile {
    /// Create a disabled, unconfigured profile with the required fields
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        api_url: impl Into<String>,
        default_model_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            api_url: api_url.into(),
            default_model_name: default_model_name.into(),
            credential: String::new(),
            enabled: false,
            temperature: None,
            max_tokens: None,
            description: None,
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // Getters

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn default_model_name(&self) -> &str {
        &self.default_model_name
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether a non-blank credential is present
    pub fn is_configured(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// Enabled and credentialed; only eligible profiles can be selected
    pub fn is_eligible(&self) -> bool {
        self.enabled && self.is_configured()
    }

    pub fn effective_temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn effective_max_tokens(&self) -> u32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }

    // Mutators

    pub fn set_credential(&mut self, credential: impl Into<String>) {
        self.credential = credential.into();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_default_model_name(&mut self, name: impl Into<String>) {
        self.default_model_name = name.into();
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = Some(temperature);
    }

    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = Some(max_tokens);
    }

    /// Copy of this profile with the credential blanked, for export
    pub fn without_credential(&self) -> Self {
        let mut profile = self.clone();
        profile.credential.clear();
        profile
    }
}

/// A possibly incomplete profile, as submitted by an editor before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default, alias = "defaultModel")]
    pub default_model_name: Option<String>,
    #[serde(default, alias = "apiKey")]
    pub credential: Option<String>,
    #[serde(default, alias = "isEnabled")]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Kept as a float so non-integral input can be reported instead of rejected by the parser
    #[serde(default)]
    pub max_tokens: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProfileDraft {
    /// Build a profile from a draft that already passed validation.
    /// Missing text fields become empty strings.
    pub fn into_profile(self) -> ModelProfile {
        ModelProfile {
            id: self.id.unwrap_or_default().trim().to_string(),
            display_name: self.display_name.unwrap_or_default().trim().to_string(),
            api_url: self.api_url.unwrap_or_default().trim().to_string(),
            default_model_name: self.default_model_name.unwrap_or_default().trim().to_string(),
            credential: self.credential.unwrap_or_default().trim().to_string(),
            enabled: self.enabled.unwrap_or(false),
            temperature: self.temperature,
            max_tokens: self.max_tokens.map(|value| value as u32),
            description: self.description.filter(|d| !d.trim().is_empty()),
        }
    }

    /// Id used in messages about this draft, even when it is missing
    pub fn label(&self) -> &str {
        match self.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => "<no id>",
        }
    }
}

impl From<&ModelProfile> for ProfileDraft {
    fn from(profile: &ModelProfile) -> Self {
        Self {
            id: Some(profile.id.clone()),
            display_name: Some(profile.display_name.clone()),
            api_url: Some(profile.api_url.clone()),
            default_model_name: Some(profile.default_model_name.clone()),
            credential: Some(profile.credential.clone()),
            enabled: Some(profile.enabled),
            temperature: profile.temperature,
            max_tokens: profile.max_tokens.map(f64::from),
            description: profile.description.clone(),
        }
    }
}
