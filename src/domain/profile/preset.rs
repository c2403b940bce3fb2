//! Built-in backend presets seeded into an empty registry

use super::ModelProfile;

/// Preset that inherits the credential of a single-model install
pub const LEGACY_PROFILE_ID: &str = "chatanywhere-gpt35";

/// Backend model every single-model install used before it could be changed
pub const LEGACY_MODEL_NAME: &str = "gpt-3.5-turbo";

/// The preset profiles, all without a credential
///
/// The enabled ones are ready to use as soon as a credential is filled in.
pub fn preset_profiles() -> Vec<ModelProfile> {
    vec![
        ModelProfile::new(
            "openai-gpt35",
            "OpenAI GPT-3.5",
            "https://api.openai.com/v1",
            "gpt-3.5-turbo",
        )
        .with_enabled(true)
        .with_temperature(0.7)
        .with_max_tokens(1000)
        .with_description("Official OpenAI GPT-3.5, balancing quality and cost"),
        ModelProfile::new(
            "openai-gpt4",
            "OpenAI GPT-4",
            "https://api.openai.com/v1",
            "gpt-4",
        )
        .with_enabled(false)
        .with_temperature(0.7)
        .with_max_tokens(1000)
        .with_description("OpenAI GPT-4 with stronger comprehension"),
        ModelProfile::new(
            LEGACY_PROFILE_ID,
            "ChatAnywhere GPT-3.5",
            "https://api.chatanywhere.tech/v1",
            "gpt-3.5-turbo",
        )
        .with_enabled(true)
        .with_temperature(0.7)
        .with_max_tokens(1000)
        .with_description("Third-party GPT-3.5 relay, a cheaper option"),
        ModelProfile::new(
            "claude-3",
            "Anthropic Claude-3",
            "https://api.anthropic.com/v1",
            "claude-3-sonnet-20240229",
        )
        .with_enabled(false)
        .with_temperature(0.7)
        .with_max_tokens(1000)
        .with_description("Anthropic Claude-3 with strong reasoning"),
    ]
}
