use serde::{Deserialize, Serialize};

use crate::domain::profile::ModelProfile;

/// Outcome of a successful explanation; the core does not persist it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationResult {
    pub term: String,
    pub explanation_text: String,
    pub profile_id: String,
    pub profile_display_name: String,
}

impl ExplanationResult {
    pub fn new(
        term: impl Into<String>,
        explanation_text: impl Into<String>,
        profile: &ModelProfile,
    ) -> Self {
        Self {
            term: term.into(),
            explanation_text: explanation_text.into(),
            profile_id: profile.id().to_string(),
            profile_display_name: profile.display_name().to_string(),
        }
    }
}
