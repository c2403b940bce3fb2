//! Explanation service - resolves a profile and asks its backend for an explanation

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::{HistoryService, ModelRegistry};
use crate::domain::{CompletionClient, DomainError, ExplanationResult, ModelProfile};

/// Result of a connection test against a profile's backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionTestOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionTestOutcome {
    fn passed() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Explains terms using profiles from the registry
#[derive(Debug, Clone)]
pub struct ExplanationService {
    registry: ModelRegistry,
    client: Arc<dyn CompletionClient>,
    history: HistoryService,
}

impl ExplanationService {
    pub fn new(
        registry: ModelRegistry,
        client: Arc<dyn CompletionClient>,
        history: HistoryService,
    ) -> Self {
        Self {
            registry,
            client,
            history,
        }
    }

    /// Explain `term` with the named profile, or the default one when no id is given.
    /// With `record` set, a successful explanation is added to the history; a failed
    /// history write is logged and the explanation is still returned.
    pub async fn explain(
        &self,
        profile_id: Option<&str>,
        term: &str,
        record: bool,
    ) -> Result<ExplanationResult, DomainError> {
        let profile = self.resolve(profile_id).await?;
        let text = self.client.explain(Some(&profile), term).await?;
        let result = ExplanationResult::new(term.trim(), text, &profile);

        if record {
            if let Err(e) = self.history.record(&result).await {
                warn!(
                    profile_id = profile.id(),
                    error = %e,
                    "Failed to record explanation in history"
                );
            }
        }

        info!(profile_id = profile.id(), term = %result.term, "Explained term");
        Ok(result)
    }

    /// Test a profile's backend; an empty credential fails without any request
    pub async fn test_profile(&self, profile: &ModelProfile) -> ConnectionTestOutcome {
        if !profile.is_configured() {
            return ConnectionTestOutcome::failed("credential not configured");
        }

        if self.client.test_connection(profile).await {
            ConnectionTestOutcome::passed()
        } else {
            warn!(profile_id = profile.id(), "Connection test failed");
            ConnectionTestOutcome::failed("connection test failed")
        }
    }

    async fn resolve(&self, profile_id: Option<&str>) -> Result<ModelProfile, DomainError> {
        let id = match profile_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => self.registry.resolve_default_id().await?.ok_or_else(|| {
                DomainError::model_not_found("No enabled model with a credential is available")
            })?,
        };

        self.registry
            .get_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::model_not_found(format!("Model '{}' does not exist", id)))
    }
}
