//! Message endpoint - the type-tagged request/response contract used by UI surfaces

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::AppState;
use super::types::{ApiError, Json};
use crate::domain::{DomainError, ExplanationResult, HistoryEntry, ModelProfile, ProfileDraft};
use crate::infrastructure::services::{ConnectionTestOutcome, ImportReport};

/// A request from a UI surface, tagged by `type`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ExtensionRequest {
    GetModels,
    GetEnabledModels,
    GetDefaultModelId,
    SetDefaultModel {
        model_id: String,
    },
    SaveModel {
        model: ProfileDraft,
    },
    DeleteModel {
        model_id: String,
    },
    TestModel {
        model: ProfileDraft,
    },
    ImportModels {
        models: Vec<ProfileDraft>,
    },
    ExportModels {
        #[serde(default)]
        include_credentials: bool,
    },
    Explain {
        #[serde(default)]
        profile_id: Option<String>,
        term: String,
        #[serde(default)]
        record: bool,
    },
    GetHistory,
    ClearHistory,
}

impl ExtensionRequest {
    fn tag(&self) -> &'static str {
        match self {
            Self::GetModels => "GET_MODELS",
            Self::GetEnabledModels => "GET_ENABLED_MODELS",
            Self::GetDefaultModelId => "GET_DEFAULT_MODEL_ID",
            Self::SetDefaultModel { .. } => "SET_DEFAULT_MODEL",
            Self::SaveModel { .. } => "SAVE_MODEL",
            Self::DeleteModel { .. } => "DELETE_MODEL",
            Self::TestModel { .. } => "TEST_MODEL",
            Self::ImportModels { .. } => "IMPORT_MODELS",
            Self::ExportModels { .. } => "EXPORT_MODELS",
            Self::Explain { .. } => "EXPLAIN",
            Self::GetHistory => "GET_HISTORY",
            Self::ClearHistory => "CLEAR_HISTORY",
        }
    }
}

/// Response payloads, serialized flat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtensionResponse {
    Models {
        models: Vec<ModelProfile>,
    },
    DefaultModelId {
        #[serde(rename = "modelId")]
        model_id: Option<String>,
    },
    Success {
        success: bool,
    },
    ConnectionTest(ConnectionTestOutcome),
    Imported(ImportReport),
    Explanation(ExplanationResult),
    History {
        history: Vec<HistoryEntry>,
    },
}

impl ExtensionResponse {
    fn ok() -> Self {
        Self::Success { success: true }
    }
}

/// Run one request against the core services
pub async fn dispatch(
    state: &AppState,
    request: ExtensionRequest,
) -> Result<ExtensionResponse, DomainError> {
    debug!(message = request.tag(), "Dispatching message");

    match request {
        ExtensionRequest::GetModels => Ok(ExtensionResponse::Models {
            models: state.registry.list_all().await?,
        }),
        ExtensionRequest::GetEnabledModels => Ok(ExtensionResponse::Models {
            models: state.registry.list_enabled().await?,
        }),
        ExtensionRequest::GetDefaultModelId => Ok(ExtensionResponse::DefaultModelId {
            model_id: state.registry.resolve_default_id().await?,
        }),
        ExtensionRequest::SetDefaultModel { model_id } => {
            state.registry.set_default(&model_id).await?;
            Ok(ExtensionResponse::ok())
        }
        ExtensionRequest::SaveModel { model } => {
            state.registry.save_draft(model).await?;
            Ok(ExtensionResponse::ok())
        }
        ExtensionRequest::DeleteModel { model_id } => {
            state.registry.delete(&model_id).await?;
            Ok(ExtensionResponse::ok())
        }
        ExtensionRequest::TestModel { model } => {
            let profile = model.into_profile();
            Ok(ExtensionResponse::ConnectionTest(
                state.explanations.test_profile(&profile).await,
            ))
        }
        ExtensionRequest::ImportModels { models } => Ok(ExtensionResponse::Imported(
            state.registry.import_profiles(models).await?,
        )),
        ExtensionRequest::ExportModels {
            include_credentials,
        } => Ok(ExtensionResponse::Models {
            models: state.registry.export_profiles(include_credentials).await?,
        }),
        ExtensionRequest::Explain {
            profile_id,
            term,
            record,
        } => Ok(ExtensionResponse::Explanation(
            state
                .explanations
                .explain(profile_id.as_deref(), &term, record)
                .await?,
        )),
        ExtensionRequest::GetHistory => Ok(ExtensionResponse::History {
            history: state.history.list().await?,
        }),
        ExtensionRequest::ClearHistory => {
            state.history.clear().await?;
            Ok(ExtensionResponse::ok())
        }
    }
}

/// POST /messages
pub async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<ExtensionRequest>,
) -> Result<Json<ExtensionResponse>, ApiError> {
    Ok(Json(dispatch(&state, request).await?))
}
