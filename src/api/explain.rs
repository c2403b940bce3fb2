//! Explain endpoint used by the full-screen surface

use axum::extract::State;
use serde::Deserialize;

use super::state::AppState;
use super::types::{ApiError, Json};
use crate::domain::ExplanationResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    /// Profile to use; the resolved default when absent
    #[serde(default)]
    pub profile_id: Option<String>,
    pub term: String,
    /// Also store the explanation in the history
    #[serde(default)]
    pub record: bool,
}

/// POST /explain
pub async fn explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<ExplanationResult>, ApiError> {
    let result = state
        .explanations
        .explain(request.profile_id.as_deref(), &request.term, request.record)
        .await?;

    Ok(Json(result))
}
