//! Error responses for the HTTP boundary

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error type used for malformed requests that never reached the core
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Error body: `{ "error": { "type", "message", "details"? } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    error_type: error_type.into(),
                    message: message.into(),
                    details: None,
                },
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.response.error.details = Some(details.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_REQUEST, message)
    }
}

/// HTTP status for each domain error kind
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation { .. } | DomainError::TermMissing { .. } => {
            StatusCode::BAD_REQUEST
        }
        DomainError::ModelNotFound { .. } | DomainError::ProfileNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        DomainError::ModelNotConfigured { .. } | DomainError::ProfileNotConfigured { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::Network { .. } => StatusCode::GATEWAY_TIMEOUT,
        DomainError::Api { .. } => StatusCode::BAD_GATEWAY,
        DomainError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let api_error = Self::new(status_for(&err), err.kind(), err.message());

        match err {
            DomainError::Api {
                details: Some(details),
                ..
            } => api_error.with_details(details),
            _ => api_error,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}
