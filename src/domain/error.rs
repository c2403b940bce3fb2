use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Model not found: {message}")]
    ModelNotFound { message: String },

    #[error("Model not configured: {message}")]
    ModelNotConfigured { message: String },

    #[error("Term missing: {message}")]
    TermMissing { message: String },

    #[error("Validation error: {}", messages.join("; "))]
    Validation { messages: Vec<String> },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        details: Option<String>,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Profile not found: {message}")]
    ProfileNotFound { message: String },

    #[error("Profile not configured: {message}")]
    ProfileNotConfigured { message: String },
}

impl DomainError {
    pub fn model_not_found(message: impl Into<String>) -> Self {
        Self::ModelNotFound {
            message: message.into(),
        }
    }

    pub fn model_not_configured(message: impl Into<String>) -> Self {
        Self::ModelNotConfigured {
            message: message.into(),
        }
    }

    pub fn term_missing(message: impl Into<String>) -> Self {
        Self::TermMissing {
            message: message.into(),
        }
    }

    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            details: None,
        }
    }

    pub fn api_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn profile_not_found(message: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            message: message.into(),
        }
    }

    pub fn profile_not_configured(message: impl Into<String>) -> Self {
        Self::ProfileNotConfigured {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            Self::ModelNotConfigured { .. } => "MODEL_NOT_CONFIGURED",
            Self::TermMissing { .. } => "TERM_MISSING",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::Storage { .. } => "STORE_ERROR",
            Self::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            Self::ProfileNotConfigured { .. } => "PROFILE_NOT_CONFIGURED",
        }
    }

    /// The human-readable message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            Self::Validation { messages } => messages.join("; "),
            Self::ModelNotFound { message }
            | Self::ModelNotConfigured { message }
            | Self::TermMissing { message }
            | Self::Network { message }
            | Self::Api { message, .. }
            | Self::Storage { message }
            | Self::ProfileNotFound { message }
            | Self::ProfileNotConfigured { message } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(format!("Failed to (de)serialize stored value: {}", err))
    }
}
