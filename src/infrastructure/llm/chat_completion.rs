use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http_client::{HttpClient, HttpClientTrait, HttpResponse, TransportError};
use crate::domain::llm::{explanation_messages, CompletionClient, Message};
use crate::domain::{DomainError, ModelProfile};

/// Budget for one explanation request, connection through body
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for OpenAI-compatible `/chat/completions` endpoints
#[derive(Debug)]
pub struct ChatCompletionClient<C: HttpClientTrait> {
    client: C,
}

impl ChatCompletionClient<HttpClient> {
    /// Client backed by reqwest with the given request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self::new(HttpClient::with_timeout(timeout)?))
    }
}

impl<C: HttpClientTrait> ChatCompletionClient<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn build_request<'a>(profile: &'a ModelProfile, term: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: profile.default_model_name(),
            messages: explanation_messages(term),
            temperature: profile.effective_temperature(),
            max_tokens: profile.effective_max_tokens(),
        }
    }

    fn parse_success(profile: &ModelProfile, response: &HttpResponse) -> Result<String, DomainError> {
        let parsed: ChatCompletionResponse = serde_json::from_str(&response.body).map_err(|e| {
            DomainError::api_with_details(
                format!("{}: could not read an explanation from the response", profile.display_name()),
                e.to_string(),
            )
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                DomainError::api(format!(
                    "{}: the response contained no explanation",
                    profile.display_name()
                ))
            })
    }

    fn parse_failure(profile: &ModelProfile, response: &HttpResponse) -> DomainError {
        let message = serde_json::from_str::<ErrorResponse>(&response.body)
            .ok()
            .and_then(|body| body.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("API request failed ({})", response.status));

        DomainError::api_with_details(
            format!("{}: {}", profile.display_name(), message),
            format!("HTTP {}", response.status),
        )
    }

    fn map_transport(profile: &ModelProfile, error: TransportError) -> DomainError {
        match error {
            TransportError::Timeout => DomainError::network(format!(
                "{}: request timed out, please try again later",
                profile.display_name()
            )),
            TransportError::Connect(details) => DomainError::network(format!(
                "{}: network connection failed ({})",
                profile.display_name(),
                details
            )),
            TransportError::Body(details) => DomainError::api_with_details(
                format!("{}: failed to get an explanation", profile.display_name()),
                details,
            ),
        }
    }
}

/// Joins the base URL and the endpoint with exactly one slash
pub fn chat_completions_url(api_url: &str) -> String {
    format!("{}/chat/completions", api_url.trim_end_matches('/'))
}

#[async_trait]
impl<C: HttpClientTrait> CompletionClient for ChatCompletionClient<C> {
    async fn explain(
        &self,
        profile: Option<&ModelProfile>,
        term: &str,
    ) -> Result<String, DomainError> {
        let profile =
            profile.ok_or_else(|| DomainError::model_not_found("Model profile does not exist"))?;

        if !profile.is_configured() {
            return Err(DomainError::model_not_configured(format!(
                "The credential for {} is not configured",
                profile.display_name()
            )));
        }

        let term = term.trim();
        if term.is_empty() {
            return Err(DomainError::term_missing("Please enter an AI term"));
        }

        let url = chat_completions_url(profile.api_url());
        let body = serde_json::to_value(Self::build_request(profile, term))
            .map_err(|e| DomainError::api(format!("Failed to encode request: {}", e)))?;
        let auth_header = format!("Bearer {}", profile.credential().trim());
        let headers = vec![
            ("Content-Type", "application/json"),
            ("Authorization", auth_header.as_str()),
        ];

        debug!(
            profile_id = profile.id(),
            model = profile.default_model_name(),
            url = %url,
            "Requesting explanation"
        );

        let response = self
            .client
            .post_json(&url, headers, &body)
            .await
            .map_err(|e| Self::map_transport(profile, e));

        let result = response.and_then(|response| {
            if response.is_success() {
                Self::parse_success(profile, &response)
            } else {
                Err(Self::parse_failure(profile, &response))
            }
        });

        if let Err(ref e) = result {
            warn!(profile_id = profile.id(), kind = e.kind(), error = %e, "Explanation failed");
        }

        result
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}
