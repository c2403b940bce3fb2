use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::explain;
use super::health;
use super::messages;
use super::state::AppState;

/// Create the router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/messages", post(messages::handle_message))
        .route("/explain", post(explain::explain))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::llm::MockCompletionClient;
    use crate::domain::{DomainError, ModelProfile};
    use crate::infrastructure::services::HistoryConfig;
    use crate::infrastructure::storage::InMemoryKeyValueStore;

    async fn app_with(client: MockCompletionClient) -> (Router, AppState) {
        let state = AppState::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(client),
            HistoryConfig::default(),
        );

        state
            .registry
            .save(
                ModelProfile::new("p1", "Profile One", "https://example.test/v1", "m1")
                    .with_credential("sk-abcdefghij")
                    .with_enabled(true),
            )
            .await
            .unwrap();
        state
            .registry
            .save(ModelProfile::new("p2", "Profile Two", "https://example.test/v1", "m2"))
            .await
            .unwrap();

        (create_router(state.clone()), state)
    }

    async fn app() -> (Router, AppState) {
        app_with(MockCompletionClient::with_text("An explanation")).await
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    async fn message(app: Router, body: Value) -> (StatusCode, Value) {
        post_json(app, "/messages", body).await
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app().await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_models() {
        let (app, _) = app().await;

        let (status, body) = message(app, json!({ "type": "GET_MODELS" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["models"].as_array().unwrap().len(), 2);
        assert_eq!(body["models"][0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_get_enabled_models() {
        let (app, _) = app().await;

        let (_, body) = message(app, json!({ "type": "GET_ENABLED_MODELS" })).await;
        let models = body["models"].as_array().unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0]["id"], "p1");
    }

    #[tokio::test]
    async fn test_default_model_id() {
        let (app, _) = app().await;

        let (_, body) = message(app, json!({ "type": "GET_DEFAULT_MODEL_ID" })).await;
        assert_eq!(body, json!({ "modelId": "p1" }));
    }

    #[tokio::test]
    async fn test_set_default_model_errors() {
        let (app, _) = app().await;

        let (status, body) = message(
            app.clone(),
            json!({ "type": "SET_DEFAULT_MODEL", "modelId": "nonexistent" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "PROFILE_NOT_FOUND");

        let (status, body) =
            message(app, json!({ "type": "SET_DEFAULT_MODEL", "modelId": "p2" })).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["type"], "PROFILE_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_save_and_delete_model() {
        let (app, state) = app().await;

        let (status, body) = message(
            app.clone(),
            json!({
                "type": "SAVE_MODEL",
                "model": {
                    "id": "custom",
                    "displayName": "Custom",
                    "apiUrl": "http://localhost:11434/v1",
                    "defaultModelName": "llama3",
                    "credential": "sk-localkey123",
                    "enabled": true
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert!(state.registry.get_by_id("custom").await.unwrap().is_some());

        let (status, _) =
            message(app, json!({ "type": "DELETE_MODEL", "modelId": "custom" })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(state.registry.get_by_id("custom").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_invalid_model() {
        let (app, _) = app().await;

        let (status, body) = message(
            app,
            json!({ "type": "SAVE_MODEL", "model": { "id": "bad id", "apiUrl": "ftp://x" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Display name cannot be empty"));
    }

    #[tokio::test]
    async fn test_test_model() {
        let (app, _) = app().await;

        let (status, body) = message(
            app.clone(),
            json!({
                "type": "TEST_MODEL",
                "model": {
                    "id": "p1",
                    "displayName": "Profile One",
                    "apiUrl": "https://example.test/v1",
                    "defaultModelName": "m1",
                    "credential": "sk-abcdefghij"
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (_, body) = message(
            app,
            json!({ "type": "TEST_MODEL", "model": { "id": "p2", "displayName": "Two" } }),
        )
        .await;
        assert_eq!(
            body,
            json!({ "success": false, "error": "credential not configured" })
        );
    }

    #[tokio::test]
    async fn test_import_and_export() {
        let (app, _) = app().await;

        let (_, body) = message(
            app.clone(),
            json!({
                "type": "IMPORT_MODELS",
                "models": [
                    {
                        "id": "imported",
                        "displayName": "Imported",
                        "apiUrl": "https://example.test/v1",
                        "defaultModelName": "m1"
                    },
                    { "id": "p1", "displayName": "Dup", "apiUrl": "https://example.test/v1", "defaultModelName": "m1" }
                ]
            }),
        )
        .await;
        assert_eq!(body["imported"], 1);
        assert_eq!(body["errors"], json!(["p1: ID already exists"]));

        let (_, body) = message(app, json!({ "type": "EXPORT_MODELS" })).await;
        let models = body["models"].as_array().unwrap();
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|m| m["credential"] == ""));
    }

    #[tokio::test]
    async fn test_explain_endpoint() {
        let (app, state) = app().await;

        let (status, body) =
            post_json(app, "/explain", json!({ "term": "Transformer", "record": true })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "term": "Transformer",
                "explanationText": "An explanation",
                "profileId": "p1",
                "profileDisplayName": "Profile One"
            })
        );
        assert_eq!(state.history.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explain_unknown_profile() {
        let (app, _) = app().await;

        let (status, body) = post_json(
            app,
            "/explain",
            json!({ "profileId": "nonexistent", "term": "Transformer" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "MODEL_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_explain_backend_failure() {
        let (app, _) = app_with(MockCompletionClient::with_error(DomainError::api_with_details(
            "Profile One: bad key",
            "HTTP 401",
        )))
        .await;

        let (status, body) = post_json(app, "/explain", json!({ "term": "RAG" })).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Profile One: bad key");
        assert_eq!(body["error"]["details"], "HTTP 401");
    }

    #[tokio::test]
    async fn test_history_messages() {
        let (app, _) = app().await;

        message(
            app.clone(),
            json!({ "type": "EXPLAIN", "term": "GAN", "record": true }),
        )
        .await;

        let (_, body) = message(app.clone(), json!({ "type": "GET_HISTORY" })).await;
        assert_eq!(body["history"][0]["term"], "GAN");

        let (_, body) = message(app.clone(), json!({ "type": "CLEAR_HISTORY" })).await;
        assert_eq!(body, json!({ "success": true }));

        let (_, body) = message(app, json!({ "type": "GET_HISTORY" })).await;
        assert_eq!(body, json!({ "history": [] }));
    }

    #[tokio::test]
    async fn test_unknown_message_type() {
        let (app, _) = app().await;

        let (status, body) = message(app, json!({ "type": "OPEN_SETTINGS" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["type"], "INVALID_REQUEST");
    }
}
