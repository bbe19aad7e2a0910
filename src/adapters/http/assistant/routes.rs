//! Route configuration for AI assistant endpoints.
//!
//! Configures Axum router with assistant chat and context routes.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{chat, clear_context, get_history, store_context, AssistantAppState};

/// Creates the assistant router with all endpoints.
///
/// Routes:
/// - `POST /api/chat` - Send a message to the analysis assistant
/// - `POST /api/chat/context` - Pin analysis results for assistant grounding
/// - `GET /api/chat/history/:file_id` - Fetch chat history and context status
/// - `DELETE /api/chat/context/:file_id` - Clear pinned context and history
pub fn assistant_routes() -> Router<AssistantAppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/context", post(store_context))
        .route("/api/chat/history/:file_id", get(get_history))
        .route("/api/chat/context/:file_id", delete(clear_context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::context::InMemoryContextStore;
    use crate::ports::{
        AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct UnconfiguredProvider;

    #[async_trait]
    impl AIProvider for UnconfiguredProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, AIError> {
            Err(AIError::NotConfigured)
        }

        fn is_configured(&self) -> bool {
            false
        }

        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo::new("none", "none")
        }
    }

    fn app() -> Router {
        let state = AssistantAppState::new(
            Arc::new(UnconfiguredProvider),
            Arc::new(InMemoryContextStore::new()),
        );
        assistant_routes().with_state(state)
    }

    #[tokio::test]
    async fn history_route_is_mounted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/chat/history/f1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn clear_route_requires_delete_method() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/chat/context/f1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/chat/context/f1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn chat_route_reports_unconfigured_provider_as_text() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"file_id": "f1", "message": "hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["response"]
            .as_str()
            .unwrap()
            .contains("not configured"));
    }
}
