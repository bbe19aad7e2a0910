//! HTTP handlers for AI assistant endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. The context write endpoint accepts a multipart form with the
//! results payload as a JSON string field.

use std::sync::Arc;

use axum::extract::{Json, Multipart, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::{
    ChatCommand, ChatError, ChatHandler, ClearContextCommand, ClearContextError,
    ClearContextHandler, GetHistoryError, GetHistoryHandler, GetHistoryQuery, StoreContextCommand,
    StoreContextError, StoreContextHandler,
};
use crate::domain::foundation::{DatasetId, DomainError, ErrorCode, ValidationError};
use crate::ports::{AIProvider, ContextStore};

use super::super::error::ApiError;
use super::dto::{ChatHistoryResponse, ChatRequest, ChatResponse, StatusResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the assistant's dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct AssistantAppState {
    pub ai_provider: Arc<dyn AIProvider>,
    pub context_store: Arc<dyn ContextStore>,
}

impl AssistantAppState {
    pub fn new(ai_provider: Arc<dyn AIProvider>, context_store: Arc<dyn ContextStore>) -> Self {
        Self {
            ai_provider,
            context_store,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn chat_handler(&self) -> ChatHandler {
        ChatHandler::new(self.ai_provider.clone(), self.context_store.clone())
    }

    pub fn store_context_handler(&self) -> StoreContextHandler {
        StoreContextHandler::new(self.context_store.clone())
    }

    pub fn history_handler(&self) -> GetHistoryHandler {
        GetHistoryHandler::new(self.context_store.clone())
    }

    pub fn clear_context_handler(&self) -> ClearContextHandler {
        ClearContextHandler::new(self.context_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Send a message to the analysis assistant
pub async fn chat(
    State(state): State<AssistantAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset_id = DatasetId::new(&request.file_id)?;

    let handler = state.chat_handler();
    let mut cmd = ChatCommand::new(dataset_id, request.message);
    if let Some(file_name) = request.file_name {
        cmd = cmd.with_file_name(file_name);
    }

    let reply = handler.handle(cmd).await?;

    Ok(Json(ChatResponse {
        response: reply,
        file_id: request.file_id,
    }))
}

/// POST /api/chat/context - Pin analysis results for assistant grounding
pub async fn store_context(
    State(state): State<AssistantAppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file_id = None;
    let mut analysis_type = None;
    let mut results_raw = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file_id") => {
                file_id = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("analysis_type") => {
                analysis_type = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("results") => {
                results_raw = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let file_id =
        file_id.ok_or_else(|| ApiError::from(ValidationError::empty_field("file_id")))?;
    let analysis_type = analysis_type
        .ok_or_else(|| ApiError::from(ValidationError::empty_field("analysis_type")))?;
    let results_raw =
        results_raw.ok_or_else(|| ApiError::from(ValidationError::empty_field("results")))?;

    let results: serde_json::Value = serde_json::from_str(&results_raw)
        .map_err(|e| ValidationError::invalid_format("results", e.to_string()))?;

    let dataset_id = DatasetId::new(&file_id)?;
    let handler = state.store_context_handler();
    handler
        .handle(StoreContextCommand::new(dataset_id, analysis_type, results))
        .await?;

    Ok(Json(StatusResponse {
        status: "ok".to_string(),
        message: format!("Context stored for {}", file_id),
    }))
}

/// GET /api/chat/history/:file_id - Fetch chat history and context status
pub async fn get_history(
    State(state): State<AssistantAppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset_id = DatasetId::new(&file_id)?;

    let handler = state.history_handler();
    let view = handler.handle(GetHistoryQuery::new(dataset_id)).await?;

    Ok(Json(ChatHistoryResponse::from(view)))
}

/// DELETE /api/chat/context/:file_id - Clear pinned context and history
pub async fn clear_context(
    State(state): State<AssistantAppState>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let dataset_id = DatasetId::new(&file_id)?;

    let handler = state.clear_context_handler();
    handler.handle(ClearContextCommand::new(dataset_id)).await?;

    Ok(Json(StatusResponse {
        status: "ok".to_string(),
        message: format!("Context cleared for {}", file_id),
    }))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    ValidationError::invalid_format("form", err.to_string()).into()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(DomainError::new(ErrorCode::InternalError, err.to_string()))
    }
}

impl From<StoreContextError> for ApiError {
    fn from(err: StoreContextError) -> Self {
        Self(DomainError::new(ErrorCode::InternalError, err.to_string()))
    }
}

impl From<GetHistoryError> for ApiError {
    fn from(err: GetHistoryError) -> Self {
        Self(DomainError::new(ErrorCode::InternalError, err.to_string()))
    }
}

impl From<ClearContextError> for ApiError {
    fn from(err: ClearContextError) -> Self {
        Self(DomainError::new(ErrorCode::InternalError, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::context::InMemoryContextStore;
    use crate::ports::{
        AIError, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    // ────────────────────────────────────────────────────────────────
    // Mocks and helpers
    // ────────────────────────────────────────────────────────────────

    struct MockProvider {
        reply: &'static str,
    }

    #[async_trait]
    impl AIProvider for MockProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, AIError> {
            Ok(CompletionResponse {
                content: self.reply.to_string(),
                model: "mock".to_string(),
                finish_reason: FinishReason::Stop,
            })
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn provider_info(&self) -> ProviderInfo {
            ProviderInfo::new("mock", "mock")
        }
    }

    fn test_state(reply: &'static str) -> AssistantAppState {
        AssistantAppState::new(
            Arc::new(MockProvider { reply }),
            Arc::new(InMemoryContextStore::new()),
        )
    }

    fn form_request(fields: &[(&str, &str)]) -> Request<Body> {
        const BOUNDARY: &str = "test-boundary";

        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!("--{}\r\n", BOUNDARY));
            body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            ));
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        Request::builder()
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn form_multipart(fields: &[(&str, &str)]) -> Multipart {
        Multipart::from_request(form_request(fields), &())
            .await
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ────────────────────────────────────────────────────────────────
    // Chat
    // ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn chat_returns_reply_and_echoes_file_id() {
        let request = ChatRequest {
            file_id: "f1".to_string(),
            message: "What stands out?".to_string(),
            file_name: Some("wine.csv".to_string()),
        };

        let response = chat(State(test_state("Lactate looks significant.")), Json(request))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["response"], "Lactate looks significant.");
        assert_eq!(body["file_id"], "f1");
    }

    #[tokio::test]
    async fn chat_rejects_empty_file_id() {
        let request = ChatRequest {
            file_id: "".to_string(),
            message: "hi".to_string(),
            file_name: None,
        };

        let err = chat(State(test_state("unused")), Json(request))
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    // ────────────────────────────────────────────────────────────────
    // Context storage
    // ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn store_context_acknowledges_the_dataset() {
        let state = test_state("unused");
        let multipart = form_multipart(&[
            ("file_id", "f1"),
            ("analysis_type", "anova"),
            ("results", r#"{"summary": {"totalVariables": 3}}"#),
        ])
        .await;

        let response = store_context(State(state.clone()), multipart)
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Context stored for f1");

        let history = get_history(State(state), Path("f1".to_string()))
            .await
            .unwrap()
            .into_response();
        let body = response_json(history).await;
        assert_eq!(body["has_context"], true);
        assert_eq!(body["context_type"], "anova");
    }

    #[tokio::test]
    async fn store_context_rejects_invalid_results_json() {
        let multipart = form_multipart(&[
            ("file_id", "f1"),
            ("analysis_type", "anova"),
            ("results", "not json"),
        ])
        .await;

        let err = store_context(State(test_state("unused")), multipart)
            .await
            .err()
            .unwrap();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error_code"], "INVALID_FORMAT");
    }

    #[tokio::test]
    async fn store_context_requires_all_fields() {
        let multipart = form_multipart(&[("file_id", "f1")]).await;

        let err = store_context(State(test_state("unused")), multipart)
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    // ────────────────────────────────────────────────────────────────
    // History and clearing
    // ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn history_for_unknown_dataset_is_empty() {
        let response = get_history(State(test_state("unused")), Path("missing".to_string()))
            .await
            .unwrap()
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["history"], json!([]));
        assert_eq!(body["has_context"], false);
        assert_eq!(body["context_type"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn chat_turns_show_up_in_history() {
        let state = test_state("An answer.");
        let request = ChatRequest {
            file_id: "f1".to_string(),
            message: "A question?".to_string(),
            file_name: None,
        };

        chat(State(state.clone()), Json(request)).await.unwrap();

        let response = get_history(State(state), Path("f1".to_string()))
            .await
            .unwrap()
            .into_response();
        let body = response_json(response).await;
        assert_eq!(body["history"][0]["role"], "user");
        assert_eq!(body["history"][0]["content"], "A question?");
        assert_eq!(body["history"][1]["role"], "assistant");
        assert_eq!(body["history"][1]["content"], "An answer.");
    }

    #[tokio::test]
    async fn clear_context_acknowledges_and_wipes() {
        let state = test_state("A reply.");
        let request = ChatRequest {
            file_id: "f1".to_string(),
            message: "hello".to_string(),
            file_name: None,
        };
        chat(State(state.clone()), Json(request)).await.unwrap();

        let response = clear_context(State(state.clone()), Path("f1".to_string()))
            .await
            .unwrap()
            .into_response();
        let body = response_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["message"], "Context cleared for f1");

        let history = get_history(State(state), Path("f1".to_string()))
            .await
            .unwrap()
            .into_response();
        let body = response_json(history).await;
        assert_eq!(body["history"], json!([]));
    }

    // ────────────────────────────────────────────────────────────────
    // Error mapping
    // ────────────────────────────────────────────────────────────────

    #[test]
    fn store_failures_map_to_internal_error() {
        let err = ApiError::from(ChatError::Store("backend down".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err = ApiError::from(GetHistoryError::Store("backend down".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
