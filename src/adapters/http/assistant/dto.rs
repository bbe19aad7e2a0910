//! HTTP DTOs for AI assistant endpoints.
//!
//! These types define the JSON request/response structure for the assistant
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::HistoryView;
use crate::ports::Message;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to send a chat message about a dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Dataset the conversation is about.
    pub file_id: String,
    /// The user's message.
    pub message: String,
    /// Display name of the file, shown to the assistant.
    #[serde(default)]
    pub file_name: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response carrying the assistant's reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply text (or a configuration notice).
    pub response: String,
    /// Echo of the dataset the reply belongs to.
    pub file_id: String,
}

/// Response for the chat history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatHistoryResponse {
    /// Recent messages, oldest first.
    pub history: Vec<Message>,
    /// Whether pinned analysis results exist for the dataset.
    pub has_context: bool,
    /// Kind of pinned analysis, when present.
    pub context_type: Option<String>,
}

impl From<HistoryView> for ChatHistoryResponse {
    fn from(view: HistoryView) -> Self {
        Self {
            history: view.history,
            has_context: view.has_context,
            context_type: view.context_type,
        }
    }
}

/// Generic status acknowledgement for context writes and deletes.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Always "ok" on success.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}
