//! Chat command handler.
//!
//! Sends a user message to the AI provider together with the stored analysis
//! context and recent conversation history, then records both turns.
//!
//! Provider problems never fail the request: an unconfigured provider and a
//! failed completion both come back as chat text, so the frontend renders
//! them like any other assistant reply.

use crate::domain::foundation::DatasetId;
use crate::ports::{
    AIProvider, CompletionRequest, ContextStore, ContextStoreError, Message, MessageRole,
    DEFAULT_HISTORY_LIMIT,
};
use std::sync::Arc;
use thiserror::Error;

use super::prompts::{screen_context_block, SYSTEM_PROMPT};

/// History messages included in the completion prompt. The store keeps more
/// ([`DEFAULT_HISTORY_LIMIT`] are fetched) but only the tail reaches the model.
const PROMPT_HISTORY_MESSAGES: usize = 10;

/// Reply shown when no API key is configured.
const NOT_CONFIGURED_NOTICE: &str =
    "⚠️ AI Assistant is not configured. Please set OPENAI_API_KEY environment variable.";

/// Reply substituted when the model returns empty content.
const EMPTY_RESPONSE_NOTICE: &str = "🤔 AI returned an empty response. Please try again.";

/// Command to send a chat message about a dataset.
#[derive(Debug, Clone)]
pub struct ChatCommand {
    /// The dataset the conversation is about.
    pub file_id: DatasetId,
    /// The user's message.
    pub message: String,
    /// Display name of the file, when the client knows it.
    pub file_name: Option<String>,
}

impl ChatCommand {
    /// Creates a new chat command.
    pub fn new(file_id: DatasetId, message: impl Into<String>) -> Self {
        Self {
            file_id,
            message: message.into(),
            file_name: None,
        }
    }

    /// Sets the display name of the file.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Errors that can occur while handling a chat command.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Context store read or write failed.
    #[error("Context store error: {0}")]
    Store(String),
}

impl From<ContextStoreError> for ChatError {
    fn from(err: ContextStoreError) -> Self {
        ChatError::Store(err.to_string())
    }
}

/// Handler for chat commands.
pub struct ChatHandler {
    provider: Arc<dyn AIProvider>,
    store: Arc<dyn ContextStore>,
}

impl ChatHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(provider: Arc<dyn AIProvider>, store: Arc<dyn ContextStore>) -> Self {
        Self { provider, store }
    }

    /// Handles a chat command and returns the assistant's reply.
    ///
    /// # Errors
    /// Returns `ChatError` only when the context store fails; provider
    /// problems are reported inside the reply text.
    pub async fn handle(&self, cmd: ChatCommand) -> Result<String, ChatError> {
        if !self.provider.is_configured() {
            return Ok(NOT_CONFIGURED_NOTICE.to_string());
        }

        let context = self.store.get_context(&cmd.file_id).await?;
        let history = self
            .store
            .history(&cmd.file_id, DEFAULT_HISTORY_LIMIT)
            .await?;

        let mut request = CompletionRequest::new().with_system_prompt(SYSTEM_PROMPT);
        if let Some(ctx) = &context {
            let file_label = cmd
                .file_name
                .as_deref()
                .unwrap_or_else(|| cmd.file_id.as_str());
            request = request.with_message(
                MessageRole::System,
                screen_context_block(&ctx.analysis_type, file_label, &ctx.results_summary),
            );
        }
        let skip = history.len().saturating_sub(PROMPT_HISTORY_MESSAGES);
        request = request
            .with_messages(history.into_iter().skip(skip))
            .with_message(MessageRole::User, &cmd.message);

        let reply = match self.provider.complete(request).await {
            Ok(response) if response.content.is_empty() => EMPTY_RESPONSE_NOTICE.to_string(),
            Ok(response) => response.content,
            Err(e) => {
                tracing::error!(file_id = %cmd.file_id, error = %e, "AI completion failed");
                return Ok(format!("⚠️ Error communicating with AI: {}", e));
            }
        };

        self.store
            .append_history(&cmd.file_id, Message::user(&cmd.message))
            .await?;
        self.store
            .append_history(&cmd.file_id, Message::assistant(&reply))
            .await?;

        tracing::info!(file_id = %cmd.file_id, "Assistant reply generated");
        Ok(reply)
    }
}
