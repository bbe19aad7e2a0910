//! Context Store Port - Interface for per-dataset assistant state.
//!
//! This port defines how analysis snapshots and chat histories are kept
//! between requests, supporting in-memory and external cache backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ai_provider::Message;
use crate::domain::foundation::{DatasetId, Timestamp};

/// Seconds an analysis context (and idle chat history) stays readable.
pub const CONTEXT_TTL_SECS: u64 = 86_400;

/// Maximum messages retained per dataset history.
pub const HISTORY_CAP: usize = 50;

/// Default number of messages returned when listing history.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Errors that can occur during context store operations
#[derive(Debug, thiserror::Error)]
pub enum ContextStoreError {
    #[error("Failed to serialize entry: {0}")]
    SerializationFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Analysis results snapshot pinned to a dataset for assistant grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Kind of analysis the snapshot came from (e.g. "anova").
    pub analysis_type: String,
    /// Pre-summarized results text injected into assistant prompts.
    pub results_summary: String,
    /// When the snapshot was stored; drives expiry.
    pub stored_at: Timestamp,
}

impl AnalysisContext {
    /// Creates a context snapshot stamped with the current time.
    pub fn new(analysis_type: impl Into<String>, results_summary: impl Into<String>) -> Self {
        Self {
            analysis_type: analysis_type.into(),
            results_summary: results_summary.into(),
            stored_at: Timestamp::now(),
        }
    }

    /// Returns true once the snapshot has outlived [`CONTEXT_TTL_SECS`].
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        self.stored_at.plus_secs(CONTEXT_TTL_SECS).is_before(now)
    }
}

/// Port for keeping per-dataset assistant state between requests
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Store an analysis context, replacing any previous one
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset the results belong to
    /// * `context` - The snapshot to store
    ///
    /// # Errors
    /// Returns `ContextStoreError` if the write fails
    async fn store_context(
        &self,
        dataset_id: &DatasetId,
        context: AnalysisContext,
    ) -> Result<(), ContextStoreError>;

    /// Fetch the analysis context for a dataset
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset to look up
    ///
    /// # Returns
    /// The stored context, or `None` when absent or older than
    /// [`CONTEXT_TTL_SECS`]
    ///
    /// # Errors
    /// Returns `ContextStoreError` if the read fails
    async fn get_context(
        &self,
        dataset_id: &DatasetId,
    ) -> Result<Option<AnalysisContext>, ContextStoreError>;

    /// Append a message to the dataset's chat history
    ///
    /// Oldest entries are dropped once the history exceeds [`HISTORY_CAP`].
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset the conversation is about
    /// * `message` - The message to append
    ///
    /// # Errors
    /// Returns `ContextStoreError` if the write fails
    async fn append_history(
        &self,
        dataset_id: &DatasetId,
        message: Message,
    ) -> Result<(), ContextStoreError>;

    /// List the most recent history messages in chronological order
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset the conversation is about
    /// * `limit` - Maximum number of messages to return
    ///
    /// # Returns
    /// Up to `limit` messages, oldest first; empty when no history exists
    ///
    /// # Errors
    /// Returns `ContextStoreError` if the read fails
    async fn history(
        &self,
        dataset_id: &DatasetId,
        limit: usize,
    ) -> Result<Vec<Message>, ContextStoreError>;

    /// Delete the context and history for a dataset
    ///
    /// Clearing an unknown dataset is a no-op.
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset to clear
    ///
    /// # Errors
    /// Returns `ContextStoreError` if the delete fails
    async fn clear(&self, dataset_id: &DatasetId) -> Result<(), ContextStoreError>;
}
