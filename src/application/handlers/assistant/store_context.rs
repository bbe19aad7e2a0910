//! StoreContext command handler.
//!
//! Summarizes a fresh analysis result and stores it as the screen context
//! for the dataset's chat session.

use crate::domain::foundation::DatasetId;
use crate::ports::{AnalysisContext, ContextStore, ContextStoreError};
use std::sync::Arc;
use thiserror::Error;

use super::summarize::summarize_results;

/// Command to store analysis results as chat context.
#[derive(Debug, Clone)]
pub struct StoreContextCommand {
    /// The dataset the results belong to.
    pub file_id: DatasetId,
    /// Kind of analysis the results came from (e.g. "anova").
    pub analysis_type: String,
    /// The raw results payload as the client holds it.
    pub results: serde_json::Value,
}

impl StoreContextCommand {
    /// Creates a new store context command.
    pub fn new(
        file_id: DatasetId,
        analysis_type: impl Into<String>,
        results: serde_json::Value,
    ) -> Self {
        Self {
            file_id,
            analysis_type: analysis_type.into(),
            results,
        }
    }
}

/// Errors that can occur while storing context.
#[derive(Debug, Clone, Error)]
pub enum StoreContextError {
    /// Context store write failed.
    #[error("Context store error: {0}")]
    Store(String),
}

impl From<ContextStoreError> for StoreContextError {
    fn from(err: ContextStoreError) -> Self {
        StoreContextError::Store(err.to_string())
    }
}

/// Handler for store context commands.
pub struct StoreContextHandler {
    store: Arc<dyn ContextStore>,
}

impl StoreContextHandler {
    /// Creates a new handler with the given store.
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    /// Summarizes the results and stores them as the dataset's context.
    ///
    /// # Errors
    /// Returns `StoreContextError` if the store write fails.
    pub async fn handle(&self, cmd: StoreContextCommand) -> Result<(), StoreContextError> {
        let summary = summarize_results(&cmd.analysis_type, &cmd.results);
        let context = AnalysisContext::new(&cmd.analysis_type, summary);
        self.store.store_context(&cmd.file_id, context).await?;

        tracing::info!(
            file_id = %cmd.file_id,
            analysis_type = %cmd.analysis_type,
            "Analysis context stored"
        );
        Ok(())
    }
}
