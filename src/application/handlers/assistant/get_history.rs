//! GetHistory query handler.

use crate::domain::foundation::DatasetId;
use crate::ports::{ContextStore, ContextStoreError, Message, DEFAULT_HISTORY_LIMIT};
use std::sync::Arc;
use thiserror::Error;

/// Query for a dataset's chat history.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    /// The dataset the conversation is about.
    pub file_id: DatasetId,
}

impl GetHistoryQuery {
    /// Creates a new history query.
    pub fn new(file_id: DatasetId) -> Self {
        Self { file_id }
    }
}

/// Chat history together with the context state the assistant sees.
#[derive(Debug, Clone)]
pub struct HistoryView {
    /// Recent messages, oldest first.
    pub history: Vec<Message>,
    /// Whether a (non-expired) analysis context is stored.
    pub has_context: bool,
    /// Kind of analysis the stored context came from.
    pub context_type: Option<String>,
}

/// Errors that can occur while reading history.
#[derive(Debug, Clone, Error)]
pub enum GetHistoryError {
    /// Context store read failed.
    #[error("Context store error: {0}")]
    Store(String),
}

impl From<ContextStoreError> for GetHistoryError {
    fn from(err: ContextStoreError) -> Self {
        GetHistoryError::Store(err.to_string())
    }
}

/// Handler for history queries.
pub struct GetHistoryHandler {
    store: Arc<dyn ContextStore>,
}

impl GetHistoryHandler {
    /// Creates a new handler with the given store.
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    /// Returns the recent history and context state for a dataset.
    ///
    /// # Errors
    /// Returns `GetHistoryError` if the store read fails.
    pub async fn handle(&self, query: GetHistoryQuery) -> Result<HistoryView, GetHistoryError> {
        let history = self
            .store
            .history(&query.file_id, DEFAULT_HISTORY_LIMIT)
            .await?;
        let context = self.store.get_context(&query.file_id).await?;

        Ok(HistoryView {
            history,
            has_context: context.is_some(),
            context_type: context.map(|c| c.analysis_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AnalysisContext;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FixtureStore {
        context: Option<AnalysisContext>,
        history: Mutex<HashMap<String, Vec<Message>>>,
    }

    impl FixtureStore {
        fn empty() -> Self {
            Self {
                context: None,
                history: Mutex::new(HashMap::new()),
            }
        }

        fn with_context(context: AnalysisContext) -> Self {
            Self {
                context: Some(context),
                history: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ContextStore for FixtureStore {
        async fn store_context(
            &self,
            _dataset_id: &DatasetId,
            _context: AnalysisContext,
        ) -> Result<(), ContextStoreError> {
            Ok(())
        }

        async fn get_context(
            &self,
            _dataset_id: &DatasetId,
        ) -> Result<Option<AnalysisContext>, ContextStoreError> {
            Ok(self.context.clone())
        }

        async fn append_history(
            &self,
            dataset_id: &DatasetId,
            message: Message,
        ) -> Result<(), ContextStoreError> {
            self.history
                .lock()
                .unwrap()
                .entry(dataset_id.as_str().to_string())
                .or_default()
                .push(message);
            Ok(())
        }

        async fn history(
            &self,
            dataset_id: &DatasetId,
            limit: usize,
        ) -> Result<Vec<Message>, ContextStoreError> {
            let history = self.history.lock().unwrap();
            let messages = history
                .get(dataset_id.as_str())
                .cloned()
                .unwrap_or_default();
            let skip = messages.len().saturating_sub(limit);
            Ok(messages.into_iter().skip(skip).collect())
        }

        async fn clear(&self, _dataset_id: &DatasetId) -> Result<(), ContextStoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn reports_context_presence_and_type() {
        let store = Arc::new(FixtureStore::with_context(AnalysisContext::new(
            "anova",
            "summary text",
        )));
        let id = DatasetId::new("file-1").unwrap();
        store
            .append_history(&id, Message::user("hello"))
            .await
            .unwrap();
        let handler = GetHistoryHandler::new(store);

        let view = handler.handle(GetHistoryQuery::new(id)).await.unwrap();

        assert_eq!(view.history.len(), 1);
        assert!(view.has_context);
        assert_eq!(view.context_type.as_deref(), Some("anova"));
    }

    #[tokio::test]
    async fn unknown_dataset_yields_an_empty_view() {
        let handler = GetHistoryHandler::new(Arc::new(FixtureStore::empty()));

        let view = handler
            .handle(GetHistoryQuery::new(DatasetId::new("nothing").unwrap()))
            .await
            .unwrap();

        assert!(view.history.is_empty());
        assert!(!view.has_context);
        assert!(view.context_type.is_none());
    }
}
