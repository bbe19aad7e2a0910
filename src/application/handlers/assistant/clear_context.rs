//! ClearContext command handler.

use crate::domain::foundation::DatasetId;
use crate::ports::{ContextStore, ContextStoreError};
use std::sync::Arc;
use thiserror::Error;

/// Command to clear a dataset's chat context and history.
#[derive(Debug, Clone)]
pub struct ClearContextCommand {
    /// The dataset to clear.
    pub file_id: DatasetId,
}

impl ClearContextCommand {
    /// Creates a new clear context command.
    pub fn new(file_id: DatasetId) -> Self {
        Self { file_id }
    }
}

/// Errors that can occur while clearing context.
#[derive(Debug, Clone, Error)]
pub enum ClearContextError {
    /// Context store delete failed.
    #[error("Context store error: {0}")]
    Store(String),
}

impl From<ContextStoreError> for ClearContextError {
    fn from(err: ContextStoreError) -> Self {
        ClearContextError::Store(err.to_string())
    }
}

/// Handler for clear context commands.
pub struct ClearContextHandler {
    store: Arc<dyn ContextStore>,
}

impl ClearContextHandler {
    /// Creates a new handler with the given store.
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    /// Clears the stored context and history. Unknown datasets are a no-op.
    ///
    /// # Errors
    /// Returns `ClearContextError` if the store delete fails.
    pub async fn handle(&self, cmd: ClearContextCommand) -> Result<(), ClearContextError> {
        self.store.clear(&cmd.file_id).await?;
        tracing::info!(file_id = %cmd.file_id, "Chat context cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AnalysisContext, Message};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockStore {
        contexts: Mutex<HashMap<String, AnalysisContext>>,
        history: Mutex<HashMap<String, Vec<Message>>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                contexts: Mutex::new(HashMap::new()),
                history: Mutex::new(HashMap::new()),
            }
        }

        fn is_empty(&self, dataset_id: &DatasetId) -> bool {
            !self.contexts.lock().unwrap().contains_key(dataset_id.as_str())
                && !self.history.lock().unwrap().contains_key(dataset_id.as_str())
        }
    }

    #[async_trait]
    impl ContextStore for MockStore {
        async fn store_context(
            &self,
            dataset_id: &DatasetId,
            context: AnalysisContext,
        ) -> Result<(), ContextStoreError> {
            self.contexts
                .lock()
                .unwrap()
                .insert(dataset_id.as_str().to_string(), context);
            Ok(())
        }

        async fn get_context(
            &self,
            dataset_id: &DatasetId,
        ) -> Result<Option<AnalysisContext>, ContextStoreError> {
            Ok(self.contexts.lock().unwrap().get(dataset_id.as_str()).cloned())
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
            _limit: usize,
        ) -> Result<Vec<Message>, ContextStoreError> {
            Ok(self
                .history
                .lock()
                .unwrap()
                .get(dataset_id.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn clear(&self, dataset_id: &DatasetId) -> Result<(), ContextStoreError> {
            self.contexts.lock().unwrap().remove(dataset_id.as_str());
            self.history.lock().unwrap().remove(dataset_id.as_str());
            Ok(())
        }
    }

    #[tokio::test]
    async fn clears_both_context_and_history() {
        let store = Arc::new(MockStore::new());
        let id = DatasetId::new("file-1").unwrap();
        store
            .store_context(&id, AnalysisContext::new("anova", "summary"))
            .await
            .unwrap();
        store
            .append_history(&id, Message::user("hello"))
            .await
            .unwrap();
        let handler = ClearContextHandler::new(Arc::clone(&store) as Arc<dyn ContextStore>);

        handler.handle(ClearContextCommand::new(id.clone())).await.unwrap();

        assert!(store.is_empty(&id));
    }

    #[tokio::test]
    async fn clearing_an_unknown_dataset_is_a_no_op() {
        let store = Arc::new(MockStore::new());
        let handler = ClearContextHandler::new(Arc::clone(&store) as Arc<dyn ContextStore>);

        handler
            .handle(ClearContextCommand::new(DatasetId::new("ghost").unwrap()))
            .await
            .unwrap();
    }
}
