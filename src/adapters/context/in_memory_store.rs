//! In-memory context store implementation.
//!
//! This adapter provides an in-memory implementation of the `ContextStore`
//! port. Useful for:
//! - Development and testing environments
//! - Single-server deployments without persistence requirements
//!
//! For deployments that must survive restarts, use an external cache backend
//! instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DatasetId, Timestamp};
use crate::ports::{
    AnalysisContext, ContextStore, ContextStoreError, Message, CONTEXT_TTL_SECS, HISTORY_CAP,
};

#[derive(Debug, Clone)]
struct HistoryEntry {
    messages: Vec<Message>,
    /// Last write; an idle thread past the TTL reads as empty.
    touched_at: Timestamp,
}

/// In-memory implementation of the ContextStore port.
///
/// Thread-safe via internal `Mutex`. Contexts expire on read once older
/// than the TTL; chat histories expire after the same idle window and are
/// capped at [`HISTORY_CAP`] messages per dataset.
#[derive(Default)]
pub struct InMemoryContextStore {
    contexts: Mutex<HashMap<String, AnalysisContext>>,
    histories: Mutex<HashMap<String, HistoryEntry>>,
}

impl InMemoryContextStore {
    /// Creates a new empty context store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites a history's last-write time.
    ///
    /// Useful for exercising idle expiry without waiting out the TTL.
    #[cfg(test)]
    fn backdate_history(&self, dataset_id: &DatasetId, touched_at: Timestamp) {
        let mut histories = self.histories.lock().unwrap();
        if let Some(entry) = histories.get_mut(dataset_id.as_str()) {
            entry.touched_at = touched_at;
        }
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
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
        let mut contexts = self.contexts.lock().unwrap();
        let now = Timestamp::now();

        let expired = contexts
            .get(dataset_id.as_str())
            .map(|context| context.is_expired(&now))
            .unwrap_or(false);
        if expired {
            contexts.remove(dataset_id.as_str());
            return Ok(None);
        }

        Ok(contexts.get(dataset_id.as_str()).cloned())
    }

    async fn append_history(
        &self,
        dataset_id: &DatasetId,
        message: Message,
    ) -> Result<(), ContextStoreError> {
        let mut histories = self.histories.lock().unwrap();
        let now = Timestamp::now();

        let entry = histories
            .entry(dataset_id.as_str().to_string())
            .or_insert_with(|| HistoryEntry {
                messages: Vec::new(),
                touched_at: now,
            });

        // An idle-expired thread restarts instead of resuming.
        if entry.touched_at.plus_secs(CONTEXT_TTL_SECS).is_before(&now) {
            entry.messages.clear();
        }

        entry.messages.push(message);
        entry.touched_at = now;

        if entry.messages.len() > HISTORY_CAP {
            let excess = entry.messages.len() - HISTORY_CAP;
            entry.messages.drain(..excess);
        }

        Ok(())
    }

    async fn history(
        &self,
        dataset_id: &DatasetId,
        limit: usize,
    ) -> Result<Vec<Message>, ContextStoreError> {
        let histories = self.histories.lock().unwrap();
        let now = Timestamp::now();

        match histories.get(dataset_id.as_str()) {
            Some(entry) if !entry.touched_at.plus_secs(CONTEXT_TTL_SECS).is_before(&now) => {
                let skip = entry.messages.len().saturating_sub(limit);
                Ok(entry.messages[skip..].to_vec())
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn clear(&self, dataset_id: &DatasetId) -> Result<(), ContextStoreError> {
        self.contexts.lock().unwrap().remove(dataset_id.as_str());
        self.histories.lock().unwrap().remove(dataset_id.as_str());
        Ok(())
    }
}
