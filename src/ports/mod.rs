//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - LLM chat completions for the analysis assistant
//!
//! ## Assistant State Ports
//!
//! - `ContextStore` - Per-dataset analysis context and chat history

mod ai_provider;
mod context_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo,
};
pub use context_store::{
    AnalysisContext, ContextStore, ContextStoreError, CONTEXT_TTL_SECS, DEFAULT_HISTORY_LIMIT,
    HISTORY_CAP,
};
