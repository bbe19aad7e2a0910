//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM provider implementations (OpenAI)
//! - `context` - Assistant state storage (in-memory)
//! - `export` - Workbook rendering for downloads
//! - `http` - REST API exposure

pub mod ai;
pub mod context;
pub mod export;
pub mod http;

pub use ai::{OpenAIConfig, OpenAIProvider};
pub use context::InMemoryContextStore;
