//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.

mod openai_provider;

pub use openai_provider::{OpenAIConfig, OpenAIProvider};
