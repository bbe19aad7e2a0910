//! AI assistant command and query handlers.
//!
//! Handles the chat loop plus the screen-context lifecycle: storing analysis
//! results as context, listing history, and clearing a dataset's session.

mod chat;
mod clear_context;
mod get_history;
mod prompts;
mod store_context;
mod summarize;

pub use chat::{ChatCommand, ChatError, ChatHandler};

pub use store_context::{StoreContextCommand, StoreContextError, StoreContextHandler};

pub use get_history::{GetHistoryError, GetHistoryHandler, GetHistoryQuery, HistoryView};

pub use clear_context::{ClearContextCommand, ClearContextError, ClearContextHandler};
