//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analysis;
pub mod assistant;

pub use analysis::{
    // Queries and commands
    PreviewDatasetQuery,
    RunAnovaCommand,
    // Handlers
    PreviewDatasetHandler,
    RunAnovaHandler,
    RunAnovaResult,
};

pub use assistant::{
    // Chat
    ChatCommand,
    ChatError,
    ChatHandler,
    // Context lifecycle
    ClearContextCommand,
    ClearContextError,
    ClearContextHandler,
    GetHistoryError,
    GetHistoryHandler,
    GetHistoryQuery,
    HistoryView,
    StoreContextCommand,
    StoreContextError,
    StoreContextHandler,
};
