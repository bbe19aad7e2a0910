//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Analysis handlers
    PreviewDatasetHandler, PreviewDatasetQuery,
    RunAnovaCommand, RunAnovaHandler, RunAnovaResult,
    // Assistant handlers
    ChatCommand, ChatHandler,
    ClearContextCommand, ClearContextHandler,
    GetHistoryHandler, GetHistoryQuery, HistoryView,
    StoreContextCommand, StoreContextHandler,
};
