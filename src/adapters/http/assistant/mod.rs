//! HTTP adapter for AI assistant endpoints.
//!
//! Exposes the analysis assistant via REST API:
//! - `POST /api/chat` - Send a message to the analysis assistant
//! - `POST /api/chat/context` - Pin analysis results for assistant grounding
//! - `GET /api/chat/history/:file_id` - Fetch chat history and context status
//! - `DELETE /api/chat/context/:file_id` - Clear pinned context and history

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::AssistantAppState;
pub use routes::assistant_routes;
