//! HTTP adapters - REST API implementations.
//!
//! Each API area has its own HTTP adapter for endpoint exposure; the shared
//! error envelope and the health probe live at this level.

pub mod analysis;
pub mod assistant;
pub mod error;
pub mod health;

// Re-export key types for convenience
pub use analysis::{analysis_routes, AnalysisAppState};
pub use assistant::{assistant_routes, AssistantAppState};
pub use error::{ApiError, ErrorResponse};
pub use health::health_routes;

use axum::Router;

/// Assembles the complete API router from the area routers.
///
/// Middleware (tracing, CORS, timeouts) is layered on by the binary so tests
/// can drive the bare router directly.
pub fn app(analysis: AnalysisAppState, assistant: AssistantAppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(analysis_routes().with_state(analysis))
        .merge(assistant_routes().with_state(assistant))
}
