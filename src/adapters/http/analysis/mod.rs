//! HTTP adapter for dataset analysis endpoints.
//!
//! Exposes upload, analysis and export operations via REST API:
//! - `POST /api/preview` - Detect layout and propose class columns
//! - `POST /api/analyze/anova` - Run the one-way ANOVA sweep
//! - `POST /api/export/anova` - Re-render echoed results as a workbook

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::AnalysisAppState;
pub use routes::analysis_routes;
