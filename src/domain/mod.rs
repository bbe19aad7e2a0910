//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (dataset, matrix, IDs, errors)
//! - `ingestion` - Uploaded-table parsing and class-column resolution
//! - `analysis` - Pure statistical services (ANOVA, corrections, summaries)

pub mod analysis;
pub mod foundation;
pub mod ingestion;
