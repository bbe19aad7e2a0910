//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the Chemostats domain.

mod ids;
mod timestamp;
mod matrix;
mod class_labels;
mod dataset;
mod errors;

pub use ids::DatasetId;
pub use timestamp::Timestamp;
pub use matrix::DataMatrix;
pub use class_labels::ClassLabels;
pub use dataset::Dataset;
pub use errors::{DomainError, ErrorCode, ValidationError};
