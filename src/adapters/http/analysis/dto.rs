//! HTTP DTOs for dataset analysis endpoints.
//!
//! Preview and workbook responses serialize their domain/adapter types
//! directly; this module holds the analyze response, which flattens the
//! sweep results and appends the cleaned matrix for later export.

use serde::Serialize;

use crate::application::handlers::RunAnovaResult;
use crate::domain::analysis::AnovaResults;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a completed ANOVA analysis.
///
/// The sweep results are flattened to the top level; `original_data`,
/// `classes` and `variable_names` ride alongside so the client can echo
/// the exact analyzed matrix back to the export endpoint. Missing matrix
/// cells serialize as JSON nulls.
#[derive(Debug, Clone, Serialize)]
pub struct AnovaAnalysisResponse {
    #[serde(flatten)]
    pub results: AnovaResults,
    /// The cleaned matrix, row per sample.
    pub original_data: Vec<Vec<f64>>,
    /// Coded group label per sample.
    pub classes: Vec<i64>,
    /// Variable column names in matrix order.
    pub variable_names: Vec<String>,
}

impl From<RunAnovaResult> for AnovaAnalysisResponse {
    fn from(outcome: RunAnovaResult) -> Self {
        let RunAnovaResult { dataset, results } = outcome;

        let original_data = dataset
            .matrix()
            .rows()
            .map(|row| row.to_vec())
            .collect();
        let classes = dataset.labels().as_slice().to_vec();
        let variable_names = dataset.variable_names().to_vec();

        Self {
            results,
            original_data,
            classes,
            variable_names,
        }
    }
}
