//! Result records assembled by the ANOVA sweep.

use serde::{Deserialize, Serialize};

use super::boxplot::BoxplotData;
use super::descriptive::{GlobalStats, GroupStats};
use super::pairwise::PairwiseComparison;

/// Global test outcome for one variable column.
///
/// `bonferroni` is the adjusted p-value `p * n`, deliberately unclamped, so
/// values above 1 survive into exports. `fdr` is the Benjamini-Hochberg
/// q-value from the global pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableResult {
    pub variable: String,
    #[serde(rename = "pValue")]
    pub p_value: f64,
    pub fdr: f64,
    pub bonferroni: f64,
    pub benjamini: bool,
    #[serde(rename = "effectSize")]
    pub effect_size: f64,
    #[serde(rename = "fStat")]
    pub f_stat: f64,
}

impl VariableResult {
    /// Neutral result for a degenerate variable.
    ///
    /// Correction fields are filled in later by the global pool, which sees
    /// the sentinel p-value like any other.
    pub fn neutral(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            p_value: 1.0,
            fdr: 1.0,
            bonferroni: 1.0,
            benjamini: false,
            effect_size: 0.0,
            f_stat: 0.0,
        }
    }
}

/// One row of the flattened pairwise table, tagged with its variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticomparisonRow {
    /// 1-based variable position, matching the exported sheets.
    #[serde(rename = "variableIndex")]
    pub variable_index: usize,
    pub variable: String,
    #[serde(flatten)]
    pub comparison: PairwiseComparison,
}

/// Sorted p-value curve and thresholds for the overview chart.
///
/// Indices refer to positions in `p_values_sorted`, not original columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewData {
    pub p_values_sorted: Vec<f64>,
    pub benjamini_indices: Vec<usize>,
    pub bonferroni_indices: Vec<usize>,
    pub bonferroni_threshold: f64,
    pub benjamini_threshold: f64,
    pub nominal_threshold: f64,
}

/// Headline counts for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_variables: usize,
    pub benjamini_significant: usize,
    pub bonferroni_significant: usize,
    pub nominal_significant: usize,
    pub num_groups: usize,
}

/// The complete analysis bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaResults {
    pub results: Vec<VariableResult>,
    pub multicomparison: Vec<MulticomparisonRow>,
    pub global_stats: GlobalStats,
    pub group_stats: GroupStats,
    pub boxplot_data: BoxplotData,
    pub overview_data: OverviewData,
    pub summary: AnalysisSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_result_carries_sentinels() {
        let result = VariableResult::neutral("Lactate");
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.f_stat, 0.0);
        assert_eq!(result.effect_size, 0.0);
        assert!(!result.benjamini);
    }

    #[test]
    fn variable_result_serializes_with_camel_case_names() {
        let result = VariableResult::neutral("Lactate");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("pValue").is_some());
        assert!(json.get("effectSize").is_some());
        assert!(json.get("fStat").is_some());
        assert!(json.get("fdr").is_some());
        assert!(json.get("bonferroni").is_some());
    }

    #[test]
    fn multicomparison_row_flattens_the_comparison() {
        let row = MulticomparisonRow {
            variable_index: 3,
            variable: "Lactate".into(),
            comparison: PairwiseComparison {
                group_x: 1,
                group_y: 2,
                p_value: 0.02,
                mean_diff: -1.5,
                t_stat: -2.4,
                p_value_fdr: 0.04,
            },
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["variableIndex"], 3);
        assert_eq!(json["groupX"], 1);
        assert_eq!(json["pValue_FDR"], 0.04);
    }
}
