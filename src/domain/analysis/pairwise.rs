//! Post-hoc pairwise group comparisons for a single variable.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Dataset;

use super::correction::CorrectionEngine;
use super::hypothesis;

/// One two-group comparison row.
///
/// Field spelling matches the client payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    #[serde(rename = "groupX")]
    pub group_x: i64,
    #[serde(rename = "groupY")]
    pub group_y: i64,
    #[serde(rename = "pValue")]
    pub p_value: f64,
    pub mean_diff: f64,
    #[serde(rename = "tStat")]
    pub t_stat: f64,
    #[serde(rename = "pValue_FDR")]
    pub p_value_fdr: f64,
}

/// Pairwise comparator running pooled t-tests over all group pairs.
///
/// Each variable forms its own Benjamini-Hochberg pool: q-values attached
/// here never mix with the global per-variable correction.
pub struct PairwiseComparator {
    correction: CorrectionEngine,
}

impl PairwiseComparator {
    pub fn new(correction: CorrectionEngine) -> Self {
        Self { correction }
    }

    /// Compares every unordered group pair on variable `col`.
    ///
    /// Pairs walk the distinct labels in ascending order, `(i, j)` with
    /// `i < j`. Missing values are dropped per group.
    ///
    /// # Edge Cases
    /// - Either side smaller than 2 valid values: the pair is omitted, not
    ///   emitted as a placeholder
    /// - Degenerate t-test (zero pooled variance): neutral sentinels
    ///   `t = 0, p = 1`, with the real mean difference
    /// - No surviving pairs: empty list, no correction run
    pub fn compare_variable(&self, dataset: &Dataset, col: usize) -> Vec<PairwiseComparison> {
        let labels = dataset.labels().distinct();
        let mut comparisons = Vec::new();

        for (i, &label_x) in labels.iter().enumerate() {
            for &label_y in &labels[i + 1..] {
                let group_x = dataset.group_values(col, label_x);
                let group_y = dataset.group_values(col, label_y);
                if group_x.len() < 2 || group_y.len() < 2 {
                    continue;
                }

                let mean_x = group_x.iter().sum::<f64>() / group_x.len() as f64;
                let mean_y = group_y.iter().sum::<f64>() / group_y.len() as f64;

                let (t_stat, p_value) = match hypothesis::pooled_t_test(&group_x, &group_y) {
                    Some(outcome) => (outcome.statistic, outcome.p_value),
                    None => (0.0, 1.0),
                };

                comparisons.push(PairwiseComparison {
                    group_x: label_x,
                    group_y: label_y,
                    p_value,
                    mean_diff: mean_x - mean_y,
                    t_stat,
                    p_value_fdr: 0.0,
                });
            }
        }

        if !comparisons.is_empty() {
            let p_values: Vec<f64> = comparisons.iter().map(|c| c.p_value).collect();
            let bh = self.correction.benjamini_hochberg(&p_values);
            for (comparison, q) in comparisons.iter_mut().zip(bh.q_values) {
                comparison.p_value_fdr = q;
            }
        }

        comparisons
    }
}
