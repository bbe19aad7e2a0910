//! Boxplot-ready summaries for selected variables, one box per group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassLabels, Dataset};

/// Chart budget: at most this many variables get boxplot summaries.
pub const MAX_BOXPLOT_VARIABLES: usize = 4;

/// Five-number summary plus raw values for one group's box.
///
/// `min` and `max` are the displayed whisker ends (1.5 x IQR rule clipped to
/// the observed range), not necessarily the data extremes; outliers stay
/// available in `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBoxplot {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub values: Vec<f64>,
    pub n: usize,
}

/// Shared y-axis range for one variable's chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YLimits {
    pub min: f64,
    pub max: f64,
}

/// All group boxes for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableBoxplot {
    pub variable_name: String,
    pub groups: BTreeMap<String, GroupBoxplot>,
    pub y_limits: YLimits,
}

/// Boxplot payloads keyed by `variable_{col}` with 0-based column index.
pub type BoxplotData = BTreeMap<String, VariableBoxplot>;

/// Calculator for per-group boxplot statistics.
pub struct BoxplotSummarizer;

impl BoxplotSummarizer {
    /// Builds boxplot payloads for the selected variable columns.
    ///
    /// Groups walk in ascending label order; a group with no valid values for
    /// the variable is omitted from that variable's `groups`. The selection
    /// is used as given; callers cap it at [`MAX_BOXPLOT_VARIABLES`].
    pub fn for_variables(dataset: &Dataset, selected: &[usize]) -> BoxplotData {
        let mut boxplots = BoxplotData::new();

        for &col in selected {
            let mut groups = BTreeMap::new();
            for &label in dataset.labels().distinct() {
                let values = dataset.group_values(col, label);
                if values.is_empty() {
                    continue;
                }
                groups.insert(ClassLabels::group_name(label), Self::for_group(values));
            }

            let y_limits = Self::y_limits(groups.values().flat_map(|g| g.values.iter().copied()));

            boxplots.insert(
                format!("variable_{}", col),
                VariableBoxplot {
                    variable_name: dataset.variable_name(col).to_string(),
                    groups,
                    y_limits,
                },
            );
        }

        boxplots
    }

    /// Summarizes one group's valid values into a box.
    ///
    /// # Edge Cases
    /// - Single value: all five summary fields equal that value
    fn for_group(values: Vec<f64>) -> GroupBoxplot {
        if values.len() == 1 {
            let v = values[0];
            return GroupBoxplot {
                min: v,
                q1: v,
                median: v,
                q3: v,
                max: v,
                values,
                n: 1,
            };
        }

        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let data_min = sorted[0];
        let data_max = sorted[sorted.len() - 1];
        let lower = data_min.max(q1 - 1.5 * iqr);
        let upper = data_max.min(q3 + 1.5 * iqr);

        let n = values.len();
        GroupBoxplot {
            min: lower,
            q1,
            median,
            q3,
            max: upper,
            values,
            n,
        }
    }

    /// Linear-interpolation percentile over an ascending-sorted slice.
    ///
    /// Rank `h = (n - 1) * q / 100` interpolates between the two bracketing
    /// order statistics.
    pub fn percentile(sorted: &[f64], q: f64) -> f64 {
        let n = sorted.len();
        if n == 1 {
            return sorted[0];
        }
        let h = (n - 1) as f64 * q / 100.0;
        let lo = h.floor() as usize;
        let hi = h.ceil() as usize;
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }

    /// Y-axis range widened by 25% away from zero on each side.
    ///
    /// # Edge Cases
    /// - No values at all: defaults to [0, 1]
    fn y_limits(values: impl Iterator<Item = f64>) -> YLimits {
        let mut data_min = f64::INFINITY;
        let mut data_max = f64::NEG_INFINITY;
        let mut seen = false;
        for v in values {
            data_min = data_min.min(v);
            data_max = data_max.max(v);
            seen = true;
        }
        if !seen {
            return YLimits { min: 0.0, max: 1.0 };
        }

        let min = if data_min > 0.0 { data_min * 0.75 } else { data_min * 1.25 };
        let max = if data_max > 0.0 { data_max * 1.25 } else { data_max * 0.75 };
        YLimits { min, max }
    }
}
