//! Descriptive statistics: global and per-group variable summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassLabels, Dataset};

/// The six summary metrics computed for one collection of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub mean: f64,
    pub std: f64,
    pub rsd: f64,
    pub range: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryMetrics {
    fn zeros() -> Self {
        Self {
            mean: 0.0,
            std: 0.0,
            rsd: 0.0,
            range: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }
}

/// Column-oriented metric arrays, one entry per variable.
///
/// Key spelling follows the exported sheet headers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatSeries {
    #[serde(rename = "RSD")]
    pub rsd: Vec<f64>,
    #[serde(rename = "STD")]
    pub std: Vec<f64>,
    #[serde(rename = "MEAN")]
    pub mean: Vec<f64>,
    #[serde(rename = "RANGE")]
    pub range: Vec<f64>,
    #[serde(rename = "MIN")]
    pub min: Vec<f64>,
    #[serde(rename = "MAX")]
    pub max: Vec<f64>,
}

impl StatSeries {
    fn push(&mut self, metrics: SummaryMetrics) {
        self.rsd.push(metrics.rsd);
        self.std.push(metrics.std);
        self.mean.push(metrics.mean);
        self.range.push(metrics.range);
        self.min.push(metrics.min);
        self.max.push(metrics.max);
    }
}

/// Whole-dataset summary across all samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub variables: Vec<String>,
    #[serde(flatten)]
    pub series: StatSeries,
}

/// Per-group summaries, keyed by synthesized group name.
pub type GroupStats = BTreeMap<String, StatSeries>;

/// Calculator for descriptive variable statistics.
pub struct DescriptiveStats;

impl DescriptiveStats {
    /// Summarizes one collection of valid values.
    ///
    /// # Edge Cases
    /// - Empty input: all six metrics are 0
    /// - Single value: STD and RSD are 0
    /// - Zero mean: RSD is 0 regardless of spread
    pub fn summarize(values: &[f64]) -> SummaryMetrics {
        if values.is_empty() {
            return SummaryMetrics::zeros();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if values.len() > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let rsd = if mean != 0.0 { std / mean * 100.0 } else { 0.0 };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        SummaryMetrics {
            mean,
            std,
            rsd,
            range: max - min,
            min,
            max,
        }
    }

    /// Summary over all samples, one entry per variable column.
    ///
    /// Missing values are excluded per column; a column with no valid values
    /// reports zeros rather than dropping out.
    pub fn global(dataset: &Dataset) -> GlobalStats {
        let mut series = StatSeries::default();
        for col in 0..dataset.matrix().n_variables() {
            let values: Vec<f64> = dataset.matrix().valid_column(col).collect();
            series.push(Self::summarize(&values));
        }
        GlobalStats {
            variables: dataset.variable_names().to_vec(),
            series,
        }
    }

    /// Summary per group, walking groups in ascending label order.
    pub fn per_group(dataset: &Dataset) -> GroupStats {
        let mut group_stats = GroupStats::new();
        for &label in dataset.labels().distinct() {
            let mut series = StatSeries::default();
            for col in 0..dataset.matrix().n_variables() {
                let values = dataset.group_values(col, label);
                series.push(Self::summarize(&values));
            }
            group_stats.insert(ClassLabels::group_name(label), series);
        }
        group_stats
    }
}
