//! One-way ANOVA sweep with multiple-testing corrections.

use crate::domain::foundation::Dataset;

use super::boxplot::{BoxplotSummarizer, MAX_BOXPLOT_VARIABLES};
use super::correction::CorrectionEngine;
use super::descriptive::DescriptiveStats;
use super::hypothesis;
use super::pairwise::{PairwiseComparator, PairwiseComparison};
use super::results::{
    AnalysisSummary, AnovaResults, MulticomparisonRow, OverviewData, VariableResult,
};

/// Fixed nominal significance line, independent of the configured threshold.
pub const NOMINAL_ALPHA: f64 = 0.05;

/// Which variables receive boxplot payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotSelection {
    /// No boxplots at all.
    NoPlots,
    /// Variables with nominal p <= 0.05.
    Nominal,
    /// Bonferroni-significant variables.
    Bonferroni,
    /// Benjamini-Hochberg-significant variables.
    BenjaminiHochberg,
    /// Every variable.
    All,
}

impl PlotSelection {
    /// Maps the client option code; unknown codes select everything.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => PlotSelection::NoPlots,
            1 => PlotSelection::Nominal,
            2 => PlotSelection::Bonferroni,
            3 => PlotSelection::BenjaminiHochberg,
            _ => PlotSelection::All,
        }
    }
}

struct SweepOutcome {
    p_value: f64,
    f_stat: f64,
    effect_size: f64,
    pairwise: Vec<PairwiseComparison>,
}

/// Per-variable one-way ANOVA over a dataset, with Bonferroni and
/// Benjamini-Hochberg corrections, post-hoc pairwise tests, descriptive
/// statistics, and boxplot summaries.
///
/// Constructed fresh per analysis call; holds no dataset state.
pub struct AnovaAnalyzer {
    correction: CorrectionEngine,
}

impl AnovaAnalyzer {
    /// Creates an analyzer for one significance threshold.
    pub fn new(fdr_threshold: f64) -> Self {
        Self {
            correction: CorrectionEngine::new(fdr_threshold),
        }
    }

    pub fn fdr_threshold(&self) -> f64 {
        self.correction.alpha()
    }

    /// Runs the full sweep and assembles the result bundle.
    ///
    /// Variables are processed in column order and results keep that order.
    /// Degenerate variables produce neutral entries rather than aborting;
    /// structural problems are rejected at [`Dataset`] construction, before
    /// the analyzer ever sees the data.
    pub fn analyze(&self, dataset: &Dataset, plot_selection: PlotSelection) -> AnovaResults {
        let n_vars = dataset.matrix().n_variables();
        let comparator = PairwiseComparator::new(self.correction);

        let mut sweep = Vec::with_capacity(n_vars);
        for col in 0..n_vars {
            sweep.push(self.sweep_variable(dataset, &comparator, col));
        }

        let p_values: Vec<f64> = sweep.iter().map(|s| s.p_value).collect();
        let bonferroni = self.correction.bonferroni(&p_values);
        let benjamini = self.correction.benjamini_hochberg(&p_values);

        let results: Vec<VariableResult> = sweep
            .iter()
            .enumerate()
            .map(|(col, outcome)| VariableResult {
                variable: dataset.variable_name(col).to_string(),
                p_value: outcome.p_value,
                fdr: benjamini.q_values[col],
                bonferroni: bonferroni.adjusted[col],
                benjamini: benjamini.significant[col],
                effect_size: outcome.effect_size,
                f_stat: outcome.f_stat,
            })
            .collect();

        let selected = Self::select_variables(
            plot_selection,
            &p_values,
            &bonferroni.significant,
            &benjamini.significant,
        );
        let boxplot_cols: Vec<usize> = selected
            .iter()
            .copied()
            .take(MAX_BOXPLOT_VARIABLES)
            .collect();
        let boxplot_data = BoxplotSummarizer::for_variables(dataset, &boxplot_cols);

        let global_stats = DescriptiveStats::global(dataset);
        let group_stats = DescriptiveStats::per_group(dataset);

        let overview_data = self.overview(
            &p_values,
            &bonferroni.significant,
            bonferroni.threshold,
            &benjamini.significant,
        );

        let multicomparison: Vec<MulticomparisonRow> = sweep
            .into_iter()
            .enumerate()
            .flat_map(|(col, outcome)| {
                let variable = dataset.variable_name(col).to_string();
                outcome.pairwise.into_iter().map(move |comparison| {
                    MulticomparisonRow {
                        variable_index: col + 1,
                        variable: variable.clone(),
                        comparison,
                    }
                })
            })
            .collect();

        let summary = AnalysisSummary {
            total_variables: n_vars,
            benjamini_significant: benjamini.significant.iter().filter(|&&s| s).count(),
            bonferroni_significant: bonferroni.significant.iter().filter(|&&s| s).count(),
            nominal_significant: p_values.iter().filter(|&&p| p <= NOMINAL_ALPHA).count(),
            num_groups: dataset.labels().n_groups(),
        };

        AnovaResults {
            results,
            multicomparison,
            global_stats,
            group_stats,
            boxplot_data,
            overview_data,
            summary,
        }
    }

    /// Tests one variable column.
    ///
    /// # Edge Cases
    /// - Fewer than 2 distinct labels among valid values: neutral outcome
    ///   with an empty pairwise list; the sweep continues
    /// - Degenerate F-test: neutral sentinels `F = 0, p = 1`, effect size
    ///   still computed from the sums of squares (0 for constant data)
    fn sweep_variable(
        &self,
        dataset: &Dataset,
        comparator: &PairwiseComparator,
        col: usize,
    ) -> SweepOutcome {
        let mut valid_labels: Vec<i64> = dataset
            .valid_column_with_labels(col)
            .map(|(label, _)| label)
            .collect();
        valid_labels.sort_unstable();
        valid_labels.dedup();

        if valid_labels.len() < 2 {
            return SweepOutcome {
                p_value: 1.0,
                f_stat: 0.0,
                effect_size: 0.0,
                pairwise: Vec::new(),
            };
        }

        let groups: Vec<Vec<f64>> = valid_labels
            .iter()
            .map(|&label| dataset.group_values(col, label))
            .collect();

        let (f_stat, p_value) = match hypothesis::one_way_f_test(&groups) {
            Some(outcome) => (outcome.statistic, outcome.p_value),
            None => (0.0, 1.0),
        };
        let effect_size = hypothesis::eta_squared_percent(&groups);
        let pairwise = comparator.compare_variable(dataset, col);

        SweepOutcome {
            p_value,
            f_stat,
            effect_size,
            pairwise,
        }
    }

    /// Picks variable columns for boxplots, preserving column order.
    fn select_variables(
        plot_selection: PlotSelection,
        p_values: &[f64],
        bonferroni_significant: &[bool],
        benjamini_significant: &[bool],
    ) -> Vec<usize> {
        let keep = |col: usize| match plot_selection {
            PlotSelection::NoPlots => false,
            PlotSelection::Nominal => p_values[col] <= NOMINAL_ALPHA,
            PlotSelection::Bonferroni => bonferroni_significant[col],
            PlotSelection::BenjaminiHochberg => benjamini_significant[col],
            PlotSelection::All => true,
        };
        (0..p_values.len()).filter(|&col| keep(col)).collect()
    }

    /// Overview chart payload: ascending p-value curve with significance
    /// positions marked in sorted coordinates.
    ///
    /// The Benjamini threshold line sits at the largest BH-significant
    /// p-value, falling back to the configured alpha when nothing passes.
    fn overview(
        &self,
        p_values: &[f64],
        bonferroni_significant: &[bool],
        bonferroni_threshold: f64,
        benjamini_significant: &[bool],
    ) -> OverviewData {
        let mut order: Vec<usize> = (0..p_values.len()).collect();
        order.sort_by(|&a, &b| {
            p_values[a]
                .partial_cmp(&p_values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let p_values_sorted: Vec<f64> = order.iter().map(|&i| p_values[i]).collect();
        let benjamini_indices: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|(_, &i)| benjamini_significant[i])
            .map(|(pos, _)| pos)
            .collect();
        let bonferroni_indices: Vec<usize> = order
            .iter()
            .enumerate()
            .filter(|(_, &i)| bonferroni_significant[i])
            .map(|(pos, _)| pos)
            .collect();

        let benjamini_threshold = p_values
            .iter()
            .zip(benjamini_significant)
            .filter(|(_, &sig)| sig)
            .map(|(&p, _)| p)
            .fold(f64::NEG_INFINITY, f64::max);
        let benjamini_threshold = if benjamini_threshold.is_finite() {
            benjamini_threshold
        } else {
            self.correction.alpha()
        };

        OverviewData {
            p_values_sorted,
            benjamini_indices,
            bonferroni_indices,
            bonferroni_threshold,
            benjamini_threshold,
            nominal_threshold: NOMINAL_ALPHA,
        }
    }
}
