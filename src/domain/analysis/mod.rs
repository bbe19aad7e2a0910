//! Analysis Module - Pure domain services for statistical analysis.
//!
//! This module contains stateless services that operate on a validated
//! dataset to perform the per-variable ANOVA sweep and its supporting
//! calculations.
//!
//! # Components
//!
//! - `AnovaAnalyzer` - Per-variable F-tests, corrections, result assembly
//! - `CorrectionEngine` - Bonferroni and Benjamini-Hochberg corrections
//! - `PairwiseComparator` - Post-hoc pooled t-tests with a per-variable pool
//! - `DescriptiveStats` - Six-metric summaries, global and per group
//! - `BoxplotSummarizer` - Five-number summaries with whisker clipping
//!
//! # Design Philosophy
//!
//! All services are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies. Degenerate per-variable
//! conditions downgrade to neutral values instead of erroring, so a sweep
//! always completes for every column.

mod anova;
mod boxplot;
mod correction;
mod descriptive;
mod hypothesis;
mod pairwise;
mod results;

// Re-export all public types
pub use anova::{AnovaAnalyzer, PlotSelection, NOMINAL_ALPHA};
pub use boxplot::{
    BoxplotData, BoxplotSummarizer, GroupBoxplot, VariableBoxplot, YLimits,
    MAX_BOXPLOT_VARIABLES,
};
pub use correction::{BenjaminiHochbergCorrection, BonferroniCorrection, CorrectionEngine};
pub use descriptive::{DescriptiveStats, GlobalStats, GroupStats, StatSeries, SummaryMetrics};
pub use hypothesis::{eta_squared_percent, one_way_f_test, pooled_t_test, TestOutcome};
pub use pairwise::{PairwiseComparator, PairwiseComparison};
pub use results::{
    AnalysisSummary, AnovaResults, MulticomparisonRow, OverviewData, VariableResult,
};
