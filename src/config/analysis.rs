//! Analysis defaults configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Analysis defaults
///
/// Applied when an upload form omits the optional tuning fields.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Significance threshold for the multiple-testing procedures
    #[serde(default = "default_fdr_threshold")]
    pub default_fdr_threshold: f64,

    /// Boxplot selection code (0 = none, 1 = nominal, 2 = Bonferroni,
    /// 3 = Benjamini-Hochberg, 4 = all)
    #[serde(default = "default_plot_option")]
    pub default_plot_option: i64,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.default_fdr_threshold > 0.0 && self.default_fdr_threshold < 1.0) {
            return Err(ValidationError::InvalidSignificance);
        }
        if !(0..=4).contains(&self.default_plot_option) {
            return Err(ValidationError::InvalidPlotOption);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_fdr_threshold: default_fdr_threshold(),
            default_plot_option: default_plot_option(),
        }
    }
}

fn default_fdr_threshold() -> f64 {
    0.05
}

fn default_plot_option() -> i64 {
    3
}
