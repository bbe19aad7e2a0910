//! RunAnovaHandler - Command handler for the one-way ANOVA sweep.
//!
//! Parses an uploaded file against the caller's class column choice and
//! runs the full per-variable sweep over the validated dataset.

use tracing::info;

use crate::domain::analysis::{AnovaAnalyzer, AnovaResults, PlotSelection};
use crate::domain::foundation::{Dataset, DomainError};
use crate::domain::ingestion::DatasetParser;

/// Command to run a one-way ANOVA over an uploaded file.
#[derive(Debug, Clone)]
pub struct RunAnovaCommand {
    /// Raw bytes of the uploaded CSV file.
    pub file_bytes: Vec<u8>,
    /// Client-side file name, used for logging only.
    pub file_name: Option<String>,
    /// Column holding the group labels.
    pub class_column: String,
    /// Benjamini-Hochberg threshold for the significance flags.
    pub fdr_threshold: f64,
    /// Wire code for the correction family the client plans to plot.
    pub plot_option: i64,
}

/// Result of a completed sweep.
///
/// Carries the parsed dataset alongside the results so callers can echo
/// the cleaned matrix back for later export.
#[derive(Debug, Clone)]
pub struct RunAnovaResult {
    pub dataset: Dataset,
    pub results: AnovaResults,
}

/// Handler for running ANOVA analyses.
#[derive(Debug, Clone, Default)]
pub struct RunAnovaHandler {
    parser: DatasetParser,
}

impl RunAnovaHandler {
    pub fn new() -> Self {
        Self {
            parser: DatasetParser::new(),
        }
    }

    pub fn handle(&self, cmd: RunAnovaCommand) -> Result<RunAnovaResult, DomainError> {
        let file_name = cmd.file_name.as_deref().unwrap_or("<unnamed>");
        info!(
            file = %file_name,
            class_column = %cmd.class_column,
            fdr_threshold = cmd.fdr_threshold,
            "ANOVA analysis started"
        );

        let dataset = self.parser.parse(&cmd.file_bytes, &cmd.class_column)?;
        info!(
            samples = dataset.matrix().n_samples(),
            variables = dataset.matrix().n_variables(),
            groups = dataset.labels().n_groups(),
            "Data parsed"
        );

        let analyzer = AnovaAnalyzer::new(cmd.fdr_threshold);
        let results = analyzer.analyze(&dataset, PlotSelection::from_code(cmd.plot_option));

        info!(
            significant = results.summary.benjamini_significant,
            total = results.summary.total_variables,
            "ANOVA complete"
        );
        Ok(RunAnovaResult { dataset, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    const TRIGGERED_CSV: &[u8] = b"Sample,Group,DATA,Lactate,Glucose\n\
        s1,A,,1.0,2.0\n\
        s2,A,,1.1,2.1\n\
        s3,B,,3.0,4.0\n\
        s4,B,,3.1,4.1\n";

    fn command(class_column: &str) -> RunAnovaCommand {
        RunAnovaCommand {
            file_bytes: TRIGGERED_CSV.to_vec(),
            file_name: Some("wine.csv".into()),
            class_column: class_column.into(),
            fdr_threshold: 0.05,
            plot_option: 3,
        }
    }

    #[test]
    fn runs_the_full_sweep() {
        let handler = RunAnovaHandler::new();
        let outcome = handler.handle(command("Group")).unwrap();

        assert_eq!(outcome.results.summary.total_variables, 2);
        assert_eq!(outcome.results.summary.num_groups, 2);
        assert_eq!(outcome.dataset.variable_names(), ["Lactate", "Glucose"]);
        assert_eq!(outcome.dataset.labels().as_slice(), &[1, 1, 2, 2]);
    }

    #[test]
    fn unknown_class_column_is_a_validation_error() {
        let handler = RunAnovaHandler::new();
        let err = handler.handle(command("Treatment")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn single_group_data_is_structural() {
        let csv = b"Sample,Group,DATA,Lactate,Glucose\n\
            s1,A,,1.0,2.0\n\
            s2,A,,1.1,2.1\n\
            s3,A,,3.0,4.0\n";
        let cmd = RunAnovaCommand {
            file_bytes: csv.to_vec(),
            file_name: None,
            class_column: "Group".into(),
            fdr_threshold: 0.05,
            plot_option: 3,
        };

        let err = RunAnovaHandler::new().handle(cmd).unwrap_err();
        assert_eq!(err.code, ErrorCode::TooFewGroups);
    }
}
