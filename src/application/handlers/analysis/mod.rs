//! Analysis command and query handlers.

mod preview_dataset;
mod run_anova;

pub use preview_dataset::{PreviewDatasetHandler, PreviewDatasetQuery};
pub use run_anova::{RunAnovaCommand, RunAnovaHandler, RunAnovaResult};
