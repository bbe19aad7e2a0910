//! PreviewDatasetHandler - Query handler for inspecting uploaded files.
//!
//! Runs layout detection over a raw upload so the UI can offer column
//! choices before a full analysis is requested.

use tracing::info;

use crate::domain::foundation::DomainError;
use crate::domain::ingestion::{DatasetParser, DatasetPreview};

/// Query to preview an uploaded file.
#[derive(Debug, Clone)]
pub struct PreviewDatasetQuery {
    /// Raw bytes of the uploaded CSV file.
    pub file_bytes: Vec<u8>,
    /// Client-side file name, used for logging only.
    pub file_name: Option<String>,
}

impl PreviewDatasetQuery {
    /// Creates a new preview query.
    pub fn new(file_bytes: Vec<u8>, file_name: Option<String>) -> Self {
        Self {
            file_bytes,
            file_name,
        }
    }
}

/// Handler for previewing uploads.
#[derive(Debug, Clone, Default)]
pub struct PreviewDatasetHandler {
    parser: DatasetParser,
}

impl PreviewDatasetHandler {
    pub fn new() -> Self {
        Self {
            parser: DatasetParser::new(),
        }
    }

    pub fn handle(&self, query: PreviewDatasetQuery) -> Result<DatasetPreview, DomainError> {
        let file_name = query.file_name.as_deref().unwrap_or("<unnamed>");
        info!(
            file = %file_name,
            bytes = query.file_bytes.len(),
            "Previewing uploaded file"
        );

        let preview = self.parser.preview(&query.file_bytes)?;

        info!(
            file = %file_name,
            trigger_found = preview.trigger_found,
            variables = preview.num_variables,
            samples = preview.num_samples,
            "Preview built"
        );
        Ok(preview)
    }
}
