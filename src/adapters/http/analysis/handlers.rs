//! HTTP handlers for dataset analysis endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. Preview and analyze accept multipart uploads; export re-renders
//! a client-echoed JSON payload.

use axum::extract::{Json, Multipart, State};
use axum::response::IntoResponse;

use crate::adapters::export::{anova_workbook, missing_fields, ExportBundle, ExportError};
use crate::application::handlers::{
    PreviewDatasetHandler, PreviewDatasetQuery, RunAnovaCommand, RunAnovaHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::super::error::ApiError;
use super::dto::AnovaAnalysisResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for analysis endpoints.
///
/// The analysis handlers themselves are stateless; the state carries the
/// configured form defaults applied when optional fields are omitted.
#[derive(Debug, Clone)]
pub struct AnalysisAppState {
    /// Applied when the `fdr_threshold` form field is omitted.
    pub default_fdr_threshold: f64,
    /// Applied when the `plot_option` form field is omitted.
    pub default_plot_option: i64,
}

impl AnalysisAppState {
    pub fn new(default_fdr_threshold: f64, default_plot_option: i64) -> Self {
        Self {
            default_fdr_threshold,
            default_plot_option,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn preview_handler(&self) -> PreviewDatasetHandler {
        PreviewDatasetHandler::new()
    }

    pub fn run_anova_handler(&self) -> RunAnovaHandler {
        RunAnovaHandler::new()
    }
}

impl Default for AnalysisAppState {
    fn default() -> Self {
        Self::new(0.05, 3)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Multipart Form Extraction
// ════════════════════════════════════════════════════════════════════════════════

/// A file pulled out of a multipart form.
struct FileUpload {
    bytes: Vec<u8>,
    file_name: Option<String>,
}

/// Collected fields of an analysis form; unknown fields are skipped.
#[derive(Default)]
struct UploadForm {
    file: Option<FileUpload>,
    class_column: Option<String>,
    fdr_threshold: Option<String>,
    plot_option: Option<String>,
}

async fn collect_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(|f| f.to_string());
                let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
                form.file = Some(FileUpload { bytes, file_name });
            }
            Some("class_column") => {
                form.class_column = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("fdr_threshold") => {
                form.fdr_threshold = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("plot_option") => {
                form.plot_option = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    ValidationError::invalid_format("form", err.to_string()).into()
}

fn parse_form_field<T: std::str::FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.trim().parse().map_err(|_| {
        ValidationError::invalid_format(field, format!("'{}' is not a valid number", raw)).into()
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/preview - Detect layout and propose class columns
pub async fn preview_dataset(
    State(state): State<AnalysisAppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_upload_form(multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| ApiError::from(ValidationError::empty_field("file")))?;

    let handler = state.preview_handler();
    let query = PreviewDatasetQuery::new(upload.bytes, upload.file_name);

    let preview = handler.handle(query)?;
    Ok(Json(preview))
}

/// POST /api/analyze/anova - Run the one-way ANOVA sweep
pub async fn analyze_anova(
    State(state): State<AnalysisAppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = collect_upload_form(multipart).await?;
    let upload = form
        .file
        .ok_or_else(|| ApiError::from(ValidationError::empty_field("file")))?;
    let class_column = form
        .class_column
        .ok_or_else(|| ApiError::from(ValidationError::empty_field("class_column")))?;

    let fdr_threshold = match form.fdr_threshold.as_deref() {
        Some(raw) => parse_form_field(raw, "fdr_threshold")?,
        None => state.default_fdr_threshold,
    };
    let plot_option = match form.plot_option.as_deref() {
        Some(raw) => parse_form_field(raw, "plot_option")?,
        None => state.default_plot_option,
    };

    let handler = state.run_anova_handler();
    let cmd = RunAnovaCommand {
        file_bytes: upload.bytes,
        file_name: upload.file_name,
        class_column,
        fdr_threshold,
        plot_option,
    };

    let outcome = handler.handle(cmd)?;
    Ok(Json(AnovaAnalysisResponse::from(outcome)))
}

/// POST /api/export/anova - Re-render echoed results as a workbook
pub async fn export_anova(
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError> {
    let missing = missing_fields(&payload);
    if !missing.is_empty() {
        return Err(ApiError(DomainError::new(
            ErrorCode::ValidationFailed,
            format!("Missing required fields: {:?}", missing),
        )));
    }

    let bundle: ExportBundle = serde_json::from_value(payload)
        .map_err(|e| ValidationError::invalid_format("payload", e.to_string()))?;

    let workbook = anova_workbook(&bundle)?;
    Ok(Json(workbook))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self(DomainError::new(ErrorCode::ExportFailed, err.to_string()))
    }
}
