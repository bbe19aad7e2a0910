//! Export Adapters.
//!
//! Workbook rendering for downloadable analysis results.

mod workbook;

pub use workbook::{
    anova_workbook, missing_fields, ComparisonRow, ExportBundle, ExportError, ResultRow, Sheet,
    Workbook,
};
