//! CSV workbook rendering for ANOVA exports.
//!
//! The export endpoint receives the analysis payload echoed back by the
//! client and re-renders it as a five-sheet workbook, one CSV document per
//! sheet. Numeric holes (missing values, out-of-range indexes) become empty
//! cells instead of aborting the render.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::analysis::{GlobalStats, StatSeries};

/// Errors that can occur while rendering a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A sheet failed to serialize as CSV.
    #[error("failed to render sheet '{sheet}': {message}")]
    Render { sheet: String, message: String },
}

/// Field names the export payload must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "results",
    "multicomparison",
    "global_stats",
    "group_stats",
    "original_data",
    "classes",
    "variable_names",
];

/// Lists required fields absent from the payload.
pub fn missing_fields(payload: &serde_json::Value) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| payload.get(field).is_none())
        .collect()
}

/// Client-echoed analysis payload accepted by the export endpoint.
///
/// Tolerant of round-trip artifacts: missing matrix cells arrive as JSON
/// nulls, class labels may arrive as floats, and optional comparison fields
/// fall back to neutral values.
#[derive(Debug, Deserialize)]
pub struct ExportBundle {
    pub results: Vec<ResultRow>,
    pub multicomparison: Vec<ComparisonRow>,
    pub global_stats: GlobalStats,
    pub group_stats: BTreeMap<String, StatSeries>,
    pub original_data: Vec<Vec<Option<f64>>>,
    pub classes: Vec<f64>,
    pub variable_names: Vec<String>,
}

/// One per-variable test result as echoed by the client.
#[derive(Debug, Deserialize)]
pub struct ResultRow {
    pub variable: String,
    #[serde(rename = "pValue")]
    pub p_value: f64,
    pub fdr: f64,
    #[serde(rename = "effectSize")]
    pub effect_size: f64,
    #[serde(rename = "fStat")]
    pub f_stat: f64,
}

/// One pairwise comparison row as echoed by the client.
#[derive(Debug, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "variableIndex")]
    pub variable_index: i64,
    pub variable: String,
    #[serde(rename = "groupX")]
    pub group_x: i64,
    #[serde(rename = "groupY")]
    pub group_y: i64,
    #[serde(rename = "pValue")]
    pub p_value: f64,
    #[serde(rename = "pValue_FDR", default)]
    pub p_value_fdr: Option<f64>,
    pub mean_diff: f64,
    #[serde(rename = "tStat", default)]
    pub t_stat: f64,
}

/// A rendered workbook: named CSV sheets plus the suggested download name.
#[derive(Debug, Clone, Serialize)]
pub struct Workbook {
    pub file_name: String,
    pub sheets: Vec<Sheet>,
}

/// One workbook sheet rendered as a CSV document.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub name: String,
    pub csv: String,
}

/// Renders the five-sheet ANOVA workbook.
///
/// Sheet order and headers follow the layout the downstream spreadsheet
/// tooling expects; rows preserve the payload's ordering.
pub fn anova_workbook(bundle: &ExportBundle) -> Result<Workbook, ExportError> {
    Ok(Workbook {
        file_name: "ANOVA_results".to_string(),
        sheets: vec![
            anova_table_sheet(&bundle.results)?,
            multicomparison_sheet(&bundle.multicomparison)?,
            dataset_sheet(
                &bundle.original_data,
                &bundle.classes,
                &bundle.variable_names,
            )?,
            global_stats_sheet(&bundle.global_stats)?,
            group_stats_sheet(&bundle.group_stats, &bundle.variable_names)?,
        ],
    })
}

/// Per-variable test results, indexed 1-based.
fn anova_table_sheet(results: &[ResultRow]) -> Result<Sheet, ExportError> {
    let mut rows = vec![text_row(&[
        "VariableIndex",
        "Variable",
        "P-Nominal",
        "P_FDR",
        "Effect size (%)",
        "F-stat",
    ])];

    for (i, result) in results.iter().enumerate() {
        rows.push(vec![
            (i + 1).to_string(),
            result.variable.clone(),
            num_cell(result.p_value),
            num_cell(result.fdr),
            num_cell(result.effect_size),
            num_cell(result.f_stat),
        ]);
    }

    sheet("ANOVA_TABLE_KKH", rows)
}

/// Pairwise group comparisons; FDR falls back to the nominal p-value.
fn multicomparison_sheet(comparisons: &[ComparisonRow]) -> Result<Sheet, ExportError> {
    let mut rows = vec![text_row(&[
        "VariableIndex",
        "Variable",
        "GroupX",
        "GroupY",
        "P_Nominal",
        "P_FDR",
        "MeanDiff",
        "T-stat",
    ])];

    for comparison in comparisons {
        rows.push(vec![
            comparison.variable_index.to_string(),
            comparison.variable.clone(),
            comparison.group_x.to_string(),
            comparison.group_y.to_string(),
            num_cell(comparison.p_value),
            num_cell(comparison.p_value_fdr.unwrap_or(comparison.p_value)),
            num_cell(comparison.mean_diff),
            num_cell(comparison.t_stat),
        ]);
    }

    sheet("MULTICOMPARISON", rows)
}

/// The analyzed matrix with a variable-number banner and a design column.
fn dataset_sheet(
    data: &[Vec<Option<f64>>],
    classes: &[f64],
    variable_names: &[String],
) -> Result<Sheet, ExportError> {
    let mut banner = vec![String::new(), "Variable#".to_string()];
    banner.extend((1..=variable_names.len()).map(|i| i.to_string()));

    let mut header = vec!["Sample#".to_string(), "Design".to_string()];
    header.extend(variable_names.iter().cloned());

    let mut rows = vec![banner, header];
    for (i, sample) in data.iter().enumerate() {
        let class = classes.get(i).copied().unwrap_or(f64::NAN);
        let mut row = vec![(i + 1).to_string(), class_cell(class)];
        row.extend(sample.iter().map(|cell| opt_cell(*cell)));
        rows.push(row);
    }

    sheet("DATASET", rows)
}

/// Whole-dataset summary metrics, one row per variable.
fn global_stats_sheet(stats: &GlobalStats) -> Result<Sheet, ExportError> {
    let mut rows = vec![text_row(&[
        "Variable", "RSD", "STD", "MEAN", "RANGE", "MIN", "MAX",
    ])];

    for (i, variable) in stats.variables.iter().enumerate() {
        rows.push(vec![
            variable.clone(),
            series_cell(&stats.series.rsd, i),
            series_cell(&stats.series.std, i),
            series_cell(&stats.series.mean, i),
            series_cell(&stats.series.range, i),
            series_cell(&stats.series.min, i),
            series_cell(&stats.series.max, i),
        ]);
    }

    sheet("GLOBALSTATDATA", rows)
}

/// Per-group summary metrics, groups in sorted name order across columns.
fn group_stats_sheet(
    group_stats: &BTreeMap<String, StatSeries>,
    variable_names: &[String],
) -> Result<Sheet, ExportError> {
    const METRICS: [&str; 6] = ["RSD", "STD", "MEAN", "RANGE", "MIN", "MAX"];

    let mut header = vec!["Variable".to_string()];
    for group in group_stats.keys() {
        for metric in METRICS {
            header.push(format!("{}-{}", group, metric));
        }
    }

    let mut rows = vec![header];
    for (i, variable) in variable_names.iter().enumerate() {
        let mut row = vec![variable.clone()];
        for series in group_stats.values() {
            row.push(series_cell(&series.rsd, i));
            row.push(series_cell(&series.std, i));
            row.push(series_cell(&series.mean, i));
            row.push(series_cell(&series.range, i));
            row.push(series_cell(&series.min, i));
            row.push(series_cell(&series.max, i));
        }
        rows.push(row);
    }

    sheet("GROUPSTATDATA", rows)
}

fn sheet(name: &str, rows: Vec<Vec<String>>) -> Result<Sheet, ExportError> {
    let render_error = |message: String| ExportError::Render {
        sheet: name.to_string(),
        message,
    };

    // Flexible: client-echoed matrices may be ragged.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in &rows {
        writer
            .write_record(row)
            .map_err(|e| render_error(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| render_error(e.to_string()))?;
    let csv = String::from_utf8(bytes).map_err(|e| render_error(e.to_string()))?;

    Ok(Sheet {
        name: name.to_string(),
        csv,
    })
}

fn text_row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Finite numbers render with their shortest form; NaN and infinities
/// become empty cells.
fn num_cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

fn opt_cell(value: Option<f64>) -> String {
    value.map(num_cell).unwrap_or_default()
}

/// Class labels render as integers, truncating float-typed labels.
fn class_cell(value: f64) -> String {
    if value.is_finite() {
        (value as i64).to_string()
    } else {
        String::new()
    }
}

/// Out-of-range reads render as empty cells rather than failing the sheet.
fn series_cell(series: &[f64], index: usize) -> String {
    num_cell(series.get(index).copied().unwrap_or(f64::NAN))
}
