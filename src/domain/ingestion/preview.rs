//! Upload preview: table structure without running any analysis.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use super::layout::{is_class_name, is_id_name};
use super::{RawTable, TableLayout};

/// Rows included in a preview payload.
pub const PREVIEW_ROW_LIMIT: usize = 1000;

/// Sample values listed per metadata column.
const SAMPLE_VALUE_LIMIT: usize = 10;

/// Metadata columns with more distinct values than this are treated as
/// identifiers and left out of the candidate list.
const METADATA_UNIQUE_LIMIT: usize = 50;

/// Distinct-value band for a column to qualify as class labels.
const CLASS_UNIQUE_MIN: usize = 2;
const CLASS_UNIQUE_MAX: usize = 10;

/// Candidate class column with its distinct-value summary.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataColumn {
    pub name: String,
    pub unique_count: usize,
    pub sample_values: Vec<Value>,
}

/// Structure preview for an uploaded table.
///
/// Shows the client what the trigger detection resolved so a class column
/// can be chosen before the analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetPreview {
    pub trigger_found: bool,
    pub trigger_column: Option<String>,
    pub metadata_columns: Vec<MetadataColumn>,
    pub variable_names: Vec<String>,
    pub num_samples: usize,
    pub num_variables: usize,
    pub preview_rows: Vec<BTreeMap<String, String>>,
    pub all_columns: Vec<String>,
}

impl DatasetPreview {
    /// Builds the preview of an already-loaded table.
    ///
    /// With a trigger, metadata columns are everything on its left (high
    /// cardinality columns skipped) and variables everything on its right.
    /// Without one, class-column heuristics run: keyword-named columns
    /// first, then the first column whose cardinality looks like group
    /// labels, then the first column as a last resort.
    pub fn build(table: &RawTable, layout: &TableLayout) -> Self {
        let rows = layout.data_rows(table);

        let (trigger_found, trigger_column, metadata_columns, variable_names) = match layout
            .trigger_col
        {
            Some(tc) => {
                let metadata = (0..tc)
                    .map(|col| summarize_column(layout, &rows, col))
                    .filter(|m| m.unique_count <= METADATA_UNIQUE_LIMIT)
                    .collect();
                let variables = layout.columns[tc + 1..].to_vec();
                (true, Some(layout.columns[tc].clone()), metadata, variables)
            }
            None => match find_class_column(layout, &rows) {
                Some(idx) => {
                    let metadata = vec![summarize_column(layout, &rows, idx)];
                    let variables = layout
                        .columns
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != idx)
                        .map(|(_, name)| name.clone())
                        .collect();
                    (false, None, metadata, variables)
                }
                None => {
                    let metadata = vec![summarize_column(layout, &rows, 0)];
                    let variables = layout.columns.iter().skip(1).cloned().collect();
                    (false, None, metadata, variables)
                }
            },
        };

        let preview_rows: Vec<BTreeMap<String, String>> = rows
            .iter()
            .take(PREVIEW_ROW_LIMIT)
            .map(|row| {
                layout
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect();

        let num_variables = variable_names.len();
        Self {
            trigger_found,
            trigger_column,
            metadata_columns,
            variable_names,
            num_samples: rows.len(),
            num_variables,
            preview_rows,
            all_columns: layout.columns.clone(),
        }
    }
}

fn summarize_column(layout: &TableLayout, rows: &[&[String]], col: usize) -> MetadataColumn {
    let uniques = distinct_non_empty(rows, col);
    MetadataColumn {
        name: layout.columns[col].clone(),
        unique_count: uniques.len(),
        sample_values: sample_values(&uniques),
    }
}

/// Distinct non-empty cells of a column, in first-appearance order.
fn distinct_non_empty(rows: &[&[String]], col: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for row in rows {
        let cell = &row[col];
        if cell.is_empty() || !seen.insert(cell.clone()) {
            continue;
        }
        ordered.push(cell.clone());
    }
    ordered
}

/// Up to [`SAMPLE_VALUE_LIMIT`] distinct values, sorted for display.
///
/// Fully numeric columns sort numerically and render as JSON numbers;
/// anything else sorts lexicographically as strings.
fn sample_values(uniques: &[String]) -> Vec<Value> {
    let mut sample: Vec<&String> = uniques.iter().take(SAMPLE_VALUE_LIMIT).collect();
    let all_int = !sample.is_empty() && sample.iter().all(|v| v.parse::<i64>().is_ok());
    let all_num =
        all_int || (!sample.is_empty() && sample.iter().all(|v| v.parse::<f64>().is_ok()));

    if all_num {
        sample.sort_by(|a, b| {
            let x = a.parse::<f64>().unwrap_or(f64::NAN);
            let y = b.parse::<f64>().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
        });
    } else {
        sample.sort();
    }

    sample
        .into_iter()
        .map(|v| {
            if all_int {
                Value::from(v.parse::<i64>().unwrap_or_default())
            } else if all_num {
                Value::from(v.parse::<f64>().unwrap_or(f64::NAN))
            } else {
                Value::from(v.as_str())
            }
        })
        .collect()
}

fn find_class_column(layout: &TableLayout, rows: &[&[String]]) -> Option<usize> {
    // Keyword-named columns win over pure cardinality checks.
    for (idx, name) in layout.columns.iter().enumerate() {
        if is_id_name(name) {
            continue;
        }
        if is_class_name(name) && looks_like_classes(rows, idx) {
            return Some(idx);
        }
    }
    for (idx, name) in layout.columns.iter().enumerate() {
        if is_id_name(name) {
            continue;
        }
        if looks_like_classes(rows, idx) {
            return Some(idx);
        }
    }
    None
}

/// A class column repeats a handful of labels: 2 to 10 distinct values
/// covering less than half of the filled rows.
fn looks_like_classes(rows: &[&[String]], col: usize) -> bool {
    let non_empty = rows.iter().filter(|r| !r[col].is_empty()).count();
    if non_empty == 0 {
        return false;
    }
    let unique = distinct_non_empty(rows, col).len();
    (CLASS_UNIQUE_MIN..=CLASS_UNIQUE_MAX).contains(&unique) && unique * 2 < non_empty
}
