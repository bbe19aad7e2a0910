//! Dataset assembly from an uploaded table.

use super::layout::is_id_name;
use super::{convert_class_labels, RawTable, TableLayout};
use crate::domain::foundation::{ClassLabels, DataMatrix, Dataset, DomainError, ErrorCode};

/// Column names listed when reporting an unknown class column.
const AVAILABLE_COLUMN_LIMIT: usize = 20;

/// Parses uploaded tables into analysis-ready datasets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetParser;

impl DatasetParser {
    pub fn new() -> Self {
        Self
    }

    /// Previews the structure of `bytes` without touching the numbers.
    pub fn preview(&self, bytes: &[u8]) -> Result<super::DatasetPreview, DomainError> {
        let table = RawTable::from_csv_bytes(bytes)?;
        let layout = TableLayout::detect(&table);
        Ok(super::DatasetPreview::build(&table, &layout))
    }

    /// Parses CSV `bytes` using `class_column` as the grouping column.
    ///
    /// Measurement columns are those right of the trigger; without a
    /// trigger, every column except the class column and id-like columns.
    /// Class labels are converted before row filtering, so dropped rows
    /// never shift the label coding of the survivors.
    ///
    /// # Edge Cases
    /// - Cells that fail numeric parsing (after comma-to-period decimal
    ///   normalization) become missing values.
    /// - Rows whose measurement cells are all missing are dropped together
    ///   with their class label.
    /// - An unknown class column is `VALIDATION_FAILED`, listing the
    ///   available column names.
    /// - Structural minima (3 samples, 2 variables, 2 groups) are enforced
    ///   on what remains after filtering.
    pub fn parse(&self, bytes: &[u8], class_column: &str) -> Result<Dataset, DomainError> {
        let table = RawTable::from_csv_bytes(bytes)?;
        let layout = TableLayout::detect(&table);
        let rows = layout.data_rows(&table);
        if rows.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyDataset,
                "File contains no data rows",
            ));
        }

        let class_idx = layout.column_index(class_column).ok_or_else(|| {
            let available: Vec<&str> = layout
                .columns
                .iter()
                .take(AVAILABLE_COLUMN_LIMIT)
                .map(String::as_str)
                .collect();
            DomainError::validation(
                "class_column",
                format!("Class column '{}' not found", class_column),
            )
            .with_detail("available_columns", available.join(", "))
        })?;

        let data_cols: Vec<usize> = match layout.trigger_col {
            Some(tc) => (tc + 1..layout.columns.len()).collect(),
            None => layout
                .columns
                .iter()
                .enumerate()
                .filter(|(idx, name)| *idx != class_idx && !is_id_name(name))
                .map(|(idx, _)| idx)
                .collect(),
        };

        let class_cells: Vec<String> = rows.iter().map(|row| row[class_idx].clone()).collect();
        let labels = convert_class_labels(&class_cells);

        let mut kept_rows: Vec<Vec<f64>> = Vec::new();
        let mut kept_labels: Vec<i64> = Vec::new();
        for (row, label) in rows.iter().zip(labels) {
            let values: Vec<f64> = data_cols
                .iter()
                .map(|&col| parse_numeric_cell(&row[col]))
                .collect();
            if !values.is_empty() && values.iter().all(|v| v.is_nan()) {
                continue;
            }
            kept_rows.push(values);
            kept_labels.push(label);
        }

        let variable_names: Vec<String> = data_cols
            .iter()
            .map(|&col| layout.columns[col].clone())
            .collect();
        let matrix = DataMatrix::from_rows(kept_rows)?;
        Dataset::new(matrix, ClassLabels::new(kept_labels), variable_names)
    }
}

/// Numeric cell coercion: comma decimal separators are normalized to
/// periods, anything unparseable becomes a missing value.
fn parse_numeric_cell(cell: &str) -> f64 {
    cell.replace(',', ".").parse::<f64>().unwrap_or(f64::NAN)
}
