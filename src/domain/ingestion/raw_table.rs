//! Raw delimited-table loading.

use crate::domain::foundation::{DomainError, ErrorCode};

/// An uploaded table as a rectangular grid of trimmed string cells.
///
/// No header interpretation happens here; [`TableLayout`](super::TableLayout)
/// resolves headers and the trigger column in a later pass. Missing cells
/// read as the empty string.
#[derive(Debug, Clone)]
pub struct RawTable {
    cells: Vec<Vec<String>>,
    width: usize,
}

impl RawTable {
    /// Reads CSV bytes into a cell grid.
    ///
    /// Short rows are padded with empty cells to the widest row so later
    /// passes can index columns uniformly.
    ///
    /// # Edge Cases
    /// - An input with no records at all is `EMPTY_DATASET`.
    /// - Invalid UTF-8 or unreadable CSV is `MALFORMED_CSV`.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut cells: Vec<Vec<String>> = Vec::new();
        let mut width = 0;
        for record in reader.records() {
            let record = record.map_err(|e| {
                DomainError::new(ErrorCode::MalformedCsv, format!("CSV parse error: {}", e))
            })?;
            let row: Vec<String> = record.iter().map(|field| field.trim().to_string()).collect();
            width = width.max(row.len());
            cells.push(row);
        }

        if cells.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyDataset,
                "File contains no rows",
            ));
        }
        for row in &mut cells {
            row.resize(width, String::new());
        }

        Ok(Self { cells, width })
    }

    pub fn n_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn n_cols(&self) -> usize {
        self.width
    }

    /// Cell at (row, col). Positions outside the grid read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Full row `row` as padded cells.
    pub fn row(&self, row: usize) -> &[String] {
        &self.cells[row]
    }
}
