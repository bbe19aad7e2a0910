//! Header and trigger-column resolution for uploaded tables.

use super::RawTable;

/// Marker cell that separates metadata columns from measurement columns.
pub const DATA_TRIGGER: &str = "DATA";

/// Rows scanned when locating the trigger cell.
pub const TRIGGER_SCAN_ROWS: usize = 5;

/// Lowercased substrings marking sample-identifier columns.
pub const ID_KEYWORDS: [&str; 5] = ["id", "sample", "patient", "subject", "name"];

/// Lowercased substrings marking likely class columns.
pub const CLASS_KEYWORDS: [&str; 7] = [
    "group",
    "class",
    "treatment",
    "label",
    "category",
    "type",
    "condition",
];

/// Resolved header layout of a raw table.
///
/// The trigger convention: a cell equal to `DATA` (case-insensitive) marks
/// the boundary between sample metadata on its left and measurement columns
/// on its right, and its row is the header row. Files without a trigger use
/// the first row as the header and rely on column-name heuristics instead.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// One resolved name per grid column.
    pub columns: Vec<String>,
    /// Grid row used as the header.
    pub header_row: usize,
    /// Column of the trigger cell, when present.
    pub trigger_col: Option<usize>,
}

impl TableLayout {
    /// Resolves the header layout of `table`.
    ///
    /// Scans the first [`TRIGGER_SCAN_ROWS`] rows for the trigger; the first
    /// match wins. Header cells left empty for columns right of the trigger
    /// take their name from the row above the header row, skipping `nan`
    /// placeholders, with `Variable_{k}` (1-based from the trigger) as the
    /// final fallback. Other unnamed columns become `Column_{k}`.
    pub fn detect(table: &RawTable) -> Self {
        let trigger = find_trigger(table);
        let header_row = trigger.map(|(row, _)| row).unwrap_or(0);
        let trigger_col = trigger.map(|(_, col)| col);

        let mut columns = Vec::with_capacity(table.n_cols());
        for col in 0..table.n_cols() {
            let name = table.cell(header_row, col);
            if !name.is_empty() {
                columns.push(name.to_string());
                continue;
            }
            match trigger_col {
                Some(tc) if col > tc => {
                    let above = if header_row > 0 {
                        table.cell(header_row - 1, col)
                    } else {
                        ""
                    };
                    if !above.is_empty() && !above.eq_ignore_ascii_case("nan") {
                        columns.push(above.to_string());
                    } else {
                        columns.push(format!("Variable_{}", col - tc));
                    }
                }
                _ => columns.push(format!("Column_{}", col + 1)),
            }
        }

        Self {
            columns,
            header_row,
            trigger_col,
        }
    }

    /// Looks up a column index by trimmed name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns.iter().position(|c| c == wanted)
    }

    /// Data rows of `table`: everything below the header, minus rows whose
    /// cells are all empty.
    pub fn data_rows<'a>(&self, table: &'a RawTable) -> Vec<&'a [String]> {
        (self.header_row + 1..table.n_rows())
            .map(|r| table.row(r))
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect()
    }
}

/// True when `name` looks like a sample-identifier column.
pub fn is_id_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    ID_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// True when `name` looks like a class column.
pub fn is_class_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    CLASS_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn find_trigger(table: &RawTable) -> Option<(usize, usize)> {
    for row in 0..table.n_rows().min(TRIGGER_SCAN_ROWS) {
        for col in 0..table.n_cols() {
            if table.cell(row, col).eq_ignore_ascii_case(DATA_TRIGGER) {
                return Some((row, col));
            }
        }
    }
    None
}
