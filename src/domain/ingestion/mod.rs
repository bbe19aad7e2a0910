//! Dataset ingestion: delimited uploads to analysis-ready datasets.
//!
//! # Components
//!
//! - **RawTable**: CSV bytes as a rectangular grid of trimmed cells
//! - **TableLayout**: trigger detection and header/column resolution
//! - **DatasetPreview**: structure preview for an upload, no analysis
//! - **DatasetParser**: full parse into a validated `Dataset`
//!
//! # Design Philosophy
//!
//! Uploads follow the instrument-export convention of a marker column named
//! `DATA`: sample metadata sits on its left, measurements on its right.
//! Layout resolution runs first and cell coercion second, so structural
//! problems surface before any number is parsed. Files without the marker
//! still work through column-name heuristics.

mod labels;
mod layout;
mod parser;
mod preview;
mod raw_table;

pub use labels::convert_class_labels;
pub use layout::{TableLayout, CLASS_KEYWORDS, DATA_TRIGGER, ID_KEYWORDS, TRIGGER_SCAN_ROWS};
pub use parser::DatasetParser;
pub use preview::{DatasetPreview, MetadataColumn, PREVIEW_ROW_LIMIT};
pub use raw_table::RawTable;
