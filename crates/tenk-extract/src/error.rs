//! Error types for statement extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while normalizing a rendered statement table.
///
/// All variants are hard failures for the statement being processed: past
/// any of them the data's integrity cannot be guaranteed. The pipeline
/// surfaces them per statement and continues with the remaining statements.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The report page contains no table element
    #[error("No table found in report page")]
    NoTable,

    /// A table row matched none of header/section/data
    #[error("Row {row} matched none of header/section/data")]
    RowClassification {
        /// Zero-based row index within the table
        row: usize,
    },

    /// The table has no header row, so period labels cannot be assigned
    #[error("No header row found; cannot assign period labels")]
    NoHeaderRow,

    /// Period label count does not match the surviving data columns
    #[error("Header supplies {labels} period labels but {columns} data columns survive")]
    ColumnCountMismatch {
        /// Number of period labels captured from the header
        labels: usize,
        /// Number of data columns after pruning
        columns: usize,
    },

    /// The trailing footnote payload does not match the expected layout
    #[error("Footnote payload mismatch: {detail}")]
    FootnoteLayout {
        /// What was expected and what was found
        detail: String,
    },

    /// A cell survived cleansing but is not numeric
    #[error("Cell at row {row:?}, column {column} is not numeric: {text:?}")]
    ValueParse {
        /// Account label of the offending row
        row: String,
        /// Zero-based value-column index
        column: usize,
        /// The cell text after cleansing
        text: String,
    },

    /// Statement grid shape is internally inconsistent
    #[error("Inconsistent statement shape: {0}")]
    Shape(String),
}
