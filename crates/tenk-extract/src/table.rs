//! Normalized statement tables.

use crate::error::{ExtractError, Result};
use serde::Serialize;

/// One extracted footnote.
///
/// Footnotes are referenced in-table by a bracketed index marker (`[1]`,
/// `[2]`, ...) and rendered as payload rows appended after the statement
/// data. Indices are dense starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footnote {
    /// 1-based footnote index
    pub index: usize,
    /// Footnote text, from the trailing payload rows
    pub text: String,
    /// Account labels of the data rows that referenced this footnote
    pub referents: Vec<String>,
    /// Grid positions (row, value-column) where the marker occurred
    pub positions: Vec<(usize, usize)>,
}

/// A cleaned, typed, labeled statement table.
///
/// Rows are keyed by account label and columns by period label, both
/// order-preserving from the source. Values are `Option<f64>`; `None` is
/// the explicit missing-value marker. Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedStatement {
    labels: Vec<String>,
    periods: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
    sections: Vec<Option<String>>,
    footnotes: Vec<Footnote>,
}

impl NormalizedStatement {
    /// Build a statement, validating that the grid shape is consistent.
    ///
    /// `sections` is parallel to `labels` (the enclosing section of each
    /// account row, when any); `values` is row-major with one entry per
    /// period for every row.
    pub fn new(
        labels: Vec<String>,
        periods: Vec<String>,
        values: Vec<Vec<Option<f64>>>,
        sections: Vec<Option<String>>,
        footnotes: Vec<Footnote>,
    ) -> Result<Self> {
        if values.len() != labels.len() || sections.len() != labels.len() {
            return Err(ExtractError::Shape(format!(
                "{} labels, {} value rows, {} section entries",
                labels.len(),
                values.len(),
                sections.len()
            )));
        }
        if let Some(row) = values.iter().find(|row| row.len() != periods.len()) {
            return Err(ExtractError::Shape(format!(
                "row width {} does not match {} periods",
                row.len(),
                periods.len()
            )));
        }

        Ok(Self {
            labels,
            periods,
            values,
            sections,
            footnotes,
        })
    }

    /// An empty statement (no rows, no periods). Lookups find nothing.
    pub fn empty() -> Self {
        Self {
            labels: Vec::new(),
            periods: Vec::new(),
            values: Vec::new(),
            sections: Vec::new(),
            footnotes: Vec::new(),
        }
    }

    /// Account labels, in source order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Period labels, in source order (most recent first in filings).
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// Extracted footnotes, in index order.
    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Number of account rows.
    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of period columns.
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Whether the statement has no data rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the first row whose label equals `label`.
    pub fn find_exact(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Index of the first row whose label contains `fragment`.
    pub fn find_containing(&self, fragment: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.contains(fragment))
    }

    /// Values of one row.
    pub fn row(&self, index: usize) -> Option<&[Option<f64>]> {
        self.values.get(index).map(Vec::as_slice)
    }

    /// Single cell by row index and period index.
    pub fn value(&self, row: usize, period: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(period)).copied().flatten()
    }

    /// Single cell by account label (first exact match) and period index.
    pub fn value_by_label(&self, label: &str, period: usize) -> Option<f64> {
        self.find_exact(label)
            .and_then(|row| self.value(row, period))
    }

    /// Enclosing section label of a row, when the row falls inside one.
    pub fn section_of(&self, row: usize) -> Option<&str> {
        self.sections.get(row).and_then(|s| s.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NormalizedStatement {
        NormalizedStatement::new(
            vec!["Cash".to_string(), "Total assets".to_string()],
            vec!["2023".to_string(), "2022".to_string()],
            vec![
                vec![Some(100.0), Some(90.0)],
                vec![Some(500.0), None],
            ],
            vec![Some("Current assets:".to_string()), None],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_label_and_period() {
        let stmt = sample();
        assert_eq!(stmt.value_by_label("Cash", 0), Some(100.0));
        assert_eq!(stmt.value_by_label("Cash", 1), Some(90.0));
        assert_eq!(stmt.value_by_label("Total assets", 1), None);
        assert_eq!(stmt.value_by_label("Inventory", 0), None);
    }

    #[test]
    fn test_find_containing_returns_first() {
        let stmt = sample();
        assert_eq!(stmt.find_containing("assets"), Some(1));
        assert_eq!(stmt.find_containing("Ca"), Some(0));
    }

    #[test]
    fn test_sections() {
        let stmt = sample();
        assert_eq!(stmt.section_of(0), Some("Current assets:"));
        assert_eq!(stmt.section_of(1), None);
    }

    #[test]
    fn test_shape_validation() {
        let result = NormalizedStatement::new(
            vec!["a".to_string()],
            vec!["p".to_string()],
            vec![vec![Some(1.0), Some(2.0)]],
            vec![None],
            Vec::new(),
        );
        assert!(matches!(result, Err(ExtractError::Shape(_))));
    }

    #[test]
    fn test_empty_statement() {
        let stmt = NormalizedStatement::empty();
        assert!(stmt.is_empty());
        assert_eq!(stmt.value_by_label("anything", 0), None);
    }
}
