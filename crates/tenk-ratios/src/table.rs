//! Ratio result tables.

use serde::Serialize;

/// A named table of ratio name × period label → value-or-missing.
#[derive(Debug, Clone, Serialize)]
pub struct RatioTable {
    title: String,
    periods: Vec<String>,
    rows: Vec<(String, Vec<Option<f64>>)>,
}

impl RatioTable {
    /// Create an empty table over the given period labels.
    pub fn new(title: impl Into<String>, periods: Vec<String>) -> Self {
        Self {
            title: title.into(),
            periods,
            rows: Vec::new(),
        }
    }

    /// Append a ratio row. Values shorter than the period count are padded
    /// with missing; longer ones are truncated.
    pub fn push_row(&mut self, name: impl Into<String>, mut values: Vec<Option<f64>>) {
        values.resize(self.periods.len(), None);
        self.rows.push((name.into(), values));
    }

    /// Table title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Period labels.
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// Ratio rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.rows.iter().map(|(name, v)| (name.as_str(), v.as_slice()))
    }

    /// Value of one ratio for one period.
    pub fn get(&self, name: &str, period: usize) -> Option<f64> {
        self.rows
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.get(period).copied().flatten())
    }

    /// Whether the table carries any non-missing value.
    pub fn is_all_missing(&self) -> bool {
        self.rows
            .iter()
            .all(|(_, v)| v.iter().all(Option::is_none))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut table = RatioTable::new("Profitability", vec!["2023".into(), "2022".into()]);
        table.push_row("Gross Margin", vec![Some(0.4), Some(0.38)]);
        assert_eq!(table.get("Gross Margin", 0), Some(0.4));
        assert_eq!(table.get("Gross Margin", 1), Some(0.38));
        assert_eq!(table.get("Gross Margin", 2), None);
        assert_eq!(table.get("Unknown", 0), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = RatioTable::new("t", vec!["a".into(), "b".into(), "c".into()]);
        table.push_row("r", vec![Some(1.0)]);
        assert_eq!(table.get("r", 0), Some(1.0));
        assert_eq!(table.get("r", 1), None);
        assert_eq!(table.get("r", 2), None);
    }

    #[test]
    fn test_all_missing() {
        let mut table = RatioTable::new("t", vec!["a".into()]);
        assert!(table.is_all_missing());
        table.push_row("r", vec![None]);
        assert!(table.is_all_missing());
        table.push_row("s", vec![Some(1.0)]);
        assert!(!table.is_all_missing());
    }
}
