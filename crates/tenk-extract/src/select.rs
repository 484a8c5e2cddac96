//! Statement selection by report name heuristics.
//!
//! Filers name the same statements differently ("CONSOLIDATED BALANCE
//! SHEETS", "Condensed Balance Sheet", "Statements of Operations", ...), so
//! each canonical kind is matched by scanning report short names in document
//! order for a set of kind-specific substrings. First match wins. Case
//! variants are listed as separate substrings: the matching is literal, not
//! case-insensitive.

use derive_more::Display;
use tenk_data::edgar::ReportRecord;

/// The four canonical financial statements of an annual filing.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatementKind {
    /// Balance sheet (statement of financial position)
    #[display("Balance Sheet")]
    BalanceSheet,
    /// Income statement (statement of operations)
    #[display("Income Statement")]
    IncomeStatement,
    /// Statement of cash flows
    #[display("Statement of Cash Flows")]
    CashFlow,
    /// Statement of stockholders' equity
    #[display("Statement of Stockholders' Equity")]
    Equity,
}

impl StatementKind {
    /// All kinds, in canonical order.
    pub const ALL: [Self; 4] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::Equity,
    ];

    /// Substrings that identify a report short name as this kind.
    ///
    /// Tried in order against each report name; "Operations" outranks
    /// "Income" because filers reporting a "Statement of Operations" often
    /// also file a separate comprehensive-income page.
    pub const fn name_patterns(self) -> &'static [&'static str] {
        match self {
            Self::BalanceSheet => &["Balance", "BALANCE"],
            Self::IncomeStatement => &["Operations", "OPERATIONS", "Income", "INCOME"],
            Self::CashFlow => &["Cash", "CASH"],
            Self::Equity => &["Equity", "EQUITY"],
        }
    }
}

/// One selected statement report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedStatement {
    /// Canonical statement kind
    pub kind: StatementKind,
    /// Short name of the selected report
    pub short_name: String,
    /// URL of the rendered report page
    pub url: String,
    /// Discovery-order index among the selected reports.
    ///
    /// Per-filer column conventions are keyed to the order statements were
    /// discovered in the manifest, not to a fixed schema.
    pub order: usize,
}

/// Result of matching report records against the canonical kinds.
///
/// A kind with no matching report is simply absent; downstream consumers
/// tolerate absence rather than treating it as fatal.
#[derive(Debug, Clone, Default)]
pub struct StatementSelection {
    selected: Vec<SelectedStatement>,
}

impl StatementSelection {
    /// The selected statements, in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectedStatement> {
        self.selected.iter()
    }

    /// Look up the selection for a kind.
    pub fn get(&self, kind: StatementKind) -> Option<&SelectedStatement> {
        self.selected.iter().find(|s| s.kind == kind)
    }

    /// Number of kinds that found a match.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether no kind found a match.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Match report records to the four canonical statement kinds.
///
/// For each kind the first report (in input order) whose short name contains
/// one of the kind's patterns is selected. The same scan order as the
/// manifest keeps selection deterministic: same input, same output.
pub fn select_statements<'a, I>(reports: I) -> StatementSelection
where
    I: IntoIterator<Item = &'a ReportRecord>,
{
    let reports: Vec<&ReportRecord> = reports.into_iter().collect();

    // Winner per kind: (kind, index of the report in the input sequence)
    let mut winners: Vec<(StatementKind, usize)> = Vec::new();
    for kind in StatementKind::ALL {
        let hit = reports.iter().position(|r| {
            kind.name_patterns()
                .iter()
                .any(|pat| r.short_name.contains(pat))
        });
        if let Some(idx) = hit {
            winners.push((kind, idx));
        }
    }

    // Discovery order: rank of each winner's report among all winning reports
    let mut report_indices: Vec<usize> = winners.iter().map(|&(_, idx)| idx).collect();
    report_indices.sort_unstable();
    report_indices.dedup();

    let selected = winners
        .into_iter()
        .map(|(kind, idx)| {
            let order = report_indices
                .iter()
                .position(|&i| i == idx)
                .unwrap_or_default();
            SelectedStatement {
                kind,
                short_name: reports[idx].short_name.clone(),
                url: reports[idx].url.clone(),
                order,
            }
        })
        .collect();

    StatementSelection { selected }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(short_name: &str, url: &str) -> ReportRecord {
        ReportRecord {
            short_name: short_name.to_string(),
            long_name: format!("0000001 - Statement - {}", short_name),
            position: None,
            category: "Statements".to_string(),
            url: url.to_string(),
        }
    }

    fn apple_style_reports() -> Vec<ReportRecord> {
        vec![
            record("CONSOLIDATED STATEMENTS OF OPERATIONS", "R2.htm"),
            record("CONSOLIDATED STATEMENTS OF COMPREHENSIVE INCOME", "R3.htm"),
            record("CONSOLIDATED BALANCE SHEETS", "R4.htm"),
            record("CONSOLIDATED STATEMENTS OF SHAREHOLDERS EQUITY", "R6.htm"),
            record("CONSOLIDATED STATEMENTS OF CASH FLOWS", "R7.htm"),
        ]
    }

    #[test]
    fn test_selects_all_four_kinds() {
        let reports = apple_style_reports();
        let selection = select_statements(&reports);
        assert_eq!(selection.len(), 4);

        assert_eq!(
            selection.get(StatementKind::BalanceSheet).unwrap().url,
            "R4.htm"
        );
        // "Operations" wins over the comprehensive-income page
        assert_eq!(
            selection.get(StatementKind::IncomeStatement).unwrap().url,
            "R2.htm"
        );
        assert_eq!(selection.get(StatementKind::CashFlow).unwrap().url, "R7.htm");
        assert_eq!(selection.get(StatementKind::Equity).unwrap().url, "R6.htm");
    }

    #[test]
    fn test_discovery_order_follows_document_order() {
        let reports = apple_style_reports();
        let selection = select_statements(&reports);

        // Document order: operations, balance, equity, cash flows
        assert_eq!(selection.get(StatementKind::IncomeStatement).unwrap().order, 0);
        assert_eq!(selection.get(StatementKind::BalanceSheet).unwrap().order, 1);
        assert_eq!(selection.get(StatementKind::Equity).unwrap().order, 2);
        assert_eq!(selection.get(StatementKind::CashFlow).unwrap().order, 3);
    }

    #[test]
    fn test_missing_kind_is_absent_not_fatal() {
        let reports = vec![
            record("CONSOLIDATED BALANCE SHEETS", "R2.htm"),
            record("CONSOLIDATED STATEMENTS OF OPERATIONS", "R3.htm"),
        ];
        let selection = select_statements(&reports);
        assert_eq!(selection.len(), 2);
        assert!(selection.get(StatementKind::CashFlow).is_none());
        assert!(selection.get(StatementKind::Equity).is_none());
    }

    #[test]
    fn test_matching_is_case_sensitive_by_variant() {
        let reports = vec![record("Condensed balance sheet", "R2.htm")];
        // Lowercase "balance" matches neither "Balance" nor "BALANCE"
        let selection = select_statements(&reports);
        assert!(selection.get(StatementKind::BalanceSheet).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let reports = apple_style_reports();
        let a = select_statements(&reports);
        let b = select_statements(&reports);
        for kind in StatementKind::ALL {
            assert_eq!(
                a.get(kind).map(|s| (&s.url, s.order)),
                b.get(kind).map(|s| (&s.url, s.order))
            );
        }
    }
}
