//! Semantic concept resolution against account labels.
//!
//! Filers name the same line item many different ways, so each semantic
//! concept ("Revenue", "Total Current Assets", ...) carries an ordered list
//! of candidate labels tried in priority order. The lists are data, not
//! code: they can be replaced or extended without touching the resolution
//! logic. An exact label match is preferred over a substring match; within
//! each pass the first candidate that hits wins.

use std::collections::HashMap;
use tenk_extract::NormalizedStatement;

/// A semantic financial quantity resolvable to an account label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    /// Sales revenue (income statement)
    Revenue,
    /// Cost of goods sold (income statement)
    CostOfGoodsSold,
    /// Operating income, used directly as EBIT (income statement)
    OperatingIncome,
    /// Net income (income statement)
    NetIncome,
    /// Depreciation expense (cash-flow statement)
    Depreciation,
    /// Amortization expense (cash-flow statement)
    Amortization,
    /// Interest expense (income statement)
    InterestExpense,
    /// Income tax expense (income statement)
    TaxExpense,
    /// Total assets (balance sheet)
    TotalAssets,
    /// Total stockholders' equity (balance sheet)
    TotalEquity,
    /// Total liabilities (balance sheet)
    TotalLiabilities,
    /// Total liabilities and stockholders' equity (balance sheet)
    TotalLiabilitiesAndEquity,
    /// Cash and cash equivalents (balance sheet)
    Cash,
    /// Marketable securities (balance sheet)
    MarketableSecurities,
    /// Accounts receivable (balance sheet)
    AccountsReceivable,
    /// Total current assets (balance sheet)
    CurrentAssets,
    /// Total current liabilities (balance sheet)
    CurrentLiabilities,
}

/// A concept resolved to a concrete statement row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccount {
    /// The account label that matched
    pub label: String,
    /// Row index within the statement
    pub row: usize,
}

/// Priority lists of candidate account labels per concept.
#[derive(Debug, Clone)]
pub struct ConceptDictionary {
    candidates: HashMap<Concept, Vec<String>>,
}

impl ConceptDictionary {
    /// Replace the candidate list for a concept.
    pub fn set<I, S>(&mut self, concept: Concept, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates
            .insert(concept, candidates.into_iter().map(Into::into).collect());
    }

    /// Candidate labels for a concept, in priority order.
    pub fn candidates(&self, concept: Concept) -> &[String] {
        self.candidates
            .get(&concept)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolve a concept against a statement's row index.
    ///
    /// Exact label matches are tried across all candidates first, then
    /// substring matches; in both passes candidate priority decides and the
    /// first matching row wins. `None` when nothing matches; callers
    /// degrade the affected ratios to missing.
    pub fn resolve(
        &self,
        statement: &NormalizedStatement,
        concept: Concept,
    ) -> Option<ResolvedAccount> {
        let candidates = self.candidates(concept);

        for candidate in candidates {
            if let Some(row) = statement.find_exact(candidate) {
                return Some(ResolvedAccount {
                    label: statement.labels()[row].clone(),
                    row,
                });
            }
        }
        for candidate in candidates {
            if let Some(row) = statement.find_containing(candidate) {
                return Some(ResolvedAccount {
                    label: statement.labels()[row].clone(),
                    row,
                });
            }
        }
        None
    }

    /// Resolve a concept and return its value series, one entry per period.
    ///
    /// An unresolved concept yields all-missing values of the statement's
    /// period count.
    pub fn series(&self, statement: &NormalizedStatement, concept: Concept) -> Vec<Option<f64>> {
        match self.resolve(statement, concept) {
            Some(account) => statement
                .row(account.row)
                .map(<[Option<f64>]>::to_vec)
                .unwrap_or_else(|| vec![None; statement.period_count()]),
            None => vec![None; statement.period_count()],
        }
    }
}

impl Default for ConceptDictionary {
    /// The stock candidate lists, carried from observed filing vocabulary.
    fn default() -> Self {
        let mut dict = Self {
            candidates: HashMap::new(),
        };

        dict.set(
            Concept::Revenue,
            [
                "Revenue",
                "Sales",
                "Net sales",
                "Total net sales",
                "Net revenues",
                "Net revenue",
                "Total revenues",
                "operating revenues",
            ],
        );
        dict.set(
            Concept::CostOfGoodsSold,
            [
                "Cost of sales",
                "Costs of sales",
                "Cost of revenue",
                "Cost of goods sold",
                "COGS",
                "Cost of products sold",
                "cost of revenues",
                "Selling, general and administrative expense",
                "Cost of Goods and Services Sold",
                "Cost of services",
            ],
        );
        dict.set(
            Concept::OperatingIncome,
            [
                "Income from operations",
                "Operating income",
                "Operating (loss) income",
                "Operating Income",
                "Earnings from operations",
                "OPERATING INCOME",
                "Operating Profit",
                "Income from continuing operations before provision/(benefit) for taxes on income",
            ],
        );
        dict.set(
            Concept::NetIncome,
            ["Net income", "Net Income", "Net (loss) income", "Net earnings"],
        );
        dict.set(Concept::Depreciation, ["Depreciation"]);
        dict.set(Concept::Amortization, ["Amortization", "amortization"]);
        dict.set(Concept::InterestExpense, ["Interest expense"]);
        dict.set(
            Concept::TaxExpense,
            [
                "Provision for income taxes",
                "Provision for/(Benefit from) income taxes",
                "Provision for/(benefit from) income taxes",
                "Provision for taxes",
                "Provision/(benefit) for taxes on income",
                "Income tax (benefit) expense",
                "(Provision) benefit for income taxes",
                "Income taxes",
                "Income tax expense (benefit)",
            ],
        );
        dict.set(
            Concept::TotalAssets,
            ["Total assets", "Total Assets", "TOTAL ASSETS"],
        );
        dict.set(
            Concept::TotalEquity,
            [
                "Total stockholders' equity",
                "Total stockholders\u{2019} equity",
                "Total shareholders' equity",
                "Total Stockholders' Equity",
                "Total shareholders\u{2019} equity",
                "Total equity",
                "Total Equity",
                "TOTAL EQUITY",
            ],
        );
        dict.set(
            Concept::TotalLiabilities,
            ["Total liabilities", "Total Liabilities"],
        );
        dict.set(
            Concept::TotalLiabilitiesAndEquity,
            [
                "Total liabilities and stockholders' equity",
                "Total liabilities and stockholders\u{2019} equity",
                "Total liabilities and shareholders' equity",
                "Total liabilities and shareholders\u{2019} equity",
                "Total liabilities and equity",
                "Total Liabilities and Equity",
                "TOTAL LIABILITIES AND EQUITY",
                "Total Liabilities and Stockholders' Equity",
                "Stockholders' Equity, Including Portion Attributable to Noncontrolling Interest",
                "Liabilities and Equity",
            ],
        );
        dict.set(
            Concept::Cash,
            ["Cash and cash equivalents", "CASH", "Cash", "cash"],
        );
        dict.set(
            Concept::MarketableSecurities,
            ["Marketable securities", "Trading assets", "Short-term investments"],
        );
        dict.set(
            Concept::AccountsReceivable,
            [
                "Accounts receivable",
                "receivables",
                "accounts receivable",
                "Accounts and notes receivable",
            ],
        );
        dict.set(
            Concept::CurrentAssets,
            ["Total current assets", "TOTAL CURRENT ASSETS", "Assets, Current"],
        );
        dict.set(
            Concept::CurrentLiabilities,
            [
                "Total current liabilities",
                "TOTAL CURRENT LIABILITIES",
                "Liabilities, Current",
            ],
        );

        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(labels: &[&str]) -> NormalizedStatement {
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let values = vec![vec![Some(1.0)]; labels.len()];
        let sections = vec![None; labels.len()];
        NormalizedStatement::new(labels, vec!["2023".to_string()], values, sections, Vec::new())
            .unwrap()
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let stmt = statement(&["Net sales of services", "Net sales"]);
        let dict = ConceptDictionary::default();
        let account = dict.resolve(&stmt, Concept::Revenue).unwrap();
        // "Net sales" matches exactly even though the substring candidate
        // would hit the earlier row first
        assert_eq!(account.label, "Net sales");
        assert_eq!(account.row, 1);
    }

    #[test]
    fn test_substring_fallback_takes_first_row() {
        let stmt = statement(&["Total net sales to customers", "Other income"]);
        let dict = ConceptDictionary::default();
        let account = dict.resolve(&stmt, Concept::Revenue).unwrap();
        assert_eq!(account.row, 0);
    }

    #[test]
    fn test_priority_order_decides() {
        // "Income from operations" outranks "Operating income"
        let stmt = statement(&["Operating income", "Income from operations"]);
        let dict = ConceptDictionary::default();
        let account = dict.resolve(&stmt, Concept::OperatingIncome).unwrap();
        assert_eq!(account.label, "Income from operations");
    }

    #[test]
    fn test_unresolved_concept_is_none() {
        let stmt = statement(&["Goodwill", "Intangible assets"]);
        let dict = ConceptDictionary::default();
        assert!(dict.resolve(&stmt, Concept::Revenue).is_none());
        assert_eq!(dict.series(&stmt, Concept::Revenue), vec![None]);
    }

    #[test]
    fn test_custom_candidates() {
        let stmt = statement(&["Turnover"]);
        let mut dict = ConceptDictionary::default();
        dict.set(Concept::Revenue, ["Turnover"]);
        assert!(dict.resolve(&stmt, Concept::Revenue).is_some());
    }
}
