//! Solvency ratios.
//!
//! Debt-to-Equity is computed per balance-sheet period. Interest Coverage
//! draws EBIT and interest expense from the income statement; its values
//! align positionally (column i of the income statement covers the fiscal
//! year ending at balance-sheet period i).

use crate::arith::{div, sub};
use crate::concepts::{Concept, ConceptDictionary};
use crate::profitability::series;
use crate::table::RatioTable;
use tenk_extract::NormalizedStatement;

/// Compute the solvency table.
///
/// When no "Total liabilities" line is reported, it is derived per period
/// as Total Liabilities-and-Equity minus Total Equity.
pub fn compute_solvency(
    balance: Option<&NormalizedStatement>,
    income: Option<&NormalizedStatement>,
    dict: &ConceptDictionary,
) -> RatioTable {
    let periods: Vec<String> = balance.map(|s| s.periods().to_vec()).unwrap_or_default();
    let n = periods.len();
    let mut table = RatioTable::new("Solvency", periods);
    if n == 0 {
        return table;
    }

    let equity = series(balance, dict, Concept::TotalEquity, n);

    let liabilities = if balance
        .and_then(|s| dict.resolve(s, Concept::TotalLiabilities))
        .is_some()
    {
        series(balance, dict, Concept::TotalLiabilities, n)
    } else {
        let combined = series(balance, dict, Concept::TotalLiabilitiesAndEquity, n);
        (0..n).map(|i| sub(combined[i], equity[i])).collect()
    };

    let debt_to_equity: Vec<_> = (0..n).map(|i| div(liabilities[i], equity[i])).collect();

    let ebit = series(income, dict, Concept::OperatingIncome, n);
    let interest = series(income, dict, Concept::InterestExpense, n);
    let interest_coverage: Vec<_> = (0..n).map(|i| div(ebit[i], interest[i])).collect();

    table.push_row("Debt-to-Equity Ratio", debt_to_equity);
    table.push_row("Interest Coverage Ratio", interest_coverage);

    table
}
