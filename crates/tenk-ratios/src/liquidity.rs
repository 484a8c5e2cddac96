//! Liquidity ratios.
//!
//! Computed per balance-sheet reporting period with matched-period values:
//! each period's numerator is divided by the same period's denominator.

use crate::arith::{add, div, sub};
use crate::concepts::{Concept, ConceptDictionary};
use crate::profitability::series;
use crate::table::RatioTable;
use tenk_extract::NormalizedStatement;

/// Compute the liquidity table.
///
/// Marketable securities default to zero when unresolved (many filers carry
/// none); every other unresolved concept propagates missing into the ratios
/// that depend on it.
pub fn compute_liquidity(
    balance: Option<&NormalizedStatement>,
    dict: &ConceptDictionary,
) -> RatioTable {
    let periods: Vec<String> = balance.map(|s| s.periods().to_vec()).unwrap_or_default();
    let n = periods.len();
    let mut table = RatioTable::new("Liquidity", periods);
    if n == 0 {
        return table;
    }

    let cash = series(balance, dict, Concept::Cash, n);
    let receivables = series(balance, dict, Concept::AccountsReceivable, n);
    let current_assets = series(balance, dict, Concept::CurrentAssets, n);
    let current_liabilities = series(balance, dict, Concept::CurrentLiabilities, n);

    let securities = if balance
        .and_then(|s| dict.resolve(s, Concept::MarketableSecurities))
        .is_some()
    {
        series(balance, dict, Concept::MarketableSecurities, n)
    } else {
        vec![Some(0.0); n]
    };

    let working_capital: Vec<_> = (0..n)
        .map(|i| sub(current_assets[i], current_liabilities[i]))
        .collect();
    let current_ratio: Vec<_> = (0..n)
        .map(|i| div(current_assets[i], current_liabilities[i]))
        .collect();
    let quick_ratio: Vec<_> = (0..n)
        .map(|i| {
            div(
                add(add(cash[i], securities[i]), receivables[i]),
                current_liabilities[i],
            )
        })
        .collect();
    let cash_ratio: Vec<_> = (0..n).map(|i| div(cash[i], current_liabilities[i])).collect();

    table.push_row("Working Capital", working_capital);
    table.push_row("Current Ratio", current_ratio);
    table.push_row("Quick Ratio", quick_ratio);
    table.push_row("Cash Ratio", cash_ratio);

    table
}
