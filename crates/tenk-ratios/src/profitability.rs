//! Profitability ratios.
//!
//! Computed per income-statement reporting period (typically three, most
//! recent first). Return on Assets and Return on Equity additionally need
//! the two most recent balance-sheet periods for the averaged denominator,
//! so they are only reported for the most recent period.

use crate::arith::{add, avg, div, sub};
use crate::concepts::{Concept, ConceptDictionary};
use crate::table::RatioTable;
use tenk_extract::NormalizedStatement;

/// Resolve a concept series against an optional statement, sized to `n`.
pub(crate) fn series(
    statement: Option<&NormalizedStatement>,
    dict: &ConceptDictionary,
    concept: Concept,
    n: usize,
) -> Vec<Option<f64>> {
    let mut values = statement
        .map(|s| dict.series(s, concept))
        .unwrap_or_default();
    values.resize(n, None);
    values
}

/// Amortization series: zero when the depreciation line already includes
/// amortization (a combined "Depreciation and amortization" account), the
/// resolved series when a separate line exists, and zero otherwise.
fn amortization_series(
    cashflow: Option<&NormalizedStatement>,
    dict: &ConceptDictionary,
    n: usize,
) -> Vec<Option<f64>> {
    let combined = cashflow
        .and_then(|s| dict.resolve(s, Concept::Depreciation))
        .is_some_and(|account| {
            dict.candidates(Concept::Amortization)
                .iter()
                .any(|key| account.label.contains(key.as_str()))
        });

    if !combined
        && let Some(statement) = cashflow
        && dict.resolve(statement, Concept::Amortization).is_some()
    {
        return series(cashflow, dict, Concept::Amortization, n);
    }
    vec![Some(0.0); n]
}

/// Compute the profitability table.
///
/// An absent income statement yields an empty table; individual unresolved
/// concepts degrade only the ratios that depend on them.
pub fn compute_profitability(
    income: Option<&NormalizedStatement>,
    cashflow: Option<&NormalizedStatement>,
    balance: Option<&NormalizedStatement>,
    dict: &ConceptDictionary,
) -> RatioTable {
    let periods: Vec<String> = income.map(|s| s.periods().to_vec()).unwrap_or_default();
    let n = periods.len();
    let mut table = RatioTable::new("Profitability", periods);
    if n == 0 {
        return table;
    }

    let revenue = series(income, dict, Concept::Revenue, n);
    let cogs = series(income, dict, Concept::CostOfGoodsSold, n);
    let ebit = series(income, dict, Concept::OperatingIncome, n);
    let net_income = series(income, dict, Concept::NetIncome, n);
    let tax = series(income, dict, Concept::TaxExpense, n);
    let depreciation = series(cashflow, dict, Concept::Depreciation, n);
    let amortization = amortization_series(cashflow, dict, n);

    let gross_profit: Vec<_> = (0..n).map(|i| sub(revenue[i], cogs[i])).collect();
    let gross_margin: Vec<_> = (0..n).map(|i| div(gross_profit[i], revenue[i])).collect();
    let ebitda: Vec<_> = (0..n)
        .map(|i| add(add(ebit[i], depreciation[i]), amortization[i]))
        .collect();
    let operating_margin: Vec<_> = (0..n).map(|i| div(ebit[i], revenue[i])).collect();
    let nopat: Vec<_> = (0..n).map(|i| sub(ebit[i], tax[i])).collect();
    let profit_margin: Vec<_> = (0..n).map(|i| div(net_income[i], revenue[i])).collect();

    // Averaged balance-sheet denominators exist only for the latest period
    let assets = series(balance, dict, Concept::TotalAssets, 2);
    let equity = series(balance, dict, Concept::TotalEquity, 2);
    let mut roa = vec![None; n];
    let mut roe = vec![None; n];
    roa[0] = div(net_income[0], avg(assets[0], assets[1]));
    roe[0] = div(net_income[0], avg(equity[0], equity[1]));

    table.push_row("Revenue", revenue);
    table.push_row("Gross Profit", gross_profit);
    table.push_row("Gross Margin", gross_margin);
    table.push_row("EBITDA", ebitda);
    table.push_row("EBIT", ebit);
    table.push_row("Operating Margin", operating_margin);
    table.push_row("NOPAT", nopat);
    table.push_row("Net Income", net_income);
    table.push_row("Profit Margin", profit_margin);
    table.push_row("Return on Assets", roa);
    table.push_row("Return on Equity", roe);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::statement;
    use approx::assert_relative_eq;

    #[test]
    fn test_gross_profit_and_margin_scenario() {
        let income = statement(
            &["2023", "2022", "2021"],
            &[
                ("Net sales", &[Some(100.0), Some(90.0), Some(80.0)]),
                ("Cost of sales", &[Some(60.0), Some(54.0), Some(48.0)]),
            ],
        );
        let dict = ConceptDictionary::default();
        let table = compute_profitability(Some(&income), None, None, &dict);

        for (i, expected) in [40.0, 36.0, 32.0].into_iter().enumerate() {
            assert_relative_eq!(table.get("Gross Profit", i).unwrap(), expected);
            assert_relative_eq!(table.get("Gross Margin", i).unwrap(), 0.40);
        }
    }

    #[test]
    fn test_return_on_assets_scenario() {
        let income = statement(
            &["2023", "2022", "2021"],
            &[("Net income", &[Some(20.0), Some(18.0), Some(16.0)])],
        );
        let balance = statement(
            &["2023", "2022"],
            &[("Total assets", &[Some(200.0), Some(180.0)])],
        );
        let dict = ConceptDictionary::default();
        let table = compute_profitability(Some(&income), None, Some(&balance), &dict);

        assert_relative_eq!(
            table.get("Return on Assets", 0).unwrap(),
            0.1053,
            epsilon = 1e-4
        );
        // Older periods have no averaged denominator
        assert_eq!(table.get("Return on Assets", 1), None);
    }

    #[test]
    fn test_ebitda_with_combined_depreciation_line() {
        let income = statement(
            &["2023"],
            &[("Income from operations", &[Some(50.0)])],
        );
        let cashflow = statement(
            &["2023"],
            &[("Depreciation and amortization", &[Some(10.0)])],
        );
        let dict = ConceptDictionary::default();
        let table = compute_profitability(Some(&income), Some(&cashflow), None, &dict);

        // Amortization defaults to zero: it is already inside the line
        assert_relative_eq!(table.get("EBITDA", 0).unwrap(), 60.0);
    }

    #[test]
    fn test_ebitda_with_separate_amortization_line() {
        let income = statement(&["2023"], &[("Operating income", &[Some(50.0)])]);
        let cashflow = statement(
            &["2023"],
            &[
                ("Depreciation", &[Some(10.0)]),
                ("Amortization of intangibles", &[Some(4.0)]),
            ],
        );
        let dict = ConceptDictionary::default();
        let table = compute_profitability(Some(&income), Some(&cashflow), None, &dict);
        assert_relative_eq!(table.get("EBITDA", 0).unwrap(), 64.0);
    }

    #[test]
    fn test_unresolved_revenue_degrades_only_dependent_ratios() {
        let income = statement(
            &["2023"],
            &[
                ("Mystery top line", &[Some(100.0)]),
                ("Net income", &[Some(20.0)]),
                ("Operating income", &[Some(30.0)]),
            ],
        );
        let dict = ConceptDictionary::default();
        let table = compute_profitability(Some(&income), None, None, &dict);

        assert_eq!(table.get("Revenue", 0), None);
        assert_eq!(table.get("Gross Margin", 0), None);
        assert_eq!(table.get("Profit Margin", 0), None);
        // EBIT does not depend on revenue
        assert_eq!(table.get("EBIT", 0), Some(30.0));
        assert_eq!(table.get("Net Income", 0), Some(20.0));
    }

    #[test]
    fn test_missing_income_statement_yields_empty_table() {
        let dict = ConceptDictionary::default();
        let table = compute_profitability(None, None, None, &dict);
        assert!(table.periods().is_empty());
        assert!(table.is_all_missing());
    }
}
