//! Combined ratio report.

use crate::concepts::ConceptDictionary;
use crate::liquidity::compute_liquidity;
use crate::profitability::compute_profitability;
use crate::solvency::compute_solvency;
use crate::table::RatioTable;
use serde::Serialize;
use tenk_extract::NormalizedStatement;
use tracing::debug;

/// The three ratio families computed from one filing.
#[derive(Debug, Clone, Serialize)]
pub struct RatioReport {
    /// Profitability ratios (income-statement periods)
    pub profitability: RatioTable,
    /// Liquidity ratios (balance-sheet periods)
    pub liquidity: RatioTable,
    /// Solvency ratios (balance-sheet periods)
    pub solvency: RatioTable,
}

impl RatioReport {
    /// Compute all ratio tables from whichever statements are available.
    ///
    /// Any statement may be absent; the ratios depending on it simply
    /// report missing values.
    pub fn compute(
        balance: Option<&NormalizedStatement>,
        income: Option<&NormalizedStatement>,
        cashflow: Option<&NormalizedStatement>,
        dict: &ConceptDictionary,
    ) -> Self {
        let report = Self {
            profitability: compute_profitability(income, cashflow, balance, dict),
            liquidity: compute_liquidity(balance, dict),
            solvency: compute_solvency(balance, income, dict),
        };
        debug!(
            profitability_periods = report.profitability.periods().len(),
            liquidity_periods = report.liquidity.periods().len(),
            "computed ratio report"
        );
        report
    }

    /// The three tables, in report order.
    pub fn tables(&self) -> [&RatioTable; 3] {
        [&self.profitability, &self.liquidity, &self.solvency]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::statement;

    #[test]
    fn test_report_from_partial_statements() {
        let income = statement(
            &["2023"],
            &[
                ("Net sales", &[Some(100.0)]),
                ("Net income", &[Some(20.0)]),
            ],
        );
        let dict = ConceptDictionary::default();
        let report = RatioReport::compute(None, Some(&income), None, &dict);

        assert_eq!(report.profitability.get("Net Income", 0), Some(20.0));
        // No balance sheet: liquidity and solvency have no periods at all
        assert!(report.liquidity.periods().is_empty());
        assert!(report.solvency.periods().is_empty());
    }

    #[test]
    fn test_report_with_no_statements_is_empty() {
        let dict = ConceptDictionary::default();
        let report = RatioReport::compute(None, None, None, &dict);
        for table in report.tables() {
            assert!(table.is_all_missing());
        }
    }
}
