//! Annual pro forma: income statement, balance sheet, cash flow statement.
use super::cash::MonthlyCashRecord;
use super::revenue::MonthlyRevenueRecord;
use crate::assumptions::{AssumptionSet, ConfigurationError, MONTHS_PER_YEAR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub adsense_revenue: f64,
    pub subscription_revenue: f64,
    pub total_revenue: f64,
    /// Recurring opex only; capex reaches the P&L through depreciation.
    pub operating_expenses: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    pub ebit: f64,
    pub tax: f64,
    pub net_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Year-end cash, floored at zero. An overdraft shows up as a liability.
    pub cash: f64,
    pub gross_ppe: f64,
    pub accumulated_depreciation: f64,
    pub net_ppe: f64,
    pub total_assets: f64,
    pub paid_in_capital: f64,
    pub retained_earnings: f64,
    pub total_equity: f64,
    pub total_liabilities: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    pub net_income: f64,
    pub depreciation: f64,
    pub operating_cash_flow: f64,
    pub investing_cash_flow: f64,
    pub financing_cash_flow: f64,
    pub net_change_in_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualStatement {
    /// 1-based year index.
    pub year: u32,
    pub income: IncomeStatement,
    pub balance_sheet: BalanceSheet,
    pub cash_flow: CashFlowStatement,
    /// Raw closing balance of the year's last month, may be negative.
    pub closing_cash: f64,
}

/// Rolls monthly records up into one statement per 12-month window.
///
/// Fails when the sequences differ in length or do not cover a whole, non-zero
/// number of years; a partial final year is never produced.
pub fn aggregate(
    revenue: &[MonthlyRevenueRecord],
    cash: &[MonthlyCashRecord],
    assumptions: &AssumptionSet,
) -> Result<Vec<AnnualStatement>, ConfigurationError> {
    if revenue.len() != cash.len() {
        return Err(ConfigurationError::LengthMismatch { revenue: revenue.len(), cash: cash.len() });
    }
    if revenue.is_empty() || revenue.len() % MONTHS_PER_YEAR != 0 {
        return Err(ConfigurationError::HorizonNotAnnual { months: revenue.len() });
    }

    let capex = assumptions.capex().gear_investment;
    let annual_depreciation = capex * assumptions.ratios().depreciation_rate;
    let tax_rate = assumptions.ratios().tax_rate;
    let paid_in_capital = assumptions.funding().starting_cash;

    let mut statements = Vec::with_capacity(revenue.len() / MONTHS_PER_YEAR);
    let mut accumulated_depreciation = 0.0;
    let mut retained_earnings = 0.0;

    for (idx, (rev_year, cash_year)) in revenue
        .chunks(MONTHS_PER_YEAR)
        .zip(cash.chunks(MONTHS_PER_YEAR))
        .enumerate()
    {
        let year = idx as u32 + 1;

        // 1. Income statement
        let adsense_revenue: f64 = rev_year.iter().map(|r| r.adsense_revenue).sum();
        let subscription_revenue: f64 = rev_year.iter().map(|r| r.subscription_revenue_net).sum();
        let total_revenue = adsense_revenue + subscription_revenue;
        let operating_expenses: f64 = cash_year.iter().map(|c| c.opex_outflow).sum();
        let ebitda = total_revenue - operating_expenses;

        // Straight line, capped at the remaining book value.
        let depreciation = annual_depreciation.min(capex - accumulated_depreciation).max(0.0);
        accumulated_depreciation += depreciation;

        let ebit = ebitda - depreciation;
        let tax = ebit.max(0.0) * tax_rate;
        let net_income = ebit - tax;
        retained_earnings += net_income;

        // 2. Balance sheet
        let closing_cash = cash_year.last().map_or(0.0, |c| c.closing_balance);
        let cash_asset = closing_cash.max(0.0);
        let net_ppe = capex - accumulated_depreciation;
        let total_assets = cash_asset + net_ppe;
        let total_equity = paid_in_capital + retained_earnings;

        // 3. Cash flow statement
        let operating_cash_flow = net_income + depreciation;
        let (investing_cash_flow, financing_cash_flow) =
            if year == 1 { (-capex, paid_in_capital) } else { (0.0, 0.0) };

        statements.push(AnnualStatement {
            year,
            income: IncomeStatement {
                adsense_revenue,
                subscription_revenue,
                total_revenue,
                operating_expenses,
                ebitda,
                depreciation,
                ebit,
                tax,
                net_income,
            },
            balance_sheet: BalanceSheet {
                cash: cash_asset,
                gross_ppe: capex,
                accumulated_depreciation,
                net_ppe,
                total_assets,
                paid_in_capital,
                retained_earnings,
                total_equity,
                total_liabilities: total_assets - total_equity,
            },
            cash_flow: CashFlowStatement {
                net_income,
                depreciation,
                operating_cash_flow,
                investing_cash_flow,
                financing_cash_flow,
                net_change_in_cash: operating_cash_flow + investing_cash_flow + financing_cash_flow,
            },
            closing_cash,
        });
    }

    log::debug!("Aggregated {} annual statements", statements.len());
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::AssumptionInputs;
    use crate::projection::cash::track_cash;
    use crate::projection::revenue::{project_revenue, project_revenue_for};
    use rstest::rstest;

    fn statements_for(assumptions: &AssumptionSet) -> Vec<AnnualStatement> {
        let revenue = project_revenue(assumptions);
        let cash = track_cash(&revenue, assumptions);
        aggregate(&revenue, &cash.records, assumptions).unwrap()
    }

    fn with_depreciation_rate(rate: f64) -> AssumptionSet {
        let mut inputs = AssumptionInputs::default();
        inputs.ratios.depreciation_rate = rate;
        AssumptionSet::new(inputs).unwrap()
    }

    #[test]
    fn test_revenue_sums_match_monthly_records() {
        let assumptions = AssumptionSet::default();
        let revenue = project_revenue(&assumptions);
        let statements = statements_for(&assumptions);
        assert_eq!(statements.len(), 3);

        for s in &statements {
            let window = &revenue[(s.year as usize - 1) * 12..s.year as usize * 12];
            let adsense: f64 = window.iter().map(|r| r.adsense_revenue).sum();
            let subs: f64 = window.iter().map(|r| r.subscription_revenue_net).sum();
            assert_eq!(s.income.adsense_revenue, adsense);
            assert_eq!(s.income.subscription_revenue, subs);
            assert_eq!(s.income.operating_expenses, 29_500.0 * 12.0);
            assert_eq!(s.income.ebitda, s.income.total_revenue - s.income.operating_expenses);
        }
    }

    #[rstest]
    #[case(0.20, [30_000.0, 30_000.0, 30_000.0])]
    #[case(0.40, [60_000.0, 60_000.0, 30_000.0])]
    #[case(1.00, [150_000.0, 0.0, 0.0])]
    #[case(0.00, [0.0, 0.0, 0.0])]
    fn test_depreciation_capped_at_cost(#[case] rate: f64, #[case] expected: [f64; 3]) {
        let statements = statements_for(&with_depreciation_rate(rate));
        for (s, want) in statements.iter().zip(expected) {
            assert!((s.income.depreciation - want).abs() < 1e-6, "year {}: {}", s.year, s.income.depreciation);
            assert!(s.balance_sheet.accumulated_depreciation <= 150_000.0 + 1e-6);
            assert!(s.balance_sheet.net_ppe >= -1e-6);
        }
    }

    #[test]
    fn test_tax_never_negative() {
        let statements = statements_for(&AssumptionSet::default());
        assert!(statements[0].income.ebit < 0.0);
        for s in &statements {
            assert!(s.income.tax >= 0.0);
            if s.income.ebit <= 0.0 {
                assert_eq!(s.income.tax, 0.0);
                assert_eq!(s.income.net_income, s.income.ebit);
            } else {
                assert!((s.income.tax - s.income.ebit * 0.25).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_balance_sheet_and_cash_flow_derivations() {
        let statements = statements_for(&AssumptionSet::default());
        let mut retained = 0.0;
        for s in &statements {
            retained += s.income.net_income;
            let bs = &s.balance_sheet;
            assert_eq!(bs.retained_earnings, retained);
            assert_eq!(bs.total_equity, 200_000.0 + retained);
            assert_eq!(bs.cash, s.closing_cash.max(0.0));
            assert!((bs.total_liabilities + bs.total_equity - bs.total_assets).abs() < 1e-6);

            let cf = &s.cash_flow;
            assert_eq!(cf.operating_cash_flow, s.income.net_income + s.income.depreciation);
            if s.year == 1 {
                assert_eq!(cf.investing_cash_flow, -150_000.0);
                assert_eq!(cf.financing_cash_flow, 200_000.0);
            } else {
                assert_eq!(cf.investing_cash_flow, 0.0);
                assert_eq!(cf.financing_cash_flow, 0.0);
            }
        }
    }

    #[test]
    fn test_partial_year_rejected() {
        let assumptions = AssumptionSet::default();
        let revenue = project_revenue_for(&assumptions, 30);
        let cash = track_cash(&revenue, &assumptions);
        assert_eq!(
            aggregate(&revenue, &cash.records, &assumptions),
            Err(ConfigurationError::HorizonNotAnnual { months: 30 })
        );
    }

    #[test]
    fn test_empty_and_mismatched_sequences_rejected() {
        let assumptions = AssumptionSet::default();
        assert_eq!(
            aggregate(&[], &[], &assumptions),
            Err(ConfigurationError::HorizonNotAnnual { months: 0 })
        );

        let revenue = project_revenue_for(&assumptions, 24);
        let cash = track_cash(&revenue[..12], &assumptions);
        assert_eq!(
            aggregate(&revenue, &cash.records, &assumptions),
            Err(ConfigurationError::LengthMismatch { revenue: 24, cash: 12 })
        );
    }
}
