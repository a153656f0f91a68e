//! Cash and profitability summary figures.
use crate::assumptions::{AssumptionSet, MONTHS_PER_YEAR};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};

/// Closing position at the end of the first year (or the last month, for a
/// shorter sequence).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub month: u32,
    pub closing_balance: f64,
    pub runway_months: Option<f64>,
}

/// External funding needed to keep the balance at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingGap {
    pub month: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashMetrics {
    pub starting_cash: f64,
    pub capex: f64,
    pub monthly_opex: f64,
    /// Mean monthly outflow over year one, capex included.
    pub year1_average_burn: f64,
    pub first_year_checkpoint: Option<Checkpoint>,
    /// `None` when the balance never drops below zero.
    pub financing_gap: Option<FinancingGap>,
    pub cumulative_revenue: f64,
    pub cumulative_net_income: f64,
    /// Final year-end cash as carried on the balance sheet.
    pub final_year_ending_cash: f64,
}

impl CashMetrics {
    pub fn analyze(projection: &Projection, assumptions: &AssumptionSet) -> Self {
        let records = &projection.cash.records;
        let first_year = &records[..MONTHS_PER_YEAR.min(records.len())];

        let year1_average_burn = if first_year.is_empty() {
            0.0
        } else {
            first_year.iter().map(|r| r.outflow).sum::<f64>() / first_year.len() as f64
        };

        let first_year_checkpoint = first_year.last().map(|r| Checkpoint {
            month: r.month,
            closing_balance: r.closing_balance,
            runway_months: r.runway_months,
        });

        let financing_gap = projection
            .cash
            .valley_of_death
            .filter(|v| v.closing_balance < 0.0)
            .map(|v| FinancingGap { month: v.month, amount: -v.closing_balance });
        if let Some(gap) = financing_gap {
            log::warn!("Financing gap of {:.2} at month {}", gap.amount, gap.month);
        }

        Self {
            starting_cash: assumptions.funding().starting_cash,
            capex: assumptions.capex().gear_investment,
            monthly_opex: assumptions.monthly_opex(),
            year1_average_burn,
            first_year_checkpoint,
            financing_gap,
            cumulative_revenue: projection.statements.iter().map(|s| s.income.total_revenue).sum(),
            cumulative_net_income: projection.statements.iter().map(|s| s.income.net_income).sum(),
            final_year_ending_cash: projection.final_year().map_or(0.0, |s| s.balance_sheet.cash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::AssumptionInputs;
    use crate::projection::project;

    #[test]
    fn test_baseline_metrics() {
        let assumptions = AssumptionSet::default();
        let projection = project(&assumptions).unwrap();
        let m = CashMetrics::analyze(&projection, &assumptions);

        assert_eq!(m.starting_cash, 200_000.0);
        assert_eq!(m.monthly_opex, 29_500.0);
        assert!((m.year1_average_burn - (29_500.0 * 12.0 + 150_000.0) / 12.0).abs() < 1e-9);

        let checkpoint = m.first_year_checkpoint.unwrap();
        assert_eq!(checkpoint.month, 12);
        assert_eq!(checkpoint.closing_balance, projection.cash.records[11].closing_balance);

        let valley = projection.cash.valley_of_death.unwrap();
        assert_eq!(m.financing_gap, Some(FinancingGap { month: valley.month, amount: -valley.closing_balance }));
    }

    #[test]
    fn test_no_gap_when_cash_stays_positive() {
        let mut inputs = AssumptionInputs::default();
        inputs.funding.starting_cash = 50_000_000.0;
        let assumptions = AssumptionSet::new(inputs).unwrap();
        let m = CashMetrics::analyze(&project(&assumptions).unwrap(), &assumptions);
        assert_eq!(m.financing_gap, None);
        assert!(m.final_year_ending_cash > 0.0);
    }
}
