//! Monthly cash budget: payout buffering, burn and runway.
use super::revenue::MonthlyRevenueRecord;
use crate::assumptions::AssumptionSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashRecord {
    pub month: u32,
    pub opening_balance: f64,
    /// Net membership revenue, received in the month it is earned.
    pub subscription_inflow: f64,
    /// AdSense paid out this month (zero or the whole buffer).
    pub adsense_released: f64,
    pub inflow: f64,
    pub opex_outflow: f64,
    pub capex_outflow: f64,
    pub outflow: f64,
    pub net_cash_flow: f64,
    pub closing_balance: f64,
    /// AdSense earned but not yet paid, after this month's payout decision.
    pub adsense_buffer: f64,
    /// Months of opex the closing balance covers. `None` when opex is zero,
    /// i.e. the runway is unbounded.
    pub runway_months: Option<f64>,
}

/// The month with the lowest closing balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValleyOfDeath {
    pub month: u32,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub records: Vec<MonthlyCashRecord>,
    /// `None` only for an empty revenue sequence.
    pub valley_of_death: Option<ValleyOfDeath>,
}

/// Runs the cash budget over the revenue records, one cash record per month.
pub fn track_cash(
    revenue: &[MonthlyRevenueRecord],
    assumptions: &AssumptionSet,
) -> CashFlowProjection {
    let monthly_opex = assumptions.monthly_opex();
    let capex = assumptions.capex().gear_investment;
    let threshold = assumptions.timing().adsense_payment_threshold;

    let mut records = Vec::with_capacity(revenue.len());
    let mut opening_balance = assumptions.funding().starting_cash;
    let mut adsense_buffer = 0.0;

    for row in revenue {
        // All-or-nothing payout: the buffer is released only once it has
        // reached the threshold, and never flushed at the end of the horizon.
        adsense_buffer += row.adsense_revenue;
        let adsense_released = if adsense_buffer >= threshold && adsense_buffer > 0.0 {
            std::mem::take(&mut adsense_buffer)
        } else {
            0.0
        };

        let inflow = adsense_released + row.subscription_revenue_net;
        let capex_outflow = if row.month == 1 { capex } else { 0.0 };
        let outflow = monthly_opex + capex_outflow;
        let net_cash_flow = inflow - outflow;
        let closing_balance = opening_balance + inflow - outflow;

        records.push(MonthlyCashRecord {
            month: row.month,
            opening_balance,
            subscription_inflow: row.subscription_revenue_net,
            adsense_released,
            inflow,
            opex_outflow: monthly_opex,
            capex_outflow,
            outflow,
            net_cash_flow,
            closing_balance,
            adsense_buffer,
            runway_months: runway(closing_balance, monthly_opex),
        });

        opening_balance = closing_balance;
    }

    let valley_of_death = valley_of_death(&records);
    if let Some(valley) = valley_of_death {
        if valley.closing_balance < 0.0 {
            log::debug!(
                "Cash goes negative: lowest balance {:.2} at month {}",
                valley.closing_balance,
                valley.month
            );
        }
    }
    log::debug!("Tracked cash for {} months", records.len());

    CashFlowProjection { records, valley_of_death }
}

fn runway(closing_balance: f64, monthly_opex: f64) -> Option<f64> {
    if monthly_opex > 0.0 {
        Some(closing_balance / monthly_opex)
    } else {
        None
    }
}

/// Finds the minimum closing balance; the earliest month wins a tie.
pub fn valley_of_death(records: &[MonthlyCashRecord]) -> Option<ValleyOfDeath> {
    records.iter().fold(None, |lowest: Option<ValleyOfDeath>, r| match lowest {
        Some(v) if v.closing_balance <= r.closing_balance => Some(v),
        _ => Some(ValleyOfDeath { month: r.month, closing_balance: r.closing_balance }),
    })
}

/// Same as [`valley_of_death`], restricted to the first `months` records.
pub fn valley_of_death_within(
    records: &[MonthlyCashRecord],
    months: usize,
) -> Option<ValleyOfDeath> {
    valley_of_death(&records[..months.min(records.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{AssumptionInputs, OperatingCosts};
    use crate::projection::revenue::project_revenue;

    fn run(assumptions: &AssumptionSet) -> CashFlowProjection {
        track_cash(&project_revenue(assumptions), assumptions)
    }

    fn record(month: u32, closing_balance: f64) -> MonthlyCashRecord {
        MonthlyCashRecord {
            month,
            opening_balance: 0.0,
            subscription_inflow: 0.0,
            adsense_released: 0.0,
            inflow: 0.0,
            opex_outflow: 0.0,
            capex_outflow: 0.0,
            outflow: 0.0,
            net_cash_flow: 0.0,
            closing_balance,
            adsense_buffer: 0.0,
            runway_months: None,
        }
    }

    #[test]
    fn test_balances_are_continuous() {
        let cash = run(&AssumptionSet::default());
        assert_eq!(cash.records.len(), 36);
        assert_eq!(cash.records[0].opening_balance, 200_000.0);

        for r in &cash.records {
            assert_eq!(r.closing_balance, r.opening_balance + r.inflow - r.outflow);
        }
        for pair in cash.records.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        }
    }

    #[test]
    fn test_capex_only_in_first_month() {
        let cash = run(&AssumptionSet::default());
        assert_eq!(cash.records[0].outflow, 29_500.0 + 150_000.0);
        assert!(cash.records[1..].iter().all(|r| r.capex_outflow == 0.0 && r.outflow == 29_500.0));
    }

    #[test]
    fn test_adsense_buffered_until_threshold() {
        let assumptions = AssumptionSet::default();
        let revenue = project_revenue(&assumptions);
        let cash = track_cash(&revenue, &assumptions);

        // Baseline: months 7 and 8 accrue below the 8,600 threshold, month 9 crosses it.
        assert_eq!(cash.records[6].adsense_released, 0.0);
        assert_eq!(cash.records[7].adsense_released, 0.0);
        assert!(cash.records[7].adsense_buffer > 0.0);
        assert_eq!(cash.records[6].inflow, revenue[6].subscription_revenue_net);

        let owed: f64 = revenue[6..9].iter().map(|r| r.adsense_revenue).sum();
        assert!((cash.records[8].adsense_released - owed).abs() < 1e-9);
        assert_eq!(cash.records[8].adsense_buffer, 0.0);
        assert_eq!(cash.records[8].inflow, cash.records[8].adsense_released + revenue[8].subscription_revenue_net);
    }

    #[test]
    fn test_every_release_pays_whole_accumulated_buffer() {
        let mut inputs = AssumptionInputs::default();
        inputs.timing.adsense_payment_threshold = 40_000.0;
        let assumptions = AssumptionSet::new(inputs).unwrap();
        let revenue = project_revenue(&assumptions);
        let cash = track_cash(&revenue, &assumptions);

        let mut accrued = 0.0;
        for (rev, r) in revenue.iter().zip(&cash.records) {
            accrued += rev.adsense_revenue;
            if r.adsense_released > 0.0 {
                assert!(r.adsense_released >= 40_000.0);
                assert!((r.adsense_released - accrued).abs() < 1e-6, "month {}", r.month);
                assert_eq!(r.adsense_buffer, 0.0);
                accrued = 0.0;
            } else {
                assert!((r.adsense_buffer - accrued).abs() < 1e-6, "month {}", r.month);
                assert!(r.adsense_buffer < 40_000.0);
            }
        }
    }

    #[test]
    fn test_unreached_threshold_never_flushes() {
        let mut inputs = AssumptionInputs::default();
        inputs.timing.adsense_payment_threshold = 1e12;
        let assumptions = AssumptionSet::new(inputs).unwrap();
        let cash = run(&assumptions);
        assert!(cash.records.iter().all(|r| r.adsense_released == 0.0));
        assert!(cash.records.last().unwrap().adsense_buffer > 0.0);
    }

    #[test]
    fn test_runway_guards_zero_opex() {
        let mut inputs = AssumptionInputs::default();
        inputs.operating_costs = OperatingCosts { freelance_editor: 0.0, scriptwriter: 0.0, ai_software_suite: 0.0 };
        let cash = run(&AssumptionSet::new(inputs).unwrap());
        assert!(cash.records.iter().all(|r| r.runway_months.is_none()));

        let cash = run(&AssumptionSet::default());
        let r = &cash.records[11];
        assert_eq!(r.runway_months, Some(r.closing_balance / 29_500.0));
    }

    #[test]
    fn test_valley_matches_true_minimum() {
        let cash = run(&AssumptionSet::default());
        let valley = cash.valley_of_death.unwrap();
        let min = cash.records.iter().map(|r| r.closing_balance).fold(f64::INFINITY, f64::min);
        assert_eq!(valley.closing_balance, min);
        assert_eq!(cash.records[valley.month as usize - 1].closing_balance, min);
        assert!(valley.closing_balance < 0.0);
    }

    #[test]
    fn test_valley_prefers_earliest_tie() {
        let records = vec![record(1, 10.0), record(2, -5.0), record(3, 3.0), record(4, -5.0)];
        assert_eq!(valley_of_death(&records), Some(ValleyOfDeath { month: 2, closing_balance: -5.0 }));
    }

    #[test]
    fn test_valley_within_window() {
        let records = vec![record(1, 10.0), record(2, 4.0), record(3, -1.0)];
        assert_eq!(valley_of_death_within(&records, 2).unwrap().month, 2);
        assert_eq!(valley_of_death_within(&records, 24).unwrap().month, 3);
        assert_eq!(valley_of_death(&[]), None);
    }
}
