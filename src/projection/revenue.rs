//! Monthly audience and revenue build.
use crate::assumptions::AssumptionSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueRecord {
    /// 1-based month index.
    pub month: u32,
    pub views: u64,
    /// Accrued AdSense earnings; zero until the partner programme activates.
    pub adsense_revenue: f64,
    pub subscriber_count: u64,
    pub subscription_revenue_gross: f64,
    /// Membership revenue after the platform cut.
    pub subscription_revenue_net: f64,
    pub total_revenue: f64,
}

/// Projects revenue over the configured horizon.
pub fn project_revenue(assumptions: &AssumptionSet) -> Vec<MonthlyRevenueRecord> {
    project_revenue_for(assumptions, assumptions.horizon_months())
}

/// Projects revenue for an explicit number of months.
///
/// Views are rounded every month before growing again, so the series is the
/// integer view count an analytics dashboard would report, not the closed
/// form `initial * (1 + g)^(m-1)`.
pub fn project_revenue_for(
    assumptions: &AssumptionSet,
    months: usize,
) -> Vec<MonthlyRevenueRecord> {
    let drivers = assumptions.revenue_drivers();
    let ypp_delay = assumptions.timing().ypp_activation_delay_months;
    let keep_share = 1.0 - assumptions.ratios().platform_cut_rate;

    let mut records = Vec::with_capacity(months);
    let mut views = drivers.initial_monthly_views;

    for idx in 0..months {
        let month = idx as u32 + 1;
        if idx > 0 {
            views = (views as f64 * (1.0 + drivers.mom_growth_rate)).round() as u64;
        }

        let adsense_revenue = if month <= ypp_delay {
            0.0
        } else {
            views as f64 / 1000.0 * drivers.rpm
        };

        let subscriber_count = (views as f64 * drivers.conversion_rate).round() as u64;
        let subscription_revenue_gross = subscriber_count as f64 * drivers.membership_price;
        let subscription_revenue_net = subscription_revenue_gross * keep_share;

        records.push(MonthlyRevenueRecord {
            month,
            views,
            adsense_revenue,
            subscriber_count,
            subscription_revenue_gross,
            subscription_revenue_net,
            total_revenue: adsense_revenue + subscription_revenue_net,
        });
    }

    log::debug!("Projected revenue for {} months", records.len());
    records
}
