//! Runs revenue, cash and statement stages in order.
use super::cash::{track_cash, CashFlowProjection};
use super::revenue::{project_revenue, MonthlyRevenueRecord};
use super::statements::{aggregate, AnnualStatement};
use crate::assumptions::{AssumptionSet, ConfigurationError};
use serde::{Deserialize, Serialize};

/// Everything one pipeline run produces. Plain data, no formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub revenue: Vec<MonthlyRevenueRecord>,
    pub cash: CashFlowProjection,
    pub statements: Vec<AnnualStatement>,
}

impl Projection {
    pub fn final_year(&self) -> Option<&AnnualStatement> {
        self.statements.last()
    }
}

/// Projects the full horizon of `assumptions`.
pub fn project(assumptions: &AssumptionSet) -> Result<Projection, ConfigurationError> {
    let revenue = project_revenue(assumptions);
    let cash = track_cash(&revenue, assumptions);
    let statements = aggregate(&revenue, &cash.records, assumptions)?;
    Ok(Projection { revenue, cash, statements })
}
