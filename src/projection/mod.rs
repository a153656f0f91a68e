//! The projection engine: pure transforms from assumptions to monthly and
//! annual records.
pub mod cash;
pub mod pipeline;
pub mod revenue;
pub mod statements;

pub use cash::{
    track_cash, valley_of_death, valley_of_death_within, CashFlowProjection, MonthlyCashRecord, ValleyOfDeath,
};
pub use pipeline::{project, Projection};
pub use revenue::{project_revenue, project_revenue_for, MonthlyRevenueRecord};
pub use statements::{aggregate, AnnualStatement, BalanceSheet, CashFlowStatement, IncomeStatement};
