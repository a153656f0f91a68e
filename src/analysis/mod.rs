//! Summary figures derived from a finished projection.
pub mod metrics;
pub mod report;

pub use metrics::{CashMetrics, Checkpoint, FinancingGap};
pub use report::ModelReport;
