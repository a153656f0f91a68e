//! Three-year financial projection for a subscription-and-ads video channel.
//!
//! Assumptions flow through a pure pipeline (revenue build, cash tracking,
//! annual statements), then into scenario comparison and presentation.
pub mod analysis;
pub mod assumptions;
pub mod display;
pub mod export;
pub mod projection;
pub mod scenario;

pub use analysis::{CashMetrics, ModelReport};
pub use assumptions::{AssumptionInputs, AssumptionSet, ConfigurationError, Override};
pub use export::ReportError;
pub use projection::{project, Projection};
pub use scenario::{run_scenario, run_scenarios, Scenario, ScenarioResult};
