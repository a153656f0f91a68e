//! Model configuration: typed, validated, immutable parameter sets.
pub mod error;
pub mod overrides;
pub mod types;
pub mod validator;

pub use error::ConfigurationError;
pub use overrides::{Adjustment, Override, Parameter};
pub use types::{
    AssumptionInputs, AssumptionSet, CapitalExpenditure, FinancialRatios, Funding, OperatingCosts,
    RevenueDrivers, TimingLogic, MAX_PROJECTION_YEARS, MONTHS_PER_YEAR,
};
pub use validator::Validator;
