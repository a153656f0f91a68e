//! The typed parameter groups and the validated `AssumptionSet` built from them.
use super::error::ConfigurationError;
use super::overrides::Override;
use super::validator::Validator;
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: usize = 12;
/// Upper bound on `projection_years`.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Audience and monetisation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueDrivers {
    pub initial_monthly_views: u64,
    /// Month-over-month view growth, compounded every month.
    pub mom_growth_rate: f64,
    /// AdSense revenue per thousand views.
    pub rpm: f64,
    pub membership_price: f64,
    /// Share of monthly views that convert into paying members.
    pub conversion_rate: f64,
}

impl Default for RevenueDrivers {
    fn default() -> Self {
        Self {
            initial_monthly_views: 5_000,
            mom_growth_rate: 0.15,
            rpm: 250.0,
            membership_price: 299.0,
            conversion_rate: 0.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingCosts {
    pub freelance_editor: f64,
    pub scriptwriter: f64,
    pub ai_software_suite: f64,
}

impl OperatingCosts {
    pub fn monthly_total(&self) -> f64 {
        self.freelance_editor + self.scriptwriter + self.ai_software_suite
    }
}

impl Default for OperatingCosts {
    fn default() -> Self {
        Self { freelance_editor: 15_000.0, scriptwriter: 10_000.0, ai_software_suite: 4_500.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalExpenditure {
    /// Spent once, in month 1.
    pub gear_investment: f64,
}

impl Default for CapitalExpenditure {
    fn default() -> Self {
        Self { gear_investment: 150_000.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingLogic {
    /// Months before the partner programme starts paying AdSense.
    pub ypp_activation_delay_months: u32,
    /// Minimum accumulated AdSense balance before a payout is released.
    pub adsense_payment_threshold: f64,
    pub projection_years: u32,
}

impl Default for TimingLogic {
    fn default() -> Self {
        Self {
            ypp_activation_delay_months: 6,
            adsense_payment_threshold: 8_600.0,
            projection_years: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRatios {
    /// Platform share withheld from membership revenue.
    pub platform_cut_rate: f64,
    /// Straight-line annual depreciation as a share of capex.
    pub depreciation_rate: f64,
    /// Applied to positive EBIT only.
    pub tax_rate: f64,
    /// Enterprise value as a multiple of final-year revenue.
    pub valuation_multiple: f64,
}

impl Default for FinancialRatios {
    fn default() -> Self {
        Self {
            platform_cut_rate: 0.30,
            depreciation_rate: 0.20,
            tax_rate: 0.25,
            valuation_multiple: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Funding {
    pub starting_cash: f64,
}

impl Default for Funding {
    fn default() -> Self {
        Self { starting_cash: 200_000.0 }
    }
}

/// The raw, unvalidated parameter groups. Missing groups or fields fall back
/// to the baseline model when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionInputs {
    pub revenue_drivers: RevenueDrivers,
    pub operating_costs: OperatingCosts,
    pub capex: CapitalExpenditure,
    pub timing: TimingLogic,
    pub ratios: FinancialRatios,
    pub funding: Funding,
}

/// A validated, immutable set of model assumptions.
///
/// The only way to obtain a different set is to build a new one, either from
/// fresh inputs or through [`AssumptionSet::with_overrides`], which copies the
/// inputs and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssumptionInputs", into = "AssumptionInputs")]
pub struct AssumptionSet {
    inputs: AssumptionInputs,
}

impl AssumptionSet {
    pub fn new(inputs: AssumptionInputs) -> Result<Self, ConfigurationError> {
        Validator::new(&inputs).validate()?;
        Ok(Self { inputs })
    }

    /// Returns a derived copy with each override applied in order.
    pub fn with_overrides(&self, overrides: &[Override]) -> Result<Self, ConfigurationError> {
        let mut inputs = self.inputs.clone();
        for o in overrides {
            o.apply_to(&mut inputs)?;
        }
        Self::new(inputs)
    }

    pub fn inputs(&self) -> &AssumptionInputs {
        &self.inputs
    }

    pub fn revenue_drivers(&self) -> &RevenueDrivers {
        &self.inputs.revenue_drivers
    }

    pub fn operating_costs(&self) -> &OperatingCosts {
        &self.inputs.operating_costs
    }

    pub fn capex(&self) -> &CapitalExpenditure {
        &self.inputs.capex
    }

    pub fn timing(&self) -> &TimingLogic {
        &self.inputs.timing
    }

    pub fn ratios(&self) -> &FinancialRatios {
        &self.inputs.ratios
    }

    pub fn funding(&self) -> &Funding {
        &self.inputs.funding
    }

    pub fn monthly_opex(&self) -> f64 {
        self.inputs.operating_costs.monthly_total()
    }

    pub fn horizon_months(&self) -> usize {
        self.inputs.timing.projection_years as usize * MONTHS_PER_YEAR
    }
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self { inputs: AssumptionInputs::default() }
    }
}

impl TryFrom<AssumptionInputs> for AssumptionSet {
    type Error = ConfigurationError;

    fn try_from(inputs: AssumptionInputs) -> Result<Self, Self::Error> {
        Self::new(inputs)
    }
}

impl From<AssumptionSet> for AssumptionInputs {
    fn from(set: AssumptionSet) -> Self {
        set.inputs
    }
}
