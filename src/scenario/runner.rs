//! Base-versus-scenario comparison on derived assumption copies.
use crate::assumptions::{AssumptionSet, ConfigurationError, Override, Parameter};
use crate::projection::{project, AnnualStatement, Projection};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A named set of overrides applied on top of the base assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub overrides: Vec<Override>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, overrides: Vec<Override>) -> Self {
        Self { name: name.into(), overrides }
    }

    /// Membership conversion drops by half.
    pub fn founder_pain() -> Self {
        Self::new("Founder pain", vec![Override::scale(Parameter::ConversionRate, 0.5)])
    }

    /// A scenario named after its single override.
    pub fn from_override(o: Override) -> Self {
        Self::new(o.to_string(), vec![o])
    }
}

/// Revenue-multiple valuation on the final projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub final_year_revenue: f64,
    pub multiple: f64,
    pub enterprise_value: f64,
}

impl Valuation {
    pub fn of(projection: &Projection, assumptions: &AssumptionSet) -> Self {
        let final_year_revenue = projection.final_year().map_or(0.0, |s| s.income.total_revenue);
        let multiple = assumptions.ratios().valuation_multiple;
        Self { final_year_revenue, multiple, enterprise_value: final_year_revenue * multiple }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub base: Vec<AnnualStatement>,
    pub downside: Vec<AnnualStatement>,
    pub base_valuation: Valuation,
    pub downside_valuation: Valuation,
    /// Downside minus base final-year revenue.
    pub revenue_delta: f64,
    /// `None` when the base revenue is zero.
    pub revenue_delta_pct: Option<f64>,
    pub valuation_delta: f64,
    pub valuation_delta_pct: Option<f64>,
}

/// Projects the base and the scenario copy and diffs them.
pub fn run_scenario(
    assumptions: &AssumptionSet,
    scenario: &Scenario,
) -> Result<ScenarioResult, ConfigurationError> {
    let base = project(assumptions)?;
    compare(assumptions, &base, scenario)
}

/// Evaluates several scenarios against one base projection.
///
/// Scenarios run on rayon's pool. Every run is a pure function of its inputs,
/// so the output equals calling [`run_scenario`] for each one, in input order.
pub fn run_scenarios(
    assumptions: &AssumptionSet,
    scenarios: &[Scenario],
) -> Result<Vec<ScenarioResult>, ConfigurationError> {
    let base = project(assumptions)?;
    run_scenarios_against(assumptions, &base, scenarios)
}

/// Like [`run_scenarios`], reusing a base projection the caller already holds.
/// `base` must be the projection of `assumptions`.
pub fn run_scenarios_against(
    assumptions: &AssumptionSet,
    base: &Projection,
    scenarios: &[Scenario],
) -> Result<Vec<ScenarioResult>, ConfigurationError> {
    scenarios.par_iter().map(|s| compare(assumptions, base, s)).collect()
}

fn compare(
    assumptions: &AssumptionSet,
    base: &Projection,
    scenario: &Scenario,
) -> Result<ScenarioResult, ConfigurationError> {
    let derived = assumptions.with_overrides(&scenario.overrides)?;
    let downside = project(&derived)?;

    let base_valuation = Valuation::of(base, assumptions);
    let downside_valuation = Valuation::of(&downside, &derived);

    let revenue_delta = downside_valuation.final_year_revenue - base_valuation.final_year_revenue;
    let valuation_delta = downside_valuation.enterprise_value - base_valuation.enterprise_value;

    log::info!(
        "Scenario '{}': final-year revenue {:+.2}, valuation {:+.2}",
        scenario.name,
        revenue_delta,
        valuation_delta
    );

    Ok(ScenarioResult {
        scenario: scenario.clone(),
        base: base.statements.clone(),
        downside: downside.statements,
        base_valuation,
        downside_valuation,
        revenue_delta,
        revenue_delta_pct: percent_of(revenue_delta, base_valuation.final_year_revenue),
        valuation_delta,
        valuation_delta_pct: percent_of(valuation_delta, base_valuation.enterprise_value),
    })
}

fn percent_of(delta: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        None
    } else {
        Some(delta / base * 100.0)
    }
}
