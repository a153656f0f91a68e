//! Scenario analysis on copies of the base assumptions.
pub mod runner;

pub use runner::{
    run_scenario, run_scenarios, run_scenarios_against, Scenario, ScenarioResult, Valuation,
};
