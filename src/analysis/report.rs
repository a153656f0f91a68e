//! Bundles everything one model run produces for the renderers.
use super::metrics::CashMetrics;
use crate::assumptions::{AssumptionSet, ConfigurationError};
use crate::projection::{project, Projection};
use crate::scenario::{run_scenarios_against, Scenario, ScenarioResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub generated_at: DateTime<Utc>,
    pub assumptions: AssumptionSet,
    pub projection: Projection,
    pub metrics: CashMetrics,
    pub scenarios: Vec<ScenarioResult>,
}

impl ModelReport {
    pub fn build(assumptions: AssumptionSet, scenarios: &[Scenario]) -> Result<Self, ConfigurationError> {
        log::info!(
            "Projecting {} months across {} scenario(s)",
            assumptions.horizon_months(),
            scenarios.len()
        );
        let projection = project(&assumptions)?;
        let metrics = CashMetrics::analyze(&projection, &assumptions);
        let scenarios = run_scenarios_against(&assumptions, &projection, scenarios)?;

        Ok(Self { generated_at: Utc::now(), assumptions, projection, metrics, scenarios })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_runs_every_stage() {
        let report = ModelReport::build(AssumptionSet::default(), &[Scenario::founder_pain()]).unwrap();
        assert_eq!(report.projection.statements.len(), 3);
        assert_eq!(report.scenarios.len(), 1);
        assert_eq!(report.scenarios[0].base, report.projection.statements);
        assert_eq!(report.metrics.starting_cash, 200_000.0);
    }
}
