//! JSON input (assumption files) and output (full report).
use super::error::ReportError;
use crate::analysis::ModelReport;
use crate::assumptions::{AssumptionInputs, AssumptionSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Loads an assumption file. Omitted fields take the baseline values; the
/// result is validated like any other set.
pub fn load_assumptions(path: &Path) -> Result<AssumptionSet, ReportError> {
    let text = fs::read_to_string(path)?;
    let inputs: AssumptionInputs = serde_json::from_str(&text)?;
    let set = AssumptionSet::new(inputs)?;
    log::info!("Loaded assumptions from {}", path.display());
    Ok(set)
}

pub fn write_report(report: &ModelReport, path: &Path) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    log::info!("Wrote JSON report to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::ConfigurationError;
    use crate::scenario::Scenario;

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assumptions.json");
        fs::write(&path, r#"{ "revenue_drivers": { "conversion_rate": 0.004 } }"#).unwrap();

        let set = load_assumptions(&path).unwrap();
        assert_eq!(set.revenue_drivers().conversion_rate, 0.004);
        assert_eq!(set.monthly_opex(), 29_500.0);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "operating_costs": { "scriptwriter": -10 } }"#).unwrap();

        match load_assumptions(&path) {
            Err(ReportError::Configuration(e)) => assert!(e.to_string().contains("scriptwriter")),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_unbounded_horizon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.json");
        fs::write(&path, r#"{ "timing": { "projection_years": 4294967295 } }"#).unwrap();

        match load_assumptions(&path) {
            Err(ReportError::Configuration(ConfigurationError::HorizonTooLong { years, .. })) => {
                assert_eq!(years, u32::MAX)
            }
            other => panic!("Expected HorizonTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_assumptions(&dir.path().join("none.json")), Err(ReportError::Io(_))));
    }

    #[test]
    fn test_report_written_and_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = ModelReport::build(AssumptionSet::default(), &[Scenario::founder_pain()]).unwrap();
        write_report(&report, &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["projection"]["revenue"].as_array().unwrap().len(), 36);
        assert_eq!(value["projection"]["statements"].as_array().unwrap().len(), 3);
        assert_eq!(value["scenarios"][0]["scenario"]["name"], "Founder pain");
        assert_eq!(value["assumptions"]["funding"]["starting_cash"], 200_000.0);

        let back: ModelReport = serde_json::from_value(value).unwrap();
        assert_eq!(back.projection, report.projection);
    }
}
