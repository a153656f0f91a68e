//! rextea CLI - runs the projection model and writes the report files.

use anyhow::{Context, Result};
use clap::Parser;
use rextea_model::display::render_report;
use rextea_model::export::{load_assumptions, write_charts, write_report, write_workbook};
use rextea_model::{AssumptionSet, ModelReport, Override, Scenario};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rextea")]
#[command(about = "Three-year financial model for a tech YouTube startup")]
struct Cli {
    /// JSON assumption file; omitted fields keep their baseline values
    #[arg(long, env = "REXTEA_ASSUMPTIONS")]
    assumptions: Option<PathBuf>,

    /// Directory receiving the exported files
    #[arg(long, env = "REXTEA_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Workbook file name
    #[arg(long, env = "REXTEA_WORKBOOK", default_value = "Model_Rextea.xlsx")]
    workbook: String,

    /// Chart file name
    #[arg(long, env = "REXTEA_CHART", default_value = "Financial_Analysis_Charts.svg")]
    chart: String,

    /// Also write the full report as JSON under this file name
    #[arg(long, env = "REXTEA_JSON")]
    json: Option<String>,

    /// Scenario override, `name*factor` or `name=value`; one scenario per flag
    #[arg(long = "scenario", env = "REXTEA_SCENARIOS", value_delimiter = ',')]
    scenarios: Vec<Override>,

    /// Print to the console only
    #[arg(long, env = "REXTEA_NO_EXPORT")]
    no_export: bool,

    /// Print the baseline assumptions as JSON and exit
    #[arg(long)]
    print_default_assumptions: bool,
}

/// One scenario per override; founder pain when none are given.
fn scenarios_from(overrides: Vec<Override>) -> Vec<Scenario> {
    if overrides.is_empty() {
        vec![Scenario::founder_pain()]
    } else {
        overrides.into_iter().map(Scenario::from_override).collect()
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_default_assumptions {
        let text = serde_json::to_string_pretty(&AssumptionSet::default())
            .context("Failed to serialize default assumptions")?;
        println!("{}", text);
        return Ok(());
    }

    let assumptions = match &cli.assumptions {
        Some(path) => load_assumptions(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display()))?,
        None => AssumptionSet::default(),
    };

    let scenarios = scenarios_from(cli.scenarios);
    let report = ModelReport::build(assumptions, &scenarios).context("Failed to run the projection")?;
    println!("{}", render_report(&report));

    if cli.no_export {
        return Ok(());
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;

    let path = cli.output_dir.join(&cli.workbook);
    write_workbook(&report, &path).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Workbook saved to {}", path.display());

    let path = cli.output_dir.join(&cli.chart);
    write_charts(&report, &path).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Charts saved to {}", path.display());

    if let Some(name) = &cli.json {
        let path = cli.output_dir.join(name);
        write_report(&report, &path).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("JSON report saved to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn names(scenarios: &[Scenario]) -> Vec<&str> {
        scenarios.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_repeated_scenario_flags() {
        let args = ["rextea", "--scenario", "rpm*0.5", "--scenario", "conversion_rate=0.001"];
        let cli = Cli::try_parse_from(args).unwrap();
        let scenarios = scenarios_from(cli.scenarios);
        assert_eq!(names(&scenarios), ["rpm*0.5", "conversion_rate=0.001"]);
    }

    #[test]
    fn test_scenarios_from_env_are_comma_separated() {
        std::env::set_var("REXTEA_SCENARIOS", "rpm*0.8,tax_rate=0.3");
        let parsed = Cli::try_parse_from(["rextea", "--no-export"]);
        std::env::remove_var("REXTEA_SCENARIOS");

        let scenarios = scenarios_from(parsed.unwrap().scenarios);
        assert_eq!(names(&scenarios), ["rpm*0.8", "tax_rate=0.3"]);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = Cli::try_parse_from(["rextea", "--scenario", "subscriber_mood*2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("subscriber_mood"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rextea", "--scenario", "rpm*1"]).unwrap();
        assert_eq!(cli.workbook, "Model_Rextea.xlsx");
        assert_eq!(cli.chart, "Financial_Analysis_Charts.svg");
        assert!(cli.json.is_none());
        assert_eq!(names(&scenarios_from(Vec::new())), ["Founder pain"]);
    }
}
