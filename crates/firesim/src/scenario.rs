//! Scenario and rate history files
//!
//! Scenarios are YAML renderings of [`SimulationConfig`]; any field left out
//! takes its default. Rate histories are `date,value` CSV files.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use firesim_core::config::{InflationModel, SimulationConfig};
use firesim_core::inflation::{RateFrequency, parse_rate_history};

pub fn parse_scenario(yaml: &str) -> Result<SimulationConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

pub fn scenario_to_yaml(config: &SimulationConfig) -> Result<String, serde_saphyr::ser::Error> {
    serde_saphyr::to_string(config)
}

/// Read and parse a scenario file.
pub fn load_scenario(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading scenario {}", path.display()))?;
    let config = parse_scenario(&content)
        .wrap_err_with(|| format!("parsing scenario {}", path.display()))?;
    tracing::debug!(path = %path.display(), properties = config.properties.len(), "scenario loaded");
    Ok(config)
}

/// Read a rate history into an inflation model replaying it.
pub fn load_inflation_history(path: &Path, frequency: RateFrequency) -> Result<InflationModel> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("reading inflation history {}", path.display()))?;
    let rates = parse_rate_history(&content)
        .wrap_err_with(|| format!("parsing inflation history {}", path.display()))?;
    tracing::debug!(path = %path.display(), rows = rates.len(), ?frequency, "inflation history loaded");
    Ok(InflationModel::Series { rates, frequency })
}
