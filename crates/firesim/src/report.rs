//! Table and JSON rendering of simulation output

use std::fmt::Write as _;

use clap::ValueEnum;
use firesim_core::model::{FireSearchResult, FireSimulation, RetirementOutlook, SnapshotRecord};
use serde::Serialize;

use crate::util::format_currency;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned row per month
    #[default]
    Table,
    /// Snapshot records as JSON
    Json,
}

/// JSON shape of a retirement search
#[derive(Debug, Serialize)]
pub struct FireReport {
    pub outlook: RetirementOutlook,
    pub attempts: usize,
    pub accepted_month: Option<usize>,
    pub met_horizon: bool,
    pub simulations: Vec<SnapshotRecord>,
}

impl From<&FireSearchResult> for FireReport {
    fn from(result: &FireSearchResult) -> Self {
        Self {
            outlook: result.outlook(),
            attempts: result.attempts,
            accepted_month: result.accepted_month,
            met_horizon: result.met_horizon(),
            simulations: records(&result.simulations),
        }
    }
}

pub fn records(simulations: &[FireSimulation]) -> Vec<SnapshotRecord> {
    simulations.iter().map(FireSimulation::to_record).collect()
}

/// One-line summary of when salary can stop.
pub fn outlook_line(outlook: &RetirementOutlook) -> String {
    match outlook {
        RetirementOutlook::Retire { date, years } => {
            format!("Retire in {years} years, {}", date.strftime("%B %Y"))
        }
        RetirementOutlook::AlwaysWorking => {
            "With current configuration, you will always need some kind of income stream."
                .to_string()
        }
    }
}

const COLUMNS: [&str; 8] = [
    "Month", "Income", "Expenses", "Stocks", "Bonds", "Cash", "Property net", "Wealth",
];
const WIDTH: usize = 16;

pub fn render_table(records: &[SnapshotRecord]) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<8}", COLUMNS[0]);
    for column in &COLUMNS[1..] {
        let _ = write!(out, "{column:>WIDTH$}");
    }
    out.push('\n');

    for r in records {
        let _ = write!(out, "{:<8}", r.date.strftime("%Y-%m").to_string());
        for value in [
            r.monthly_income,
            r.monthly_expenses,
            r.stock_investments,
            r.bonds_investments,
            r.cash,
            r.properties_net_cash_value,
            r.wealth_inc_properties,
        ] {
            let _ = write!(out, "{:>WIDTH$}", format_currency(value));
        }
        out.push('\n');
    }

    out
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use firesim_core::config::FireSimulationBuilder;
    use firesim_core::simulation::run_simulation;
    use jiff::civil::date;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<FireSimulation> {
        let init = FireSimulationBuilder::new()
            .start(2025, 11, 1)
            .income(dec!(5000))
            .expenses(dec!(3000))
            .inflation(dec!(0))
            .income_growth(dec!(0))
            .keep_surplus_as_cash()
            .build();
        run_simulation(&init, 2, None)
    }

    #[test]
    fn test_outlook_line() {
        let retire = RetirementOutlook::Retire {
            date: date(2031, 3, 1),
            years: 6,
        };
        assert_eq!(outlook_line(&retire), "Retire in 6 years, March 2031");
        assert_eq!(
            outlook_line(&RetirementOutlook::AlwaysWorking),
            "With current configuration, you will always need some kind of income stream."
        );
    }

    #[test]
    fn test_table_has_header_and_one_row_per_month() {
        let table = render_table(&records(&sample()));
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Month"));
        assert!(lines[0].ends_with("Wealth"));
        assert!(lines[1].starts_with("2025-11"));
        assert!(lines[3].starts_with("2026-01"));
        assert!(lines[3].contains("$4,000.00"));
    }

    #[test]
    fn test_json_records() {
        let json = render_json(&records(&sample())).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2]["cash"], 4000.0);
        assert_eq!(parsed[0]["date"], "2025-11-01");
    }

    #[test]
    fn test_fire_report_json() {
        let result = FireSearchResult {
            simulations: sample(),
            attempts: 1,
            accepted_month: None,
        };
        let json = render_json(&FireReport::from(&result)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["met_horizon"], false);
        assert_eq!(parsed["outlook"]["kind"], "always_working");
        assert_eq!(parsed["simulations"].as_array().unwrap().len(), 3);
    }
}
