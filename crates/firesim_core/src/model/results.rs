//! Driver outputs and their flat reporting view
//!
//! Snapshots stay in exact decimals throughout a run. [`SnapshotRecord`] is
//! the single place where values are converted to `f64` for display and
//! export.

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::snapshot::FireSimulation;

/// Result of the retirement-point search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSearchResult {
    /// Trajectory of the accepted candidate, or of the last one tried
    pub simulations: Vec<FireSimulation>,
    /// Number of candidate months evaluated
    pub attempts: usize,
    /// Last month index that still earns salary in the accepted trajectory
    pub accepted_month: Option<usize>,
}

impl FireSearchResult {
    /// True when some candidate sustained the requested horizon.
    pub fn met_horizon(&self) -> bool {
        self.accepted_month.is_some()
    }

    pub fn outlook(&self) -> RetirementOutlook {
        RetirementOutlook::from_simulations(&self.simulations)
    }
}

/// When salary income stops in a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetirementOutlook {
    /// Income first reaches zero at `date`, `years` calendar years after the start
    Retire { date: Date, years: i16 },
    /// Income never reaches zero
    AlwaysWorking,
}

impl RetirementOutlook {
    pub fn from_simulations(simulations: &[FireSimulation]) -> Self {
        let Some(first) = simulations.first() else {
            return RetirementOutlook::AlwaysWorking;
        };

        simulations
            .iter()
            .find(|s| s.monthly_income.is_zero())
            .map(|s| RetirementOutlook::Retire {
                date: s.date,
                years: s.date.year() - first.date.year(),
            })
            .unwrap_or(RetirementOutlook::AlwaysWorking)
    }
}

/// A snapshot with every raw and derived value as `f64`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub date: Date,
    pub stock_investments: f64,
    pub bonds_investments: f64,
    pub cash: f64,
    pub monthly_expenses: f64,
    pub monthly_income: f64,
    pub property_count: usize,
    pub properties_market_value: f64,
    pub properties_monthly_income: f64,
    pub properties_net_cash_value: f64,
    pub properties_mortgage_left: f64,
    pub properties_monthly_mortgage: f64,
    pub liquid_wealth: f64,
    pub wealth_inc_properties: f64,
    pub annual_inflation_rate: f64,
    pub monthly_inflation_rate: f64,
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

impl FireSimulation {
    pub fn to_record(&self) -> SnapshotRecord {
        SnapshotRecord {
            date: self.date,
            stock_investments: to_f64(self.stock_investments),
            bonds_investments: to_f64(self.bonds_investments),
            cash: to_f64(self.cash),
            monthly_expenses: to_f64(self.monthly_expenses),
            monthly_income: to_f64(self.monthly_income),
            property_count: self.investment_properties.len(),
            properties_market_value: to_f64(self.properties_market_value()),
            properties_monthly_income: to_f64(self.properties_monthly_income()),
            properties_net_cash_value: to_f64(self.properties_net_cash_value()),
            properties_mortgage_left: to_f64(self.properties_mortgage_left()),
            properties_monthly_mortgage: to_f64(self.properties_monthly_mortgage()),
            liquid_wealth: to_f64(self.liquid_wealth()),
            wealth_inc_properties: to_f64(self.wealth_inc_properties()),
            annual_inflation_rate: to_f64(self.annual_inflation_rate),
            monthly_inflation_rate: to_f64(self.monthly_inflation_rate),
        }
    }
}
