//! Scenario configuration
//!
//! `SimulationConfig` is the serialisable bundle a scenario file holds. It
//! produces the initial [`FireSimulation`] and the configured inflation
//! source. Every field has a default, so partial scenario files are fine.
//!
//! # Builder DSL
//!
//! Initial states can also be assembled directly:
//!
//! ```ignore
//! use firesim_core::config::{FireSimulationBuilder, PropertyBuilder};
//! use rust_decimal_macros::dec;
//!
//! let init = FireSimulationBuilder::new()
//!     .start(2025, 1, 1)
//!     .income(dec!(6000))
//!     .expenses(dec!(4000))
//!     .stocks(dec!(120000))
//!     .property(PropertyBuilder::new(dec!(250000))
//!         .rent(dec!(1100))
//!         .mortgage(dec!(154275), dec!(7.88), 94))
//!     .build();
//! ```

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::date_math::first_of_month;
use crate::error::{ConfigError, Result};
use crate::inflation::{
    CyclingInflation, InflationSource, NormalInflation, RateFrequency, UniformInflation,
};
use crate::model::{FireSimulation, InvestmentProperty, SimulationPolicy, SurplusStrategy};

pub mod builder;

pub use builder::{FireSimulationBuilder, PropertyBuilder};

/// Fifty years
pub const DEFAULT_HORIZON_MONTHS: usize = 600;

/// Where monthly inflation rates come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InflationModel {
    /// `annual_inflation_rate / 12` every month
    #[default]
    Fixed,
    /// Whole percentages drawn uniformly from `[min_percent, max_percent)`
    Uniform { min_percent: u32, max_percent: u32 },
    /// Annual rate drawn from a normal distribution each month
    Normal { mean: f64, std_dev: f64 },
    /// A replayed history
    Series {
        rates: Vec<Decimal>,
        #[serde(default)]
        frequency: RateFrequency,
    },
}

/// One investment property as written in a scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyConfig {
    pub market_value: Decimal,
    pub monthly_income: Decimal,
    pub mortgage_left: Decimal,
    /// Percentage points
    pub mortgage_rate: Decimal,
    pub mortgage_months: i32,
    pub annual_rent_increase_rate: Decimal,
}

impl PropertyConfig {
    pub fn to_property(&self) -> InvestmentProperty {
        InvestmentProperty::new(
            self.market_value,
            self.monthly_income,
            self.mortgage_left,
            self.mortgage_rate,
            self.mortgage_months,
            self.annual_rent_increase_rate,
        )
    }
}

/// Complete scenario configuration
///
/// **Your situation**: `start_date`, balances, income, expenses and
/// `properties`.
///
/// **World assumptions**: return rates, inflation, income growth and property
/// appreciation.
///
/// **Your plan**: the surplus investing rule and the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Your Situation ===
    /// First simulated month; the current month when unset
    pub start_date: Option<Date>,
    pub stocks: Decimal,
    pub bonds: Decimal,
    pub cash: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expenses: Decimal,
    pub properties: Vec<PropertyConfig>,

    // === World Assumptions ===
    pub stock_return_rate: Decimal,
    pub bonds_return_rate: Decimal,
    pub annual_inflation_rate: Decimal,
    pub annual_income_increase_rate: Decimal,
    pub annual_property_appreciation_rate: Decimal,
    pub inflation: InflationModel,

    // === Your Plan ===
    pub invest_cash_surplus: bool,
    pub invest_cash_threshold: Decimal,
    pub invest_cash_surplus_strategy: SurplusStrategy,
    pub horizon_months: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            stocks: Decimal::ZERO,
            bonds: Decimal::ZERO,
            cash: Decimal::ZERO,
            monthly_income: dec!(10000),
            monthly_expenses: dec!(8000),
            properties: Vec::new(),
            stock_return_rate: dec!(0.05),
            bonds_return_rate: dec!(0.02),
            annual_inflation_rate: dec!(0.02),
            annual_income_increase_rate: dec!(0.02),
            annual_property_appreciation_rate: dec!(0.02),
            inflation: InflationModel::default(),
            invest_cash_surplus: true,
            invest_cash_threshold: Decimal::ZERO,
            invest_cash_surplus_strategy: SurplusStrategy::Stocks60Bonds40,
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the scenario for values the engine would happily run with but
    /// that make no sense as input.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("stocks", self.stocks),
            ("bonds", self.bonds),
            ("cash", self.cash),
            ("monthly_income", self.monthly_income),
            ("monthly_expenses", self.monthly_expenses),
            ("invest_cash_threshold", self.invest_cash_threshold),
        ];
        if let Some((field, value)) = non_negative
            .into_iter()
            .find(|(_, value)| *value < Decimal::ZERO)
        {
            return Err(ConfigError::Negative { field, value });
        }

        for (index, p) in self.properties.iter().enumerate() {
            let reason = if p.market_value < Decimal::ZERO {
                Some("market value is negative")
            } else if p.mortgage_left < Decimal::ZERO {
                Some("mortgage balance is negative")
            } else if p.mortgage_rate < Decimal::ZERO {
                Some("mortgage rate is negative")
            } else if p.mortgage_months < 0 {
                Some("mortgage term is negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidProperty { index, reason });
            }
        }

        if self.horizon_months == 0 {
            return Err(ConfigError::ZeroHorizon);
        }

        self.inflation_source(0)?;
        Ok(())
    }

    pub fn policy(&self) -> SimulationPolicy {
        SimulationPolicy {
            stock_return_rate: self.stock_return_rate,
            bonds_return_rate: self.bonds_return_rate,
            annual_income_increase_rate: self.annual_income_increase_rate,
            annual_property_appreciation_rate: self.annual_property_appreciation_rate,
            invest_cash_surplus: self.invest_cash_surplus,
            invest_cash_threshold: self.invest_cash_threshold,
            invest_cash_surplus_strategy: self.invest_cash_surplus_strategy,
        }
    }

    /// Build the first month's snapshot.
    pub fn initial_state(&self) -> FireSimulation {
        let date = self
            .start_date
            .unwrap_or_else(|| first_of_month(jiff::Zoned::now().date()));

        FireSimulation {
            date,
            stock_investments: self.stocks,
            bonds_investments: self.bonds,
            cash: self.cash,
            monthly_expenses: self.monthly_expenses,
            monthly_income: self.monthly_income,
            investment_properties: self
                .properties
                .iter()
                .map(PropertyConfig::to_property)
                .collect(),
            annual_inflation_rate: self.annual_inflation_rate,
            monthly_inflation_rate: self.annual_inflation_rate / dec!(12),
            policy: self.policy(),
        }
    }

    /// Build the configured inflation source.
    ///
    /// The fixed model yields `None`: the transition then applies
    /// `annual_inflation_rate / 12` on its own. `seed` only affects the random
    /// models.
    pub fn inflation_source(&self, seed: u64) -> Result<Option<Box<dyn InflationSource + Send>>> {
        let source: Box<dyn InflationSource + Send> = match &self.inflation {
            InflationModel::Fixed => return Ok(None),
            InflationModel::Uniform {
                min_percent,
                max_percent,
            } => Box::new(UniformInflation::new(*min_percent, *max_percent, seed)?),
            InflationModel::Normal { mean, std_dev } => {
                Box::new(NormalInflation::new(*mean, *std_dev, seed)?)
            }
            InflationModel::Series { rates, frequency } => {
                Box::new(CyclingInflation::from_series(rates, *frequency)?)
            }
        };
        Ok(Some(source))
    }

    /// Replace the inflation model, e.g. with a history loaded from disk.
    #[must_use]
    pub fn with_inflation(mut self, inflation: InflationModel) -> Self {
        self.inflation = inflation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SimulationConfig::default();
        assert_eq!(c.monthly_income, dec!(10000));
        assert_eq!(c.monthly_expenses, dec!(8000));
        assert_eq!(c.invest_cash_surplus_strategy, SurplusStrategy::Stocks60Bonds40);
        assert_eq!(c.horizon_months, 600);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_initial_state_uses_start_date() {
        let c = SimulationConfig {
            start_date: Some(jiff::civil::date(2030, 3, 1)),
            properties: vec![PropertyConfig {
                market_value: dec!(100000),
                monthly_income: dec!(2000),
                mortgage_left: dec!(100000),
                mortgage_rate: dec!(10),
                mortgage_months: 100,
                annual_rent_increase_rate: dec!(0.05),
            }],
            ..SimulationConfig::default()
        };
        let s = c.initial_state();
        assert_eq!(s.date, jiff::civil::date(2030, 3, 1));
        assert_eq!(s.monthly_inflation_rate, dec!(0.02) / dec!(12));
        assert_eq!(s.investment_properties[0].monthly_payment(), dec!(1477.81));
        assert_eq!(s.policy.stock_return_rate, dec!(0.05));
    }

    #[test]
    fn test_initial_state_defaults_to_first_of_month() {
        let s = SimulationConfig::default().initial_state();
        assert_eq!(s.date.day(), 1);
    }

    #[test]
    fn test_validate_rejects_negatives() {
        let c = SimulationConfig {
            cash: dec!(-1),
            ..SimulationConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::Negative {
                field: "cash",
                value: dec!(-1)
            })
        );

        let c = SimulationConfig {
            properties: vec![PropertyConfig {
                mortgage_months: -3,
                ..PropertyConfig::default()
            }],
            ..SimulationConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidProperty { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_horizon_and_bad_inflation() {
        let c = SimulationConfig {
            horizon_months: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroHorizon));

        let c = SimulationConfig::default().with_inflation(InflationModel::Uniform {
            min_percent: 5,
            max_percent: 1,
        });
        assert!(matches!(c.validate(), Err(ConfigError::Inflation(_))));

        let c = SimulationConfig::default().with_inflation(InflationModel::Normal {
            mean: 0.02,
            std_dev: -1.0,
        });
        assert!(matches!(c.validate(), Err(ConfigError::Inflation(_))));
    }

    #[test]
    fn test_inflation_source_by_model() {
        assert!(SimulationConfig::default().inflation_source(1).unwrap().is_none());

        let c = SimulationConfig::default().with_inflation(InflationModel::Series {
            rates: vec![dec!(0.01)],
            frequency: RateFrequency::Monthly,
        });
        let mut source = c.inflation_source(1).unwrap().unwrap();
        assert_eq!(source.next_monthly_rate(), dec!(0.01));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let c = SimulationConfig {
            start_date: Some(jiff::civil::date(2025, 1, 1)),
            inflation: InflationModel::Normal {
                mean: 0.03,
                std_dev: 0.01,
            },
            ..SimulationConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let c: SimulationConfig = serde_json::from_str(r#"{"cash": "2500"}"#).unwrap();
        assert_eq!(c.cash, dec!(2500));
        assert_eq!(c.monthly_income, dec!(10000));
        assert_eq!(c.inflation, InflationModel::Fixed);
    }
}
