//! Fluent builders for scenarios and initial states
//!
//! `FireSimulationBuilder` starts from [`SimulationConfig::default`] and
//! overrides one field per call. `build()` yields the initial snapshot,
//! `build_config()` the scenario itself.

use jiff::civil::Date;
use rust_decimal::Decimal;

use super::{InflationModel, PropertyConfig, SimulationConfig};
use crate::model::{FireSimulation, SurplusStrategy};

/// Builder for a single investment property
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    property: PropertyConfig,
}

impl PropertyBuilder {
    /// A property owned outright with no rent.
    #[must_use]
    pub fn new(market_value: Decimal) -> Self {
        Self {
            property: PropertyConfig {
                market_value,
                ..PropertyConfig::default()
            },
        }
    }

    #[must_use]
    pub fn rent(mut self, monthly_income: Decimal) -> Self {
        self.property.monthly_income = monthly_income;
        self
    }

    /// Outstanding balance, annual rate in percentage points and remaining term
    #[must_use]
    pub fn mortgage(mut self, left: Decimal, rate_percent: Decimal, months: i32) -> Self {
        self.property.mortgage_left = left;
        self.property.mortgage_rate = rate_percent;
        self.property.mortgage_months = months;
        self
    }

    /// Rent review applied each January while mortgaged
    #[must_use]
    pub fn rent_increase(mut self, annual_rate: Decimal) -> Self {
        self.property.annual_rent_increase_rate = annual_rate;
        self
    }

    pub fn build(self) -> PropertyConfig {
        self.property
    }
}

/// Builder for scenarios and their initial snapshot
#[derive(Debug, Clone, Default)]
pub struct FireSimulationBuilder {
    config: SimulationConfig,
}

impl FireSimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Situation
    // =========================================================================

    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.date(jiff::civil::date(year, month, day))
    }

    #[must_use]
    pub fn date(mut self, date: Date) -> Self {
        self.config.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn stocks(mut self, amount: Decimal) -> Self {
        self.config.stocks = amount;
        self
    }

    #[must_use]
    pub fn bonds(mut self, amount: Decimal) -> Self {
        self.config.bonds = amount;
        self
    }

    #[must_use]
    pub fn cash(mut self, amount: Decimal) -> Self {
        self.config.cash = amount;
        self
    }

    /// Monthly salary
    #[must_use]
    pub fn income(mut self, amount: Decimal) -> Self {
        self.config.monthly_income = amount;
        self
    }

    #[must_use]
    pub fn expenses(mut self, amount: Decimal) -> Self {
        self.config.monthly_expenses = amount;
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertyBuilder) -> Self {
        self.config.properties.push(property.build());
        self
    }

    // =========================================================================
    // Assumptions
    // =========================================================================

    #[must_use]
    pub fn stock_return(mut self, annual_rate: Decimal) -> Self {
        self.config.stock_return_rate = annual_rate;
        self
    }

    #[must_use]
    pub fn bonds_return(mut self, annual_rate: Decimal) -> Self {
        self.config.bonds_return_rate = annual_rate;
        self
    }

    /// Annual inflation applied as `rate / 12` when no source is given
    #[must_use]
    pub fn inflation(mut self, annual_rate: Decimal) -> Self {
        self.config.annual_inflation_rate = annual_rate;
        self
    }

    #[must_use]
    pub fn inflation_model(mut self, model: InflationModel) -> Self {
        self.config.inflation = model;
        self
    }

    #[must_use]
    pub fn income_growth(mut self, annual_rate: Decimal) -> Self {
        self.config.annual_income_increase_rate = annual_rate;
        self
    }

    #[must_use]
    pub fn appreciation(mut self, annual_rate: Decimal) -> Self {
        self.config.annual_property_appreciation_rate = annual_rate;
        self
    }

    // =========================================================================
    // Plan
    // =========================================================================

    /// Invest cash above `threshold` according to `strategy`
    #[must_use]
    pub fn invest_surplus(mut self, strategy: SurplusStrategy, threshold: Decimal) -> Self {
        self.config.invest_cash_surplus = true;
        self.config.invest_cash_surplus_strategy = strategy;
        self.config.invest_cash_threshold = threshold;
        self
    }

    #[must_use]
    pub fn keep_surplus_as_cash(mut self) -> Self {
        self.config.invest_cash_surplus = false;
        self
    }

    #[must_use]
    pub fn horizon(mut self, months: usize) -> Self {
        self.config.horizon_months = months;
        self
    }

    pub fn build_config(self) -> SimulationConfig {
        self.config
    }

    /// Build the initial snapshot.
    pub fn build(self) -> FireSimulation {
        self.config.initial_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = FireSimulationBuilder::new()
            .start(2024, 5, 1)
            .income(dec!(3000))
            .invest_surplus(SurplusStrategy::AllStocks, dec!(5000))
            .horizon(120)
            .build_config();

        assert_eq!(config.start_date, Some(jiff::civil::date(2024, 5, 1)));
        assert_eq!(config.monthly_income, dec!(3000));
        assert_eq!(config.monthly_expenses, dec!(8000));
        assert_eq!(config.invest_cash_threshold, dec!(5000));
        assert_eq!(config.horizon_months, 120);
    }

    #[test]
    fn test_property_builder() {
        let p = PropertyBuilder::new(dec!(250000))
            .rent(dec!(1100))
            .mortgage(dec!(154275), dec!(7.88), 94)
            .rent_increase(dec!(0.03))
            .build()
            .to_property();

        assert!(p.is_with_mortgage());
        assert_eq!(p.monthly_payment(), dec!(2204.76));
        assert_eq!(p.net_cash_value(), dec!(95725));
    }

    #[test]
    fn test_keep_surplus_as_cash() {
        let s = FireSimulationBuilder::new()
            .start(2024, 1, 1)
            .keep_surplus_as_cash()
            .build();
        assert!(!s.policy.invest_cash_surplus);
    }
}
