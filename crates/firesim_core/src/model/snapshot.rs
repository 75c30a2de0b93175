//! One month's household snapshot
//!
//! Snapshots are immutable once built. The transition function produces the
//! next one from the previous; the `with_*` helpers produce modified copies.

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::policy::SimulationPolicy;
use super::property::InvestmentProperty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSimulation {
    pub date: Date,
    pub stock_investments: Decimal,
    pub bonds_investments: Decimal,
    pub cash: Decimal,
    pub monthly_expenses: Decimal,
    /// Salary income, excluding rent
    pub monthly_income: Decimal,
    pub investment_properties: Vec<InvestmentProperty>,
    /// Annual inflation reported for this month
    pub annual_inflation_rate: Decimal,
    /// Monthly inflation actually applied to reach this month
    pub monthly_inflation_rate: Decimal,
    pub policy: SimulationPolicy,
}

impl FireSimulation {
    /// Copy of this snapshot with a different salary income.
    #[must_use]
    pub fn with_monthly_income(&self, monthly_income: Decimal) -> Self {
        Self {
            monthly_income,
            ..self.clone()
        }
    }

    // === Property aggregates ===

    pub fn properties_market_value(&self) -> Decimal {
        self.investment_properties
            .iter()
            .map(|p| p.market_value)
            .sum()
    }

    pub fn properties_monthly_income(&self) -> Decimal {
        self.investment_properties
            .iter()
            .map(|p| p.monthly_income)
            .sum()
    }

    pub fn properties_net_cash_value(&self) -> Decimal {
        self.investment_properties
            .iter()
            .map(InvestmentProperty::net_cash_value)
            .sum()
    }

    pub fn properties_mortgage_left(&self) -> Decimal {
        self.investment_properties
            .iter()
            .map(|p| p.mortgage_left)
            .sum()
    }

    /// Current payment obligation across properties that still carry a mortgage.
    pub fn properties_monthly_mortgage(&self) -> Decimal {
        self.investment_properties
            .iter()
            .filter(|p| p.is_with_mortgage())
            .map(InvestmentProperty::monthly_payment)
            .sum()
    }

    // === Wealth ===

    /// Stocks + bonds + cash.
    pub fn liquid_wealth(&self) -> Decimal {
        self.stock_investments + self.bonds_investments + self.cash
    }

    /// Liquid wealth plus the net cash value of all properties.
    pub fn wealth_inc_properties(&self) -> Decimal {
        self.liquid_wealth() + self.properties_net_cash_value()
    }
}
