//! Pass-through policy carried unchanged from month to month

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How cash above the surplus threshold is moved into investments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurplusStrategy {
    /// Keep all surplus as cash
    #[serde(rename = "none")]
    KeepCash,
    #[serde(rename = "100")]
    AllStocks,
    #[default]
    #[serde(rename = "80-20")]
    Stocks80Bonds20,
    #[serde(rename = "60-40")]
    Stocks60Bonds40,
    #[serde(rename = "50-50")]
    Stocks50Bonds50,
}

impl SurplusStrategy {
    /// Fractions of the surplus going to (stocks, bonds).
    ///
    /// `None` means the surplus is left in cash.
    pub fn split(self) -> Option<(Decimal, Decimal)> {
        match self {
            SurplusStrategy::KeepCash => None,
            SurplusStrategy::AllStocks => Some((Decimal::ONE, Decimal::ZERO)),
            SurplusStrategy::Stocks80Bonds20 => Some((dec!(0.8), dec!(0.2))),
            SurplusStrategy::Stocks60Bonds40 => Some((dec!(0.6), dec!(0.4))),
            SurplusStrategy::Stocks50Bonds50 => Some((dec!(0.5), dec!(0.5))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SurplusStrategy::KeepCash => "none",
            SurplusStrategy::AllStocks => "100",
            SurplusStrategy::Stocks80Bonds20 => "80-20",
            SurplusStrategy::Stocks60Bonds40 => "60-40",
            SurplusStrategy::Stocks50Bonds50 => "50-50",
        }
    }
}

/// Rates and allocation rules that every transition copies verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationPolicy {
    /// Annual stock return, as a fraction
    pub stock_return_rate: Decimal,
    /// Annual bond return, as a fraction
    pub bonds_return_rate: Decimal,
    /// Applied to salary income on each January
    pub annual_income_increase_rate: Decimal,
    pub annual_property_appreciation_rate: Decimal,
    pub invest_cash_surplus: bool,
    /// Cash kept on hand before any surplus is invested
    pub invest_cash_threshold: Decimal,
    pub invest_cash_surplus_strategy: SurplusStrategy,
}
