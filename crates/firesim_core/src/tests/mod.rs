//! Integration tests for the simulation engine
//!
//! Tests are organized by topic:
//! - `transition` - Single-month transition rules
//! - `drivers` - Run-to-horizon and the retirement search
//! - `scenarios` - Configuration feeding the drivers


use rust_decimal::Decimal;

use crate::config::FireSimulationBuilder;

/// A household starting January 2021 with every rate, flow and balance at
/// zero and surplus kept as cash.
fn household() -> FireSimulationBuilder {
    FireSimulationBuilder::new()
        .start(2021, 1, 1)
        .income(Decimal::ZERO)
        .expenses(Decimal::ZERO)
        .stock_return(Decimal::ZERO)
        .bonds_return(Decimal::ZERO)
        .inflation(Decimal::ZERO)
        .income_growth(Decimal::ZERO)
        .appreciation(Decimal::ZERO)
        .keep_surplus_as_cash()
}
