//! The month-to-month transition
//!
//! [`simulate_next`] builds the following month's snapshot from the previous
//! one. Apart from pulling at most one rate from the inflation source it is a
//! pure function of its input.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::date_math::next_month;
use crate::evolve::advance_property;
use crate::inflation::InflationSource;
use crate::liquidation::{FundingTier, cover_expenses};
use crate::model::{FireSimulation, SimulationPolicy};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Advance `prev` by one calendar month.
///
/// Without an inflation source the annual rate carries forward and is applied
/// as `annual / 12`. With a source, one monthly rate is pulled and the
/// reported annual rate becomes `monthly * 12`.
///
/// Expenses are funded through the cash, bonds, stocks, property waterfall
/// (see [`cover_expenses`]); insolvency shows up as negative cash rather than
/// an error.
pub fn simulate_next(
    prev: &FireSimulation,
    inflation: Option<&mut dyn InflationSource>,
) -> FireSimulation {
    let policy = &prev.policy;
    let date = next_month(prev.date);

    let properties: Vec<_> = prev
        .investment_properties
        .iter()
        .map(|p| advance_property(p, policy.annual_property_appreciation_rate, date))
        .collect();

    let (monthly_inflation_rate, annual_inflation_rate) = match inflation {
        Some(source) => {
            let monthly = source.next_monthly_rate();
            (monthly, monthly * MONTHS_PER_YEAR)
        }
        None => (
            prev.annual_inflation_rate / MONTHS_PER_YEAR,
            prev.annual_inflation_rate,
        ),
    };

    let monthly_expenses = prev.monthly_expenses * (Decimal::ONE + monthly_inflation_rate);

    let monthly_income = if date.month() == 1 {
        prev.monthly_income * (Decimal::ONE + policy.annual_income_increase_rate)
    } else {
        prev.monthly_income
    };

    // Rent is taken from the evolved holdings so January escalations count immediately
    let rent: Decimal = properties.iter().map(|p| p.monthly_income).sum();
    let available_cash = prev.cash + monthly_income + rent;

    let bonds =
        prev.bonds_investments * (Decimal::ONE + policy.bonds_return_rate / MONTHS_PER_YEAR);
    let stocks =
        prev.stock_investments * (Decimal::ONE + policy.stock_return_rate / MONTHS_PER_YEAR);

    let funding = cover_expenses(available_cash, monthly_expenses, bonds, stocks, properties);
    match (&funding.tier, &funding.sold) {
        (FundingTier::PropertySale, Some(sold)) => tracing::debug!(
            %date,
            market_value = %sold.market_value,
            net_cash_value = %sold.net_cash_value(),
            "sold property to cover expenses"
        ),
        (FundingTier::Insolvent, _) => {
            tracing::trace!(%date, cash = %funding.cash, "expenses not covered")
        }
        _ => {}
    }

    let (cash, stocks, bonds) = reinvest_surplus(policy, funding.cash, funding.stocks, funding.bonds);

    FireSimulation {
        date,
        stock_investments: stocks.round_dp(2),
        bonds_investments: bonds.round_dp(2),
        cash: cash.round_dp(2),
        monthly_expenses: monthly_expenses.round_dp(2),
        monthly_income: monthly_income.round_dp(2),
        investment_properties: funding.properties,
        annual_inflation_rate,
        monthly_inflation_rate,
        policy: prev.policy.clone(),
    }
}

/// Move cash above the threshold into stocks and bonds.
///
/// Returns `(cash, stocks, bonds)`.
fn reinvest_surplus(
    policy: &SimulationPolicy,
    cash: Decimal,
    stocks: Decimal,
    bonds: Decimal,
) -> (Decimal, Decimal, Decimal) {
    let surplus = cash - policy.invest_cash_threshold;
    if !policy.invest_cash_surplus || surplus <= Decimal::ZERO {
        return (cash, stocks, bonds);
    }

    match policy.invest_cash_surplus_strategy.split() {
        Some((to_stocks, to_bonds)) => (
            policy.invest_cash_threshold,
            stocks + surplus * to_stocks,
            bonds + surplus * to_bonds,
        ),
        None => (cash, stocks, bonds),
    }
}
