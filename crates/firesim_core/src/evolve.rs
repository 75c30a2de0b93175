//! Month-over-month evolution of a single investment property

use jiff::civil::Date;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::model::InvestmentProperty;

/// Advance one property by a month.
///
/// `new_date` is the date being entered; rent on a mortgaged property is
/// reviewed when it is a January. A property owned outright only appreciates.
/// Appreciation compounds monthly off the fixed annual rate.
///
/// A mortgaged property is rebuilt with one month of principal repaid (using
/// the payment split cached on `prev`), which recomputes the split for the
/// shorter term. The balance and term are not floored at zero.
pub fn advance_property(
    prev: &InvestmentProperty,
    annual_appreciation_rate: Decimal,
    new_date: Date,
) -> InvestmentProperty {
    let market_value = (prev.market_value
        + prev.market_value * annual_appreciation_rate / dec!(12))
    .round_dp(2);

    if !prev.is_with_mortgage() {
        return prev.with_market_value(market_value);
    }

    let monthly_income = if new_date.month() == 1 {
        prev.monthly_income * (Decimal::ONE + prev.annual_rent_increase_rate)
    } else {
        prev.monthly_income
    };

    let principal_paid = prev.amortization().principal_portion();

    InvestmentProperty::new(
        market_value,
        monthly_income,
        prev.mortgage_left - principal_paid,
        prev.mortgage_rate,
        prev.mortgage_months - 1,
        prev.annual_rent_increase_rate,
    )
}
