//! Investment property holdings
//!
//! A property is rebuilt every month rather than mutated. Construction runs
//! the amortizer once and caches the payment split until the next rebuild.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::mortgage::{Amortization, amortize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProperty {
    pub market_value: Decimal,
    /// Rent collected each month
    pub monthly_income: Decimal,
    /// Outstanding mortgage principal
    pub mortgage_left: Decimal,
    /// Annual mortgage rate in percentage points (7.88 means 7.88%)
    pub mortgage_rate: Decimal,
    /// Remaining mortgage term
    pub mortgage_months: i32,
    /// Fractional yearly rent review (0.03 means +3% every January)
    pub annual_rent_increase_rate: Decimal,
    monthly_payment: Decimal,
    monthly_interest: Decimal,
}

impl InvestmentProperty {
    /// Build a property and compute its current mortgage payment split.
    pub fn new(
        market_value: Decimal,
        monthly_income: Decimal,
        mortgage_left: Decimal,
        mortgage_rate: Decimal,
        mortgage_months: i32,
        annual_rent_increase_rate: Decimal,
    ) -> Self {
        let mut property = Self {
            market_value,
            monthly_income,
            mortgage_left,
            mortgage_rate,
            mortgage_months,
            annual_rent_increase_rate,
            monthly_payment: Decimal::ZERO,
            monthly_interest: Decimal::ZERO,
        };

        if property.is_with_mortgage()
            && let Some(split) = amortize(mortgage_left, mortgage_rate, mortgage_months)
        {
            property.monthly_payment = split.monthly_payment;
            property.monthly_interest = split.monthly_interest;
        }

        property
    }

    /// Property owned outright.
    pub fn unencumbered(market_value: Decimal, monthly_income: Decimal) -> Self {
        Self::new(
            market_value,
            monthly_income,
            Decimal::ZERO,
            Decimal::ZERO,
            0,
            Decimal::ZERO,
        )
    }

    /// Copy of this property at a new market value, mortgage split unchanged.
    #[must_use]
    pub fn with_market_value(&self, market_value: Decimal) -> Self {
        Self {
            market_value,
            ..self.clone()
        }
    }

    pub fn is_with_mortgage(&self) -> bool {
        self.mortgage_left > Decimal::ZERO
            && self.mortgage_months > 0
            && self.mortgage_rate > Decimal::ZERO
    }

    /// Market value minus the outstanding mortgage. Negative when underwater.
    pub fn net_cash_value(&self) -> Decimal {
        self.market_value - self.mortgage_left
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn monthly_interest(&self) -> Decimal {
        self.monthly_interest
    }

    /// The cached payment split computed at construction.
    pub fn amortization(&self) -> Amortization {
        Amortization {
            monthly_payment: self.monthly_payment,
            monthly_interest: self.monthly_interest,
        }
    }
}
