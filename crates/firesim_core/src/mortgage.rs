//! Level-payment mortgage amortization.
//!
//! All math in `rust_decimal::Decimal`; powers are computed by repeated
//! multiplication so no float round trip is involved.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Payment split for the current month of a loan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amortization {
    /// Fixed monthly payment for the remaining term
    pub monthly_payment: Decimal,
    /// Interest portion of this month's payment
    pub monthly_interest: Decimal,
}

impl Amortization {
    /// Principal repaid by this month's payment.
    #[must_use]
    pub fn principal_portion(&self) -> Decimal {
        self.monthly_payment - self.monthly_interest
    }
}

/// Compute the level monthly payment and current-month interest.
///
/// `annual_rate_percent` is in percentage points (7.88 means 7.88%). Both
/// results are rounded to 2 decimal places.
///
/// Returns `None` when the formula is undefined (non-positive rate or term) or
/// the intermediate power overflows `Decimal`.
pub fn amortize(
    principal: Decimal,
    annual_rate_percent: Decimal,
    months_remaining: i32,
) -> Option<Amortization> {
    if months_remaining <= 0 || annual_rate_percent <= Decimal::ZERO {
        return None;
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = checked_pow(Decimal::ONE + r, months_remaining.unsigned_abs())?;
    let denominator = growth.checked_sub(Decimal::ONE)?;
    if denominator.is_zero() {
        return None;
    }

    let factor = r.checked_mul(growth)?.checked_div(denominator)?;
    let monthly_payment = principal.checked_mul(factor)?.round_dp(2);

    Some(Amortization {
        monthly_payment,
        monthly_interest: monthly_interest(principal, annual_rate_percent),
    })
}

/// Interest accrued on `principal` for one month at the given annual rate.
pub fn monthly_interest(principal: Decimal, annual_rate_percent: Decimal) -> Decimal {
    (principal * monthly_rate(annual_rate_percent)).round_dp(2)
}

#[inline]
fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// Compute base^n for a non-negative integer exponent by repeated squaring.
fn checked_pow(base: Decimal, mut n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    while n > 0 {
        if n & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        n >>= 1;
        if n > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}
