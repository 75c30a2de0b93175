//! Injectable monthly inflation sources
//!
//! The transition function pulls exactly one monthly rate per step from an
//! [`InflationSource`]. Every source here is unbounded: series wrap around
//! and random sources sample forever.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InflationError;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HISTORY_HEADER: &str = "date,value";

/// An endless sequence of monthly inflation rates
pub trait InflationSource {
    /// Pull the next monthly rate, as a fraction.
    fn next_monthly_rate(&mut self) -> Decimal;
}

impl<S: InflationSource + ?Sized> InflationSource for &mut S {
    fn next_monthly_rate(&mut self) -> Decimal {
        (**self).next_monthly_rate()
    }
}

impl<S: InflationSource + ?Sized> InflationSource for Box<S> {
    fn next_monthly_rate(&mut self) -> Decimal {
        (**self).next_monthly_rate()
    }
}

/// Granularity of the values in a rate history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFrequency {
    /// Each value is an annual rate, spread over twelve months
    #[default]
    Annual,
    /// Each value is already a monthly rate
    Monthly,
}

/// Read the values of a `date,value` CSV history, in file order.
///
/// The first non-blank line must be the `date,value` header. The date column
/// is not interpreted. Errors carry 1-based line numbers.
pub fn parse_rate_history(text: &str) -> Result<Vec<Decimal>, InflationError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    match lines.next() {
        Some((_, HISTORY_HEADER)) => {}
        Some((_, other)) => {
            return Err(InflationError::MissingHeader {
                found: other.to_string(),
            });
        }
        None => return Err(InflationError::EmptySeries),
    }

    let mut values = Vec::new();
    for (line, content) in lines {
        // Headers may be repeated when files are concatenated
        if content == HISTORY_HEADER {
            continue;
        }
        let Some((_, value)) = content.split_once(',') else {
            return Err(InflationError::MalformedRow {
                line,
                content: content.to_string(),
            });
        };
        let value = value.trim();
        let rate = value
            .parse::<Decimal>()
            .map_err(|_| InflationError::InvalidRate {
                line,
                value: value.to_string(),
            })?;
        values.push(rate);
    }

    Ok(values)
}

/// The same monthly rate every month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInflation {
    monthly: Decimal,
}

impl FixedInflation {
    pub fn from_annual(annual: Decimal) -> Self {
        Self {
            monthly: annual / MONTHS_PER_YEAR,
        }
    }

    pub fn from_monthly(monthly: Decimal) -> Self {
        Self { monthly }
    }
}

impl InflationSource for FixedInflation {
    fn next_monthly_rate(&mut self) -> Decimal {
        self.monthly
    }
}

/// Replays a fixed series of monthly rates, starting over when exhausted
#[derive(Debug, Clone, PartialEq)]
pub struct CyclingInflation {
    rates: Vec<Decimal>,
    position: usize,
}

impl CyclingInflation {
    pub fn new(rates: Vec<Decimal>) -> Result<Self, InflationError> {
        if rates.is_empty() {
            return Err(InflationError::EmptySeries);
        }
        Ok(Self { rates, position: 0 })
    }

    /// Build from a series of values at the given frequency.
    ///
    /// Annual values are converted to `round(value / 12, 3)` and repeated for
    /// twelve months.
    pub fn from_series(
        values: &[Decimal],
        frequency: RateFrequency,
    ) -> Result<Self, InflationError> {
        let rates = match frequency {
            RateFrequency::Monthly => values.to_vec(),
            RateFrequency::Annual => values
                .iter()
                .flat_map(|annual| {
                    let monthly = (annual / MONTHS_PER_YEAR).round_dp(3);
                    std::iter::repeat_n(monthly, 12)
                })
                .collect(),
        };
        Self::new(rates)
    }

    /// Parse a `date,value` CSV history and replay it at `frequency`.
    pub fn from_csv_str(text: &str, frequency: RateFrequency) -> Result<Self, InflationError> {
        Self::from_series(&parse_rate_history(text)?, frequency)
    }

    /// Number of months before the series repeats.
    pub fn period(&self) -> usize {
        self.rates.len()
    }
}

impl InflationSource for CyclingInflation {
    fn next_monthly_rate(&mut self) -> Decimal {
        let rate = self.rates[self.position];
        self.position = (self.position + 1) % self.rates.len();
        rate
    }
}

/// Uniformly sampled whole-percent monthly rates
#[derive(Debug, Clone)]
pub struct UniformInflation {
    min_percent: u32,
    max_percent: u32,
    rng: SmallRng,
}

impl UniformInflation {
    /// Rates are drawn from `[min_percent, max_percent)` and divided by 100.
    pub fn new(min_percent: u32, max_percent: u32, seed: u64) -> Result<Self, InflationError> {
        if min_percent >= max_percent {
            return Err(InflationError::EmptyRange {
                min_percent,
                max_percent,
            });
        }
        Ok(Self {
            min_percent,
            max_percent,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
}

impl InflationSource for UniformInflation {
    fn next_monthly_rate(&mut self) -> Decimal {
        let percent = self.rng.random_range(self.min_percent..self.max_percent);
        Decimal::from(percent) / Decimal::ONE_HUNDRED
    }
}

/// Normally distributed annual inflation, applied as monthly rates
#[derive(Debug, Clone)]
pub struct NormalInflation {
    distribution: Normal<f64>,
    rng: SmallRng,
}

impl NormalInflation {
    pub fn new(mean: f64, std_dev: f64, seed: u64) -> Result<Self, InflationError> {
        let invalid = |reason| InflationError::InvalidDistributionParameters {
            mean,
            std_dev,
            reason,
        };
        if !mean.is_finite() {
            return Err(invalid("mean must be finite"));
        }
        // Normal::new accepts a negative std_dev
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(invalid("std_dev must be non-negative and finite"));
        }
        let distribution = Normal::new(mean, std_dev)
            .map_err(|_| invalid("std_dev must be non-negative and finite"))?;
        Ok(Self {
            distribution,
            rng: SmallRng::seed_from_u64(seed),
        })
    }
}

impl InflationSource for NormalInflation {
    fn next_monthly_rate(&mut self) -> Decimal {
        let annual = self.distribution.sample(&mut self.rng);
        Decimal::from_f64(annual)
            .map(|a| (a / MONTHS_PER_YEAR).round_dp(6))
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_from_annual() {
        let mut src = FixedInflation::from_annual(dec!(0.03));
        assert_eq!(src.next_monthly_rate(), dec!(0.0025));
        assert_eq!(src.next_monthly_rate(), dec!(0.0025));
    }

    #[test]
    fn test_cycling_wraps() {
        let mut src = CyclingInflation::new(vec![dec!(0.01), dec!(0.02)]).unwrap();
        let pulled: Vec<_> = (0..5).map(|_| src.next_monthly_rate()).collect();
        assert_eq!(
            pulled,
            vec![dec!(0.01), dec!(0.02), dec!(0.01), dec!(0.02), dec!(0.01)]
        );
    }

    #[test]
    fn test_cycling_rejects_empty() {
        assert_eq!(
            CyclingInflation::new(vec![]),
            Err(InflationError::EmptySeries)
        );
    }

    #[test]
    fn test_annual_history_spreads_over_twelve_months() {
        let text = "date,value
    2020,0.024
    2021,0.08
    2022,0.14
";
        let mut src = CyclingInflation::from_csv_str(text, RateFrequency::Annual).unwrap();
        assert_eq!(src.period(), 36);

        for _ in 0..12 {
            assert_eq!(src.next_monthly_rate(), dec!(0.002));
        }
        for _ in 0..12 {
            assert_eq!(src.next_monthly_rate(), dec!(0.007));
        }
        for _ in 0..12 {
            assert_eq!(src.next_monthly_rate(), dec!(0.012));
        }
        // Wraps back to the first year
        assert_eq!(src.next_monthly_rate(), dec!(0.002));
    }

    #[test]
    fn test_monthly_history_is_used_verbatim() {
        let text = "date,value\n2024-01,0.0031\n2024-02,-0.0005\n";
        let mut src = CyclingInflation::from_csv_str(text, RateFrequency::Monthly).unwrap();
        assert_eq!(src.period(), 2);
        assert_eq!(src.next_monthly_rate(), dec!(0.0031));
        assert_eq!(src.next_monthly_rate(), dec!(-0.0005));
        assert_eq!(src.next_monthly_rate(), dec!(0.0031));
    }

    #[test]
    fn test_history_errors() {
        assert!(matches!(
            CyclingInflation::from_csv_str("year,rate\n2020,0.1\n", RateFrequency::Annual),
            Err(InflationError::MissingHeader { .. })
        ));
        assert_eq!(
            CyclingInflation::from_csv_str("date,value\n2020\n", RateFrequency::Annual),
            Err(InflationError::MalformedRow {
                line: 2,
                content: "2020".to_string()
            })
        );
        assert_eq!(
            CyclingInflation::from_csv_str("date,value\n2020,abc\n", RateFrequency::Annual),
            Err(InflationError::InvalidRate {
                line: 2,
                value: "abc".to_string()
            })
        );
        assert_eq!(
            CyclingInflation::from_csv_str("date,value\n", RateFrequency::Annual),
            Err(InflationError::EmptySeries)
        );
        assert_eq!(
            CyclingInflation::from_csv_str("", RateFrequency::Annual),
            Err(InflationError::EmptySeries)
        );
    }

    #[test]
    fn test_parse_rate_history_skips_blank_and_repeated_headers() {
        let text = "\n date,value \n2020,0.01\n\ndate,value\n2021, 0.02 \n";
        assert_eq!(
            parse_rate_history(text).unwrap(),
            vec![dec!(0.01), dec!(0.02)]
        );
    }

    #[test]
    fn test_uniform_within_range() {
        let mut src = UniformInflation::new(1, 5, 7).unwrap();
        for _ in 0..200 {
            let r = src.next_monthly_rate();
            assert!(r >= dec!(0.01) && r < dec!(0.05), "{r}");
        }
    }

    #[test]
    fn test_uniform_is_reproducible() {
        let mut a = UniformInflation::new(0, 10, 99).unwrap();
        let mut b = UniformInflation::new(0, 10, 99).unwrap();
        for _ in 0..20 {
            assert_eq!(a.next_monthly_rate(), b.next_monthly_rate());
        }
    }

    #[test]
    fn test_uniform_rejects_empty_range() {
        assert!(UniformInflation::new(3, 3, 0).is_err());
    }

    #[test]
    fn test_normal_zero_deviation_is_constant() {
        let mut src = NormalInflation::new(0.03, 0.0, 1).unwrap();
        assert_eq!(src.next_monthly_rate(), dec!(0.0025));
    }

    #[test]
    fn test_normal_rejects_bad_parameters() {
        let cases = [
            (0.03, -1.0),
            (0.03, f64::NAN),
            (0.03, f64::INFINITY),
            (f64::NAN, 0.01),
        ];
        for (mean, std_dev) in cases {
            let err = NormalInflation::new(mean, std_dev, 1).unwrap_err();
            assert!(
                matches!(err, InflationError::InvalidDistributionParameters { .. }),
                "{mean} {std_dev}"
            );
        }

        let err = NormalInflation::new(0.03, -1.0, 1).unwrap_err();
        assert!(err.to_string().contains("std_dev must be non-negative"), "{err}");
        assert!(NormalInflation::new(0.03, 0.0, 1).is_ok());
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut boxed: Box<dyn InflationSource> = Box::new(FixedInflation::from_monthly(dec!(0.004)));
        assert_eq!(boxed.next_monthly_rate(), dec!(0.004));
    }
}
