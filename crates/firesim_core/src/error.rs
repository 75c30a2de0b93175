use std::fmt;

use rust_decimal::Decimal;

/// Errors raised while building an inflation source
#[derive(Debug, Clone, PartialEq)]
pub enum InflationError {
    /// A cycling source needs at least one rate
    EmptySeries,
    /// Rate history text did not start with the `date,value` header
    MissingHeader { found: String },
    /// A history row was not a `date,value` pair
    MalformedRow { line: usize, content: String },
    /// A history value could not be parsed as a decimal rate
    InvalidRate { line: usize, value: String },
    /// Uniform sampling range is empty
    EmptyRange { min_percent: u32, max_percent: u32 },
    InvalidDistributionParameters {
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
}

impl fmt::Display for InflationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflationError::EmptySeries => write!(f, "inflation series is empty"),
            InflationError::MissingHeader { found } => {
                write!(f, "expected `date,value` header, found {found:?}")
            }
            InflationError::MalformedRow { line, content } => {
                write!(f, "line {line}: expected `date,value`, found {content:?}")
            }
            InflationError::InvalidRate { line, value } => {
                write!(f, "line {line}: invalid rate {value:?}")
            }
            InflationError::EmptyRange {
                min_percent,
                max_percent,
            } => write!(
                f,
                "empty inflation range [{min_percent}%, {max_percent}%)"
            ),
            InflationError::InvalidDistributionParameters {
                mean,
                std_dev,
                reason,
            } => write!(
                f,
                "invalid normal inflation parameters (mean={mean}, std_dev={std_dev}): {reason}"
            ),
        }
    }
}

impl std::error::Error for InflationError {}

/// Errors reported by optional configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A balance, flow or threshold that must not be negative
    Negative { field: &'static str, value: Decimal },
    /// A property whose mortgage fields are inconsistent
    InvalidProperty { index: usize, reason: &'static str },
    /// The simulation horizon must cover at least one month
    ZeroHorizon,
    Inflation(InflationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            ConfigError::InvalidProperty { index, reason } => {
                write!(f, "property {index}: {reason}")
            }
            ConfigError::ZeroHorizon => write!(f, "horizon must be at least one month"),
            ConfigError::Inflation(e) => write!(f, "inflation: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Inflation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InflationError> for ConfigError {
    fn from(err: InflationError) -> Self {
        ConfigError::Inflation(err)
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
