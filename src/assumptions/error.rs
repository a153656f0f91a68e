//! Defines the error type for invalid model configuration.
use thiserror::Error;

/// Raised when an assumption set, an override, or a monthly sequence handed to
/// the aggregator cannot describe a valid projection.
///
/// There is no transient failure in this model: every variant means the
/// configuration itself is wrong.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie within [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("{field} must be a whole count that fits its range, got {value}")]
    NotACount { field: &'static str, value: f64 },
    #[error("projection horizon must cover at least one year")]
    EmptyHorizon,
    #[error("projection horizon of {years} years exceeds the maximum of {max}")]
    HorizonTooLong { years: u32, max: u32 },
    #[error("a sequence of {months} months is not a whole number of years")]
    HorizonNotAnnual { months: usize },
    #[error("revenue and cash sequences differ in length ({revenue} vs {cash})")]
    LengthMismatch { revenue: usize, cash: usize },
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("malformed override '{0}', expected 'name*factor' or 'name=value'")]
    MalformedOverride(String),
    #[error("{} invalid assumptions: {}", .0.len(), summarize(.0))]
    Invalid(Vec<ConfigurationError>),
}

fn summarize(errors: &[ConfigurationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}
