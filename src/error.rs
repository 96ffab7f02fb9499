//! Error types for calculation preconditions.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::BillType;

/// Precondition violation raised by a calculator.
///
/// The engine performs no I/O, so every variant describes an input the
/// caller should have validated before asking for a calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("bill from \"{retailer}\" has zero billing days")]
    ZeroBillingDays { retailer: String },

    #[error("bill from \"{retailer}\" has neither billing_days nor a complete billing window")]
    MissingBillingDays { retailer: String },

    #[error("billing window of bill from \"{retailer}\" ends before it starts")]
    InvertedBillingWindow { retailer: String },

    #[error("expected a {expected} bill, got a {found} bill")]
    WrongBillType { expected: BillType, found: BillType },

    #[error("invalid engine configuration: {}", join_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("{field} must be > 0, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Returns `value` when it is strictly positive and finite.
    pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::NonPositive { field, value })
        }
    }

    /// Returns `value` when it is finite and not negative.
    pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(Self::OutOfRange {
                field,
                value,
                min: 0.0,
                max: f64::INFINITY,
            })
        }
    }
}
