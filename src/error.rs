//! Error types for amortization calculations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias used across the crate.
pub type AmortizationResult<T> = Result<T, AmortizationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmortizationError {
    /// A loan parameter or extra payment is outside its valid range.
    #[error("Invalid parameters: {field} - {reason}")]
    InvalidParameters { field: String, reason: String },

    /// The period cap was reached before the balance was paid off.
    #[error("Runaway amortization: {remaining_balance} still owed after {periods} periods")]
    RunawayAmortization {
        periods: u32,
        remaining_balance: Decimal,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AmortizationError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        AmortizationError::InvalidParameters {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AmortizationError {
    fn from(e: serde_json::Error) -> Self {
        AmortizationError::InvalidConfig(e.to_string())
    }
}
