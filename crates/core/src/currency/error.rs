//! Currency conversion error types.

use chrono::NaiveDate;
use expensio_shared::AppError;
use expensio_shared::types::{Currency, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by rate lookup and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Rate must be positive.
    #[error("Exchange rate must be positive, got {0}")]
    NonPositiveRate(Decimal),

    /// A stored rate must convert between two different currencies.
    #[error("From and to currencies must be different")]
    SameCurrency,

    /// The amount is not in the rate's source currency.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Rate source currency.
        expected: Currency,
        /// Currency of the amount.
        got: Currency,
    },

    /// No direct, inverse, or triangulated rate exists.
    #[error("No exchange rate found for {from}/{to} on or before {date}")]
    RateNotFound {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Lookup date.
        date: NaiveDate,
    },

    /// Converted amount does not fit in minor units.
    #[error("Converted amount is out of range")]
    Overflow,
}

impl From<MoneyError> for ConversionError {
    fn from(_: MoneyError) -> Self {
        Self::Overflow
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::RateNotFound { .. } => Self::NotFound(err.to_string()),
            ConversionError::CurrencyMismatch { .. } => Self::BusinessRule(err.to_string()),
            ConversionError::NonPositiveRate(_)
            | ConversionError::SameCurrency
            | ConversionError::Overflow => Self::Validation(err.to_string()),
        }
    }
}
