//! Budget error types.

use chrono::NaiveDate;
use expensio_shared::AppError;
use expensio_shared::types::{Currency, MoneyError};
use thiserror::Error;

/// Expense plan errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// Plan name is blank.
    #[error("Plan name is required")]
    EmptyName,

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// End date precedes start date.
    #[error("End date {end} is before start date {start}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Plan currency.
        expected: Currency,
        /// Expense currency.
        got: Currency,
    },

    /// Running total left the representable range.
    #[error("Plan spending overflowed")]
    Overflow,
}

impl From<MoneyError> for BudgetError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::CurrencyMismatch { expected, got } => Self::CurrencyMismatch { expected, got },
            _ => Self::Overflow,
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::CurrencyMismatch { .. } | BudgetError::Overflow => {
                Self::BusinessRule(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}
