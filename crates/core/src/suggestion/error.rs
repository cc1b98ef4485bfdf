//! Suggestion error types.

use expensio_shared::AppError;
use thiserror::Error;

/// Errors raised when applying suggestions to a new total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    /// There are no suggestions to apply.
    #[error("No suggestions to apply")]
    NoSuggestions,

    /// The next total is negative.
    #[error("Next total must not be negative")]
    NegativeTotal,
}

impl From<SuggestionError> for AppError {
    fn from(err: SuggestionError) -> Self {
        Self::Validation(err.to_string())
    }
}
