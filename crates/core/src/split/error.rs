//! Split error types.

use expensio_shared::AppError;
use expensio_shared::types::ParticipantId;
use thiserror::Error;

/// Errors that can occur while splitting an expense.
///
/// All of them are deterministic: retrying the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The participant list is empty or contains the same participant twice.
    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),

    /// The payer is not one of the participants.
    #[error("Payer {0} is not a participant in this expense")]
    PayerNotParticipant(ParticipantId),

    /// The total is negative or not a finite amount in the expense currency.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<SplitError> for AppError {
    fn from(err: SplitError) -> Self {
        Self::Validation(err.to_string())
    }
}
