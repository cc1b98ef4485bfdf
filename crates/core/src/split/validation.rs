//! Expense invariants checked before splitting.

use std::collections::HashSet;

use expensio_shared::types::{Currency, Money};

use super::error::SplitError;
use super::types::Expense;

/// Validates that an expense can be split.
///
/// Checks run in order: participants, then amount, then payer membership.
///
/// # Errors
///
/// Returns `SplitError::InvalidParticipants` if the participant list is empty
/// or repeats an identifier, `SplitError::InvalidAmount` if the total is
/// negative, and `SplitError::PayerNotParticipant` if no participant carries
/// the payer's identifier.
pub fn validate_expense(expense: &Expense) -> Result<(), SplitError> {
    if expense.participants.is_empty() {
        return Err(SplitError::InvalidParticipants(
            "expense must have at least one participant".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(expense.participants.len());
    for participant in &expense.participants {
        if !seen.insert(participant.id) {
            return Err(SplitError::InvalidParticipants(format!(
                "participant {} appears more than once",
                participant.id
            )));
        }
    }

    if expense.total.is_negative() {
        return Err(SplitError::InvalidAmount(format!(
            "total must not be negative, got {}",
            expense.total
        )));
    }

    if !seen.contains(&expense.payer) {
        return Err(SplitError::PayerNotParticipant(expense.payer));
    }

    Ok(())
}

/// Parses a user-entered total into money suitable for an expense.
///
/// # Errors
///
/// Returns `SplitError::InvalidAmount` when the text is not a finite decimal,
/// carries more decimals than `currency` allows, is out of range, or is negative.
pub fn parse_total(text: &str, currency: Currency) -> Result<Money, SplitError> {
    let total = Money::parse(text, currency).map_err(|e| SplitError::InvalidAmount(e.to_string()))?;
    if total.is_negative() {
        return Err(SplitError::InvalidAmount(format!(
            "total must not be negative, got {total}"
        )));
    }
    Ok(total)
}
