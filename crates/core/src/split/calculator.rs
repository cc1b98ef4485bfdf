//! Equal-split calculator.
//!
//! The total is divided in minor units. When it does not divide evenly, the
//! leftover units go one each to the first participants in list order, so the
//! fair shares always reconcile to the total.

use expensio_shared::config::SplitConfig;
use expensio_shared::types::Money;

use super::error::SplitError;
use super::types::{Expense, SplitResult, SplitStatus, Tolerance};
use super::validation::validate_expense;
use crate::currency::AllocationUtil;

/// Computes fair shares, balances, and statuses for an expense.
///
/// The calculator holds only its tolerance and is cheap to copy; every call is
/// a pure function of the expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCalculator {
    tolerance: Tolerance,
}

impl SplitCalculator {
    /// Creates a calculator with the given tolerance.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Creates a calculator from configuration.
    #[must_use]
    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(Tolerance::from_config(config))
    }

    /// Returns the configured tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Splits an expense evenly across its participants.
    ///
    /// Returns one result per participant, in the participants' input order.
    ///
    /// # Errors
    ///
    /// See [`validate_expense`].
    pub fn compute_split(&self, expense: &Expense) -> Result<Vec<SplitResult>, SplitError> {
        validate_expense(expense)?;

        let currency = expense.total.currency;
        let total = expense.total.minor_units;
        let shares = AllocationUtil::allocate_equal(total, expense.participants.len());

        let results = expense
            .participants
            .iter()
            .zip(shares)
            .map(|(participant, share)| {
                let paid = if participant.id == expense.payer {
                    total
                } else {
                    0
                };
                // paid and share both lie in 0..=total, so this cannot overflow
                let balance = Money::new(paid - share, currency);

                SplitResult {
                    participant_id: participant.id,
                    name: participant.name.clone(),
                    paid: Money::new(paid, currency),
                    fair_share: Money::new(share, currency),
                    balance,
                    status: self.classify(balance),
                }
            })
            .collect();

        Ok(results)
    }

    /// Classifies a balance against the tolerance band.
    #[must_use]
    pub const fn classify(&self, balance: Money) -> SplitStatus {
        let tolerance = self.tolerance.minor_units(balance.currency);
        if balance.minor_units.unsigned_abs() < tolerance {
            SplitStatus::Balanced
        } else if balance.minor_units > 0 {
            SplitStatus::Overpayer
        } else {
            SplitStatus::Underpayer
        }
    }
}

/// Splits an expense with the default tolerance of one major unit.
///
/// # Errors
///
/// See [`validate_expense`].
pub fn compute_split(expense: &Expense) -> Result<Vec<SplitResult>, SplitError> {
    SplitCalculator::default().compute_split(expense)
}
