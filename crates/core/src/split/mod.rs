//! Equal-split calculation for shared expenses.
//!
//! This module implements the fair-share core:
//! - Domain types for expenses, participants, and per-participant results
//! - Validation of expense invariants
//! - The split calculator with its balance tolerance band
//! - Net balance summaries across several splits

pub mod calculator;
pub mod error;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

pub use calculator::{SplitCalculator, compute_split};
pub use error::SplitError;
pub use summary::{NetPosition, SettlementDirection, summarize_balances};
pub use types::{Expense, Participant, SplitResult, SplitStatus, Tolerance};
pub use validation::{parse_total, validate_expense};
