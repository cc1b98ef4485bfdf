//! Screening data types.

use std::fmt;

use expensio_shared::config::FraudConfig;
use expensio_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Penalty for an amount above the category ceiling.
pub const HIGH_AMOUNT_PENALTY: u32 = 40;

/// Penalty for a likely duplicate.
pub const DUPLICATE_PENALTY: u32 = 50;

/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

/// Verdict derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudVerdict {
    /// Score above the trustworthy threshold.
    Trustworthy,
    /// Score between the two thresholds.
    Doubtful,
    /// Score below the doubtful threshold.
    PotentiallyFraudulent,
}

/// A rule that fired while screening an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FraudFinding {
    /// The amount exceeds the ceiling configured for its category.
    UnusuallyHighAmount {
        /// Category as written on the expense.
        category: String,
        /// Currency the ceiling and amount are expressed in.
        currency: Currency,
        /// Configured ceiling in major units.
        ceiling: Decimal,
        /// Expense amount in major units.
        amount: Decimal,
    },
    /// A matching expense was seen recently.
    DuplicateTransaction,
}

impl FraudFinding {
    /// Points deducted from the score for this finding.
    #[must_use]
    pub const fn penalty(&self) -> u32 {
        match self {
            Self::UnusuallyHighAmount { .. } => HIGH_AMOUNT_PENALTY,
            Self::DuplicateTransaction => DUPLICATE_PENALTY,
        }
    }
}

impl fmt::Display for FraudFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnusuallyHighAmount { .. } => write!(f, "Unusually high amount for this category"),
            Self::DuplicateTransaction => write!(f, "Duplicate transaction detected"),
        }
    }
}

/// Score cut-offs for verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudThresholds {
    /// Scores strictly above this are trustworthy.
    pub trustworthy_above: Decimal,
    /// Scores at or above this are at least doubtful.
    pub doubtful_from: Decimal,
}

impl Default for FraudThresholds {
    fn default() -> Self {
        Self::from_config(&FraudConfig::default())
    }
}

impl FraudThresholds {
    /// Builds thresholds from configuration.
    #[must_use]
    pub const fn from_config(config: &FraudConfig) -> Self {
        Self {
            trustworthy_above: config.trustworthy_above,
            doubtful_from: config.doubtful_from,
        }
    }

    /// Maps a score to a verdict.
    #[must_use]
    pub fn classify(&self, score: Decimal) -> FraudVerdict {
        if score > self.trustworthy_above {
            FraudVerdict::Trustworthy
        } else if score >= self.doubtful_from {
            FraudVerdict::Doubtful
        } else {
            FraudVerdict::PotentiallyFraudulent
        }
    }
}

/// Outcome of screening one expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Score from 0 to 100.
    pub score: Decimal,
    /// Verdict for the score.
    pub verdict: FraudVerdict,
    /// Rules that fired, if the scorer reports them.
    pub findings: Vec<FraudFinding>,
}
