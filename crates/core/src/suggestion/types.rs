//! Suggestion data types.

use expensio_shared::config::SuggestionConfig;
use expensio_shared::types::{Money, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::split::SplitStatus;

/// Proposed share of the next expense for one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSuggestion {
    /// Participant ID.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Amount paid on the analysed expense.
    pub paid: Money,
    /// Fair share of the analysed expense.
    pub fair_share: Money,
    /// Status on the analysed expense.
    pub status: SplitStatus,
    /// Proposed fraction of the next expense, rounded to 4 decimal places.
    pub next_split: Decimal,
}

/// A suggestion applied to a concrete next total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedShare {
    /// Participant ID.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Amount this participant should carry.
    pub amount: Money,
}

/// Tuning for the rebalancing suggester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionPolicy {
    /// Lowest ratio proposed for an overpayer.
    pub overpayer_floor: Decimal,
    /// Highest ratio proposed for an underpayer.
    pub underpayer_cap: Decimal,
    /// Fraction of an overpayer's surplus credited against the next split.
    pub overpayer_damping: Decimal,
    /// Fraction of an underpayer's deficit added to the next split.
    pub underpayer_damping: Decimal,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self::from_config(&SuggestionConfig::default())
    }
}

impl SuggestionPolicy {
    /// Builds the policy from configuration.
    #[must_use]
    pub const fn from_config(config: &SuggestionConfig) -> Self {
        Self {
            overpayer_floor: config.overpayer_floor,
            underpayer_cap: config.underpayer_cap,
            overpayer_damping: config.overpayer_damping,
            underpayer_damping: config.underpayer_damping,
        }
    }
}
