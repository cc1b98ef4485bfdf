//! Split data types.

use chrono::NaiveDate;
use expensio_shared::config::SplitConfig;
use expensio_shared::types::{Currency, Money, ParticipantId};
use serde::{Deserialize, Serialize};

/// A person sharing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier, unique within one split.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
}

impl Participant {
    /// Creates a participant.
    #[must_use]
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A shared expense paid by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Total amount paid.
    pub total: Money,
    /// Participant who paid the total.
    pub payer: ParticipantId,
    /// Participants sharing the expense, in display order.
    pub participants: Vec<Participant>,
    /// Optional description (e.g. "Dinner at Olive Garden").
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category (e.g. "Food").
    #[serde(default)]
    pub category: Option<String>,
    /// Optional date the expense was incurred.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Expense {
    /// Creates an expense without description, category, or date.
    #[must_use]
    pub const fn new(total: Money, payer: ParticipantId, participants: Vec<Participant>) -> Self {
        Self {
            total,
            payer,
            participants,
            description: None,
            category: None,
            date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Classification of a participant's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStatus {
    /// Paid more than their fair share.
    Overpayer,
    /// Paid less than their fair share.
    Underpayer,
    /// Within the tolerance band of their fair share.
    Balanced,
}

/// Per-participant outcome of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    /// Participant ID.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Amount paid: the expense total for the payer, zero otherwise.
    pub paid: Money,
    /// Even share of the total.
    pub fair_share: Money,
    /// `paid - fair_share`; positive means overpaid.
    pub balance: Money,
    /// Balance classification.
    pub status: SplitStatus,
}

/// Width of the band around zero within which a balance counts as balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// One major unit of the expense currency (100 cents, 1 yen).
    #[default]
    OneMajorUnit,
    /// A fixed number of minor units regardless of currency.
    MinorUnits(u64),
}

impl Tolerance {
    /// Builds the tolerance from configuration.
    #[must_use]
    pub fn from_config(config: &SplitConfig) -> Self {
        config
            .tolerance_minor_units
            .map_or(Self::OneMajorUnit, Self::MinorUnits)
    }

    /// Tolerance in minor units of `currency`.
    #[must_use]
    pub const fn minor_units(self, currency: Currency) -> u64 {
        match self {
            Self::OneMajorUnit => currency.minor_units_per_major().unsigned_abs(),
            Self::MinorUnits(units) => units,
        }
    }
}
