//! Suggestion strategies.

use expensio_shared::types::Money;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SuggestionError;
use super::types::{SplitSuggestion, SuggestedShare, SuggestionPolicy};
use crate::currency::AllocationUtil;
use crate::split::{SplitResult, SplitStatus};

/// Decimal places kept on proposed ratios.
const RATIO_PLACES: u32 = 4;

/// Strategy that proposes next-split ratios from a computed split.
pub trait SplitSuggester {
    /// Returns one suggestion per result, in the same order.
    fn suggest(&self, results: &[SplitResult]) -> Vec<SplitSuggestion>;
}

/// Shifts the next split away from overpayers and toward underpayers.
///
/// - Balanced: `1 / n`
/// - Overpayer: `max(floor, (fair_share - balance * overpayer_damping) / total)`
/// - Underpayer: `min(cap, (fair_share - balance * underpayer_damping) / total)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebalancingSuggester {
    policy: SuggestionPolicy,
}

impl RebalancingSuggester {
    /// Creates a suggester with the given policy.
    #[must_use]
    pub const fn new(policy: SuggestionPolicy) -> Self {
        Self { policy }
    }

    fn ratio(&self, result: &SplitResult, total: Decimal, equal: Decimal) -> Decimal {
        let fair_share = result.fair_share.to_decimal();
        let balance = result.balance.to_decimal();
        let policy = &self.policy;

        match result.status {
            SplitStatus::Balanced => equal,
            SplitStatus::Overpayer => {
                damped_ratio(fair_share, balance, policy.overpayer_damping, total)
                    .map_or(policy.overpayer_floor, |r| r.max(policy.overpayer_floor))
            }
            SplitStatus::Underpayer => {
                damped_ratio(fair_share, balance, policy.underpayer_damping, total)
                    .map_or(policy.underpayer_cap, |r| r.min(policy.underpayer_cap))
            }
        }
    }
}

impl SplitSuggester for RebalancingSuggester {
    fn suggest(&self, results: &[SplitResult]) -> Vec<SplitSuggestion> {
        let equal = equal_ratio(results.len());
        let total: Decimal = results.iter().map(|r| r.fair_share.to_decimal()).sum();

        results
            .iter()
            .map(|result| {
                let ratio = if total.is_zero() {
                    equal
                } else {
                    self.ratio(result, total, equal)
                };
                suggestion(result, ratio)
            })
            .collect()
    }
}

/// Proposes an even split regardless of history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualSuggester;

impl SplitSuggester for EqualSuggester {
    fn suggest(&self, results: &[SplitResult]) -> Vec<SplitSuggestion> {
        let equal = equal_ratio(results.len());
        results.iter().map(|r| suggestion(r, equal)).collect()
    }
}

/// Turns suggested ratios into concrete amounts of `next_total`.
///
/// Ratios are used as weights, so they need not sum to one; the amounts
/// always sum exactly to `next_total`.
pub fn apply_suggestions(
    suggestions: &[SplitSuggestion],
    next_total: Money,
) -> Result<Vec<SuggestedShare>, SuggestionError> {
    if suggestions.is_empty() {
        return Err(SuggestionError::NoSuggestions);
    }
    if next_total.is_negative() {
        return Err(SuggestionError::NegativeTotal);
    }

    let weights: Vec<Decimal> = suggestions.iter().map(|s| s.next_split).collect();
    let amounts = AllocationUtil::allocate_by_weights(next_total.minor_units, &weights);

    Ok(suggestions
        .iter()
        .zip(amounts)
        .map(|(s, amount)| SuggestedShare {
            participant_id: s.participant_id,
            name: s.name.clone(),
            amount: Money::new(amount, next_total.currency),
        })
        .collect())
}

/// `(fair_share - balance * damping) / total`, or `None` on overflow.
fn damped_ratio(
    fair_share: Decimal,
    balance: Decimal,
    damping: Decimal,
    total: Decimal,
) -> Option<Decimal> {
    fair_share
        .checked_sub(balance.checked_mul(damping)?)?
        .checked_div(total)
}

fn equal_ratio(count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round_ratio(Decimal::ONE / Decimal::from(count))
}

fn round_ratio(ratio: Decimal) -> Decimal {
    ratio.round_dp_with_strategy(RATIO_PLACES, RoundingStrategy::MidpointNearestEven)
}

fn suggestion(result: &SplitResult, ratio: Decimal) -> SplitSuggestion {
    SplitSuggestion {
        participant_id: result.participant_id,
        name: result.name.clone(),
        paid: result.paid,
        fair_share: result.fair_share,
        status: result.status,
        next_split: round_ratio(ratio),
    }
}
