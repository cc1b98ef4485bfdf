//! Net balances across several splits.
//!
//! Dashboard totals ("you owe", "you are owed") are the per-participant sum
//! of balances over every split the participant took part in.

use std::collections::HashMap;

use expensio_shared::types::{Currency, Money, MoneyError, ParticipantId};
use serde::{Deserialize, Serialize};

use super::types::SplitResult;

/// What a participant must do to settle up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementDirection {
    /// Others owe this participant money.
    Collect,
    /// This participant owes others money.
    Owe,
    /// Nothing outstanding.
    Settled,
}

/// A participant's net position over several splits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
    /// Participant ID.
    pub participant_id: ParticipantId,
    /// Display name as first seen.
    pub name: String,
    /// Sum of balances; positive means the participant is owed money.
    pub net: Money,
    /// Settlement direction derived from the sign of `net`.
    pub direction: SettlementDirection,
}

/// Aggregates split results into net positions.
///
/// Positions are returned in the order participants are first seen. Since
/// every split's balances sum to zero, so do the returned positions.
///
/// # Errors
///
/// Returns `MoneyError::CurrencyMismatch` if the results mix currencies and
/// `MoneyError::Overflow` if a running sum leaves the `i64` range.
pub fn summarize_balances<'a, I>(results: I) -> Result<Vec<NetPosition>, MoneyError>
where
    I: IntoIterator<Item = &'a SplitResult>,
{
    let mut positions: Vec<NetPosition> = Vec::new();
    let mut index: HashMap<ParticipantId, usize> = HashMap::new();
    let mut currency: Option<Currency> = None;

    for result in results {
        let got = result.balance.currency;
        match currency {
            Some(expected) if expected != got => {
                return Err(MoneyError::CurrencyMismatch { expected, got });
            }
            Some(_) => {}
            None => currency = Some(got),
        }

        if let Some(&slot) = index.get(&result.participant_id) {
            let position = &mut positions[slot];
            position.net = position.net.checked_add(result.balance)?;
        } else {
            index.insert(result.participant_id, positions.len());
            positions.push(NetPosition {
                participant_id: result.participant_id,
                name: result.name.clone(),
                net: result.balance,
                direction: SettlementDirection::Settled,
            });
        }
    }

    for position in &mut positions {
        position.direction = direction_of(position.net);
    }

    Ok(positions)
}

const fn direction_of(net: Money) -> SettlementDirection {
    if net.is_positive() {
        SettlementDirection::Collect
    } else if net.is_negative() {
        SettlementDirection::Owe
    } else {
        SettlementDirection::Settled
    }
}
