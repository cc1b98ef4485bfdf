//! Property-based tests for the split calculator.
//!
//! - Conservation: fair shares sum exactly to the total
//! - Payer consistency: only the payer has paid anything
//! - Order preservation and determinism
//! - Balances sum to zero and statuses agree with the tolerance band

use expensio_shared::types::{Currency, Money, ParticipantId};
use proptest::prelude::*;

use super::calculator::{SplitCalculator, compute_split};
use super::error::SplitError;
use super::types::{Expense, Participant, SplitStatus, Tolerance};

/// Strategy to generate non-negative totals (0 to 10,000,000.00 in cents).
fn minor_total() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate a valid expense: 1-20 participants and a payer among them.
fn valid_expense() -> impl Strategy<Value = Expense> {
    (minor_total(), any_currency(), 1usize..20)
        .prop_flat_map(|(total, currency, count)| (Just(total), Just(currency), Just(count), 0..count))
        .prop_map(|(total, currency, count, payer_idx)| {
            let participants: Vec<Participant> = (0..count)
                .map(|i| Participant::new(ParticipantId::new(), format!("P{i}")))
                .collect();
            let payer = participants[payer_idx].id;
            Expense::new(Money::new(total, currency), payer, participants)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Fair shares always sum exactly to the expense total.
    #[test]
    fn prop_conservation(expense in valid_expense()) {
        let results = compute_split(&expense).unwrap();
        let sum: i64 = results.iter().map(|r| r.fair_share.minor_units).sum();
        prop_assert_eq!(sum, expense.total.minor_units);
    }

    /// Exactly the payer has paid the total; everyone else paid zero.
    #[test]
    fn prop_payer_consistency(expense in valid_expense()) {
        let results = compute_split(&expense).unwrap();
        for result in &results {
            if result.participant_id == expense.payer {
                prop_assert_eq!(result.paid, expense.total);
            } else {
                prop_assert!(result.paid.is_zero());
            }
        }
        let payers = results.iter().filter(|r| r.participant_id == expense.payer).count();
        prop_assert_eq!(payers, 1);
    }

    /// Output order equals input participant order.
    #[test]
    fn prop_order_preserved(expense in valid_expense()) {
        let results = compute_split(&expense).unwrap();
        let input: Vec<ParticipantId> = expense.participants.iter().map(|p| p.id).collect();
        let output: Vec<ParticipantId> = results.iter().map(|r| r.participant_id).collect();
        prop_assert_eq!(input, output);
    }

    /// Identical input yields identical output.
    #[test]
    fn prop_deterministic(expense in valid_expense()) {
        prop_assert_eq!(compute_split(&expense), compute_split(&expense));
    }

    /// Shares differ by at most one minor unit and the larger ones come first.
    #[test]
    fn prop_remainder_goes_to_first_participants(expense in valid_expense()) {
        let results = compute_split(&expense).unwrap();
        let shares: Vec<i64> = results.iter().map(|r| r.fair_share.minor_units).collect();
        let max = *shares.iter().max().unwrap();
        let min = *shares.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Balances sum to zero and each status matches the tolerance band.
    #[test]
    fn prop_balances_and_status(expense in valid_expense(), tolerance in 0u64..10_000) {
        let calculator = SplitCalculator::new(Tolerance::MinorUnits(tolerance));
        let results = calculator.compute_split(&expense).unwrap();

        let sum: i64 = results.iter().map(|r| r.balance.minor_units).sum();
        prop_assert_eq!(sum, 0);

        for result in &results {
            prop_assert_eq!(
                result.balance.minor_units,
                result.paid.minor_units - result.fair_share.minor_units
            );
            let expected = if result.balance.minor_units.unsigned_abs() < tolerance {
                SplitStatus::Balanced
            } else if result.balance.minor_units > 0 {
                SplitStatus::Overpayer
            } else {
                SplitStatus::Underpayer
            };
            prop_assert_eq!(result.status, expected);
        }
    }

    /// An outside payer is always rejected, whatever the amount.
    #[test]
    fn prop_outside_payer_rejected(expense in valid_expense()) {
        let outsider = ParticipantId::new();
        let expense = Expense { payer: outsider, ..expense };
        prop_assert_eq!(compute_split(&expense), Err(SplitError::PayerNotParticipant(outsider)));
    }

    /// Negative totals are always rejected.
    #[test]
    fn prop_negative_total_rejected(expense in valid_expense(), negative in i64::MIN..0) {
        let expense = Expense { total: Money::new(negative, expense.total.currency), ..expense };
        prop_assert!(matches!(compute_split(&expense), Err(SplitError::InvalidAmount(_))));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_three_way_hundred_cents() {
        let participants: Vec<Participant> = ["A", "B", "C"]
            .into_iter()
            .map(|name| Participant::new(ParticipantId::new(), name))
            .collect();
        let expense = Expense::new(Money::new(100, Currency::Usd), participants[0].id, participants);
        let results = compute_split(&expense).unwrap();
        let shares: Vec<i64> = results.iter().map(|r| r.fair_share.minor_units).collect();
        assert_eq!(shares, vec![34, 33, 33]);
    }
}
