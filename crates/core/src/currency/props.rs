//! Property-based tests for currency operations.
//!
//! - Banker's rounding of conversions lands on the target precision
//! - Allocation sum invariant for equal and weighted allocation

use chrono::NaiveDate;
use expensio_shared::types::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::AllocationUtil;
use super::conversion::convert_money;
use super::exchange::ExchangeRate;

/// Strategy to generate non-negative minor-unit totals (0 to 10,000,000.00).
fn minor_total() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate allocation count (1 to 100).
fn allocation_count() -> impl Strategy<Value = usize> {
    1usize..100
}

/// Strategy to generate 1-10 non-negative weights.
fn weights() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((0u32..1_000).prop_map(|w| Decimal::new(i64::from(w), 2)), 1..10)
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Equal allocation always sums to the total.
    #[test]
    fn prop_allocate_equal_sum_invariant(total in minor_total(), count in allocation_count()) {
        let result = AllocationUtil::allocate_equal(total, count);
        prop_assert_eq!(result.len(), count);
        prop_assert_eq!(result.iter().sum::<i64>(), total);
    }

    /// Equal allocation parts differ by at most one unit and are non-increasing.
    #[test]
    fn prop_allocate_equal_is_fair(total in minor_total(), count in allocation_count()) {
        let result = AllocationUtil::allocate_equal(total, count);
        let max = *result.iter().max().unwrap();
        let min = *result.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert!(result.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Weighted allocation always sums to the total.
    #[test]
    fn prop_allocate_by_weights_sum_invariant(total in minor_total(), weights in weights()) {
        let result = AllocationUtil::allocate_by_weights(total, &weights);
        prop_assert_eq!(result.len(), weights.len());
        prop_assert_eq!(result.iter().sum::<i64>(), total);
        prop_assert!(result.iter().all(|part| *part >= 0));
    }

    /// Conversion is deterministic and never loses the target precision.
    #[test]
    fn prop_convert_money_is_deterministic(
        total in minor_total(),
        rate in positive_rate(),
        from in any_currency(),
        to in any_currency(),
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rate = ExchangeRate::new(from, to, rate, date);
        let money = Money::new(total, from);

        let first = convert_money(money, &rate);
        let second = convert_money(money, &rate);
        prop_assert_eq!(&first, &second);
        if let Ok(converted) = first {
            prop_assert_eq!(converted.currency, to);
            prop_assert!(!converted.is_negative());
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_allocation_matches_worked_example() {
        // 100.00 split three ways -> 33.34 / 33.33 / 33.33
        let parts = AllocationUtil::allocate_equal(10_000, 3);
        assert_eq!(parts, vec![3_334, 3_333, 3_333]);
    }

    #[test]
    fn test_weighted_allocation_matches_percentages() {
        let parts = AllocationUtil::allocate_by_weights(9_999, &[dec!(10), dec!(20), dec!(30), dec!(40)]);
        assert_eq!(parts.iter().sum::<i64>(), 9_999);
    }
}
