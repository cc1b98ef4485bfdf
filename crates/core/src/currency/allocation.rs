//! Amount allocation utilities over integer minor units.
//!
//! Both allocators guarantee that the allocated parts sum EXACTLY to the
//! original total (no cents lost or gained):
//!
//! - `allocate_equal` floors the even share and hands the leftover units to
//!   the first recipients in list order.
//! - `allocate_by_weights` uses the Largest Remainder Method: floor every
//!   proportional share, then give one extra unit to the recipients with the
//!   largest fractional parts (ties go to the earlier recipient).

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocation utility for distributing minor-unit amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` minor units equally across `count` recipients.
    ///
    /// The first `total mod count` recipients receive one extra unit.
    ///
    /// # Example
    ///
    /// ```
    /// use expensio_core::currency::AllocationUtil;
    ///
    /// // 100 cents / 3 = [34, 33, 33]
    /// let result = AllocationUtil::allocate_equal(100, 3);
    /// assert_eq!(result, vec![34, 33, 33]);
    /// ```
    #[must_use]
    pub fn allocate_equal(total: i64, count: usize) -> Vec<i64> {
        if count == 0 {
            return vec![];
        }

        let Ok(divisor) = i64::try_from(count) else {
            return vec![0; count];
        };

        // Euclidean division keeps the remainder in 0..count for negative totals too
        let base = total.div_euclid(divisor);
        let remainder = total.rem_euclid(divisor);
        let extra_count = usize::try_from(remainder).unwrap_or(0);

        (0..count)
            .map(|i| if i < extra_count { base + 1 } else { base })
            .collect()
    }

    /// Allocate `total` minor units in proportion to `weights`.
    ///
    /// Negative weights count as zero. When every weight is zero the total is
    /// allocated equally. A negative total is allocated by magnitude and the
    /// parts negated.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use expensio_core::currency::AllocationUtil;
    ///
    /// let result = AllocationUtil::allocate_by_weights(1000, &[dec!(0.5), dec!(0.3), dec!(0.2)]);
    /// assert_eq!(result, vec![500, 300, 200]);
    /// ```
    #[must_use]
    pub fn allocate_by_weights(total: i64, weights: &[Decimal]) -> Vec<i64> {
        if weights.is_empty() {
            return vec![];
        }
        if total < 0 {
            return Self::allocate_by_weights(total.saturating_neg(), weights)
                .into_iter()
                .map(|part| -part)
                .collect();
        }

        let clamped: Vec<Decimal> = weights.iter().map(|w| (*w).max(Decimal::ZERO)).collect();
        let weight_sum: Decimal = clamped.iter().copied().sum();
        if weight_sum.is_zero() {
            return Self::allocate_equal(total, weights.len());
        }

        let total_dec = Decimal::from(total);

        // Exact proportional shares; the ratio is at most 1 so the product stays in range
        let exact: Vec<Decimal> = clamped
            .iter()
            .map(|w| total_dec * (*w / weight_sum))
            .collect();

        let mut rounded: Vec<i64> = exact
            .iter()
            .map(|share| share.floor().to_i64().unwrap_or(0))
            .collect();

        // Floors normally fall short of the total. Near i64::MAX, Decimal
        // rounding can also push them over, so the gap is signed and summed wide
        let allocated: i128 = rounded.iter().map(|part| i128::from(*part)).sum();
        let gap = i128::from(total) - allocated;
        if gap == 0 {
            return rounded;
        }

        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .enumerate()
            .map(|(i, share)| (i, share.fract()))
            .collect();

        // Stable sort: equal fractions keep list order
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        if gap < 0 {
            // Units come back from the smallest fractions first
            remainders.reverse();
        }

        let step: i64 = if gap > 0 { 1 } else { -1 };
        let mut pending = gap.unsigned_abs();
        for (idx, _) in remainders.iter().cycle() {
            if pending == 0 {
                break;
            }
            if step > 0 || rounded[*idx] > 0 {
                rounded[*idx] += step;
                pending -= 1;
            }
        }

        debug_assert_eq!(rounded.iter().sum::<i64>(), total);
        rounded
    }
}
