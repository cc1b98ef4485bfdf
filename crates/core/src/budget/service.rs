//! Budget service for variance calculation and validation.

use expensio_shared::types::Money;
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{VarianceResult, VarianceStatus};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Calculate variance between budgeted and spent amounts.
    ///
    /// variance = budgeted - actual
    ///   - Positive variance (under budget) is favorable
    ///   - Negative variance (over budget) is unfavorable
    #[must_use]
    pub fn calculate_variance(budgeted: Decimal, actual: Decimal) -> VarianceResult {
        let variance = budgeted - actual;

        let status = match variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => VarianceStatus::Favorable,
            std::cmp::Ordering::Less => VarianceStatus::Unfavorable,
            std::cmp::Ordering::Equal => VarianceStatus::OnBudget,
        };

        let variance_percent = if budgeted.is_zero() {
            Decimal::ZERO
        } else {
            (variance / budgeted * Decimal::ONE_HUNDRED).round_dp(2)
        };

        VarianceResult {
            budgeted,
            actual,
            variance,
            variance_percent,
            utilization_percent: Self::utilization_percent(budgeted, actual),
            status,
        }
    }

    /// `actual / budgeted * 100`, rounded to 2 places; zero for a zero budget.
    #[must_use]
    pub fn utilization_percent(budgeted: Decimal, actual: Decimal) -> Decimal {
        if budgeted.is_zero() {
            Decimal::ZERO
        } else {
            (actual / budgeted * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Validate an amount recorded against a plan.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` if the amount is negative.
    /// Returns `BudgetError::CurrencyMismatch` if it is not in the plan currency.
    pub fn validate_amount(plan_budget: Money, amount: Money) -> Result<(), BudgetError> {
        if amount.is_negative() {
            return Err(BudgetError::NegativeAmount);
        }

        if amount.currency != plan_budget.currency {
            return Err(BudgetError::CurrencyMismatch {
                expected: plan_budget.currency,
                got: amount.currency,
            });
        }

        Ok(())
    }
}
