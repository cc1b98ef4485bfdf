//! Budget data types.

use chrono::NaiveDate;
use expensio_shared::types::{Money, PlannedExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category given to plans created without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Lifecycle of an expense plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Before the start date.
    Planning,
    /// Within the date range and under budget.
    Active,
    /// Spending passed the budget.
    Exceeded,
    /// After the end date.
    Completed,
}

/// An expense recorded against a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExpense {
    /// Expense ID.
    pub id: PlannedExpenseId,
    /// Amount spent.
    pub amount: Money,
    /// Description.
    pub description: String,
    /// Date of the expense.
    pub date: NaiveDate,
    /// Category, inherited from the plan.
    pub category: String,
}

/// Input for creating a new plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanInput {
    /// Plan name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Spending limit.
    pub budget: Money,
    /// Category; defaults to [`DEFAULT_CATEGORY`].
    #[serde(default)]
    pub category: Option<String>,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Last day of the plan.
    pub end_date: NaiveDate,
    /// Participant names; blank entries are dropped.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Result of recording an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseOutcome {
    /// ID of the recorded expense.
    pub expense_id: PlannedExpenseId,
    /// Total spent after the expense.
    pub spent: Money,
    /// Plan status after the expense.
    pub status: PlanStatus,
    /// Amount over budget, if the budget is now exceeded.
    pub overrun: Option<Money>,
}

/// Budget variance result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// `budgeted - actual`.
    pub variance: Decimal,
    /// Variance percentage.
    pub variance_percent: Decimal,
    /// Utilization percentage.
    pub utilization_percent: Decimal,
    /// Variance status.
    pub status: VarianceStatus,
}

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Under budget.
    Favorable,
    /// Over budget.
    Unfavorable,
    /// Exactly on budget.
    OnBudget,
}

/// One step of the cumulative spending series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// "Expense N", numbered from 1 in date order.
    pub label: String,
    /// Date of the expense.
    pub date: NaiveDate,
    /// Spending up to and including this expense.
    pub cumulative: Money,
    /// Plan budget, for charting against.
    pub budget: Money,
}

/// Total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpend {
    /// Category name.
    pub category: String,
    /// Amount spent.
    pub amount: Money,
}
