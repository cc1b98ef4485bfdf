//! Expense plan aggregate.

use chrono::NaiveDate;
use expensio_shared::types::{Money, PlanId, PlannedExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{
    CategorySpend, CreatePlanInput, CumulativePoint, DEFAULT_CATEGORY, ExpenseOutcome, PlanStatus,
    PlannedExpense, VarianceResult,
};

/// A budget for upcoming shared spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensePlan {
    /// Plan ID.
    pub id: PlanId,
    /// Plan name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Spending limit.
    pub budget: Money,
    /// Total recorded so far.
    pub spent: Money,
    /// Category applied to recorded expenses.
    pub category: String,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Last day of the plan.
    pub end_date: NaiveDate,
    /// Participant names.
    pub participants: Vec<String>,
    /// Recorded expenses, in insertion order.
    pub expenses: Vec<PlannedExpense>,
    /// Current status.
    pub status: PlanStatus,
}

impl ExpensePlan {
    /// Creates a plan in `Planning` status with nothing spent.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::EmptyName` for a blank name,
    /// `BudgetError::NegativeAmount` for a negative budget, and
    /// `BudgetError::InvalidDateRange` when the end precedes the start.
    pub fn create(input: CreatePlanInput) -> Result<Self, BudgetError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(BudgetError::EmptyName);
        }
        if input.budget.is_negative() {
            return Err(BudgetError::NegativeAmount);
        }
        if input.end_date < input.start_date {
            return Err(BudgetError::InvalidDateRange {
                start: input.start_date,
                end: input.end_date,
            });
        }

        let category = input
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        let participants = input
            .participants
            .iter()
            .map(String::as_str)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            id: PlanId::new(),
            name: name.to_string(),
            description: input.description,
            budget: input.budget,
            spent: Money::zero(input.budget.currency),
            category,
            start_date: input.start_date,
            end_date: input.end_date,
            participants,
            expenses: Vec::new(),
            status: PlanStatus::Planning,
        })
    }

    /// Records an expense against the plan.
    ///
    /// The plan moves to `Exceeded` as soon as spending passes the budget;
    /// the outcome then carries the overrun.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount`, `BudgetError::CurrencyMismatch`,
    /// or `BudgetError::Overflow`.
    pub fn add_expense(
        &mut self,
        amount: Money,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<ExpenseOutcome, BudgetError> {
        BudgetService::validate_amount(self.budget, amount)?;
        let spent = self.spent.checked_add(amount)?;

        let expense = PlannedExpense {
            id: PlannedExpenseId::new(),
            amount,
            description: description.into(),
            date,
            category: self.category.clone(),
        };
        let expense_id = expense.id;

        self.expenses.push(expense);
        self.spent = spent;
        if self.is_over_budget() {
            self.status = PlanStatus::Exceeded;
        }

        Ok(ExpenseOutcome {
            expense_id,
            spent,
            status: self.status,
            overrun: self.over_budget_by(),
        })
    }

    /// Recomputes the status for `today` and returns it.
    pub fn refresh_status(&mut self, today: NaiveDate) -> PlanStatus {
        self.status = if self.is_over_budget() {
            PlanStatus::Exceeded
        } else if today < self.start_date {
            PlanStatus::Planning
        } else if today > self.end_date {
            PlanStatus::Completed
        } else {
            PlanStatus::Active
        };
        self.status
    }

    /// Whether spending is strictly above the budget.
    #[must_use]
    pub const fn is_over_budget(&self) -> bool {
        self.spent.minor_units > self.budget.minor_units
    }

    /// Amount spent beyond the budget, if any.
    #[must_use]
    pub fn over_budget_by(&self) -> Option<Money> {
        if !self.is_over_budget() {
            return None;
        }
        self.spent.checked_sub(self.budget).ok()
    }

    /// Share of the budget spent, as a percentage rounded to 2 places.
    #[must_use]
    pub fn utilization_percent(&self) -> Decimal {
        BudgetService::utilization_percent(self.budget.to_decimal(), self.spent.to_decimal())
    }

    /// Budget against spending in major units.
    #[must_use]
    pub fn variance(&self) -> VarianceResult {
        BudgetService::calculate_variance(self.budget.to_decimal(), self.spent.to_decimal())
    }

    /// Running total of spending in date order.
    ///
    /// Expenses on the same date keep their recording order.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Overflow` if the running total overflows.
    pub fn cumulative_spending(&self) -> Result<Vec<CumulativePoint>, BudgetError> {
        let mut sorted: Vec<&PlannedExpense> = self.expenses.iter().collect();
        sorted.sort_by_key(|e| e.date);

        let mut running = Money::zero(self.budget.currency);
        let mut points = Vec::with_capacity(sorted.len());
        for (i, expense) in sorted.into_iter().enumerate() {
            running = running.checked_add(expense.amount)?;
            points.push(CumulativePoint {
                label: format!("Expense {}", i + 1),
                date: expense.date,
                cumulative: running,
                budget: self.budget,
            });
        }
        Ok(points)
    }

    /// Spending per category, in the order categories first appear.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Overflow` if a category total overflows.
    pub fn spending_by_category(&self) -> Result<Vec<CategorySpend>, BudgetError> {
        let mut totals: Vec<CategorySpend> = Vec::new();
        for expense in &self.expenses {
            match totals.iter_mut().find(|t| t.category == expense.category) {
                Some(total) => total.amount = total.amount.checked_add(expense.amount)?,
                None => totals.push(CategorySpend {
                    category: expense.category.clone(),
                    amount: expense.amount,
                }),
            }
        }
        Ok(totals)
    }
}
