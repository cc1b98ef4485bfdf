//! Expense plans: budgets for upcoming shared spending.
//!
//! A plan has a budget, a date range, and the expenses recorded against it.
//! Its status follows the calendar until spending passes the budget, after
//! which it stays `Exceeded`.

pub mod error;
pub mod plan;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use plan::ExpensePlan;
pub use service::BudgetService;
pub use types::{
    CategorySpend, CreatePlanInput, CumulativePoint, DEFAULT_CATEGORY, ExpenseOutcome, PlanStatus,
    PlannedExpense, VarianceResult, VarianceStatus,
};
