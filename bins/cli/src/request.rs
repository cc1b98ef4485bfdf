//! JSON request documents and their conversion into domain values.
//!
//! Requests name participants instead of carrying IDs. A [`Roster`] assigns
//! each distinct name one `ParticipantId`, so the same person is matched
//! across every expense in a request.

use std::collections::HashMap;

use chrono::NaiveDate;
use expensio_core::budget::CreatePlanInput;
use expensio_core::currency::ExchangeRate;
use expensio_core::split::{Expense, Participant, parse_total};
use expensio_shared::AppResult;
use expensio_shared::types::{Currency, Money, ParticipantId};
use serde::Deserialize;

/// Maps participant names to stable IDs.
#[derive(Debug, Default)]
pub struct Roster {
    ids: HashMap<String, ParticipantId>,
}

impl Roster {
    /// Returns the ID for `name`, assigning one on first use.
    pub fn id_for(&mut self, name: &str) -> ParticipantId {
        *self
            .ids
            .entry(name.trim().to_string())
            .or_insert_with(ParticipantId::new)
    }
}

/// One shared expense.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRequest {
    /// Currency of the total.
    pub currency: Currency,
    /// Total in major units, e.g. "120.00".
    pub total: String,
    /// Name of the participant who paid.
    pub payer: String,
    /// Participant names in display order.
    pub participants: Vec<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional category.
    #[serde(default)]
    pub category: Option<String>,
    /// Optional date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ExpenseRequest {
    /// Builds the domain expense, resolving names through `roster`.
    pub fn to_expense(&self, roster: &mut Roster) -> AppResult<Expense> {
        let total = parse_total(&self.total, self.currency)?;
        let participants = self
            .participants
            .iter()
            .map(|name| Participant::new(roster.id_for(name), name.trim()))
            .collect();

        let mut expense = Expense::new(total, roster.id_for(&self.payer), participants);
        expense.description.clone_from(&self.description);
        expense.category.clone_from(&self.category);
        expense.date = self.date;
        Ok(expense)
    }
}

/// Request for the `split` command.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// The expense to split.
    #[serde(flatten)]
    pub expense: ExpenseRequest,
    /// Total of the next expense to apply suggestions to, in major units.
    #[serde(default)]
    pub next_total: Option<String>,
    /// Earlier expenses checked for duplicates.
    #[serde(default)]
    pub history: Vec<ExpenseRequest>,
}

/// Request for the `summary` command.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// Expenses to aggregate.
    pub expenses: Vec<ExpenseRequest>,
}

/// Exchange-rate file for the `convert` command.
#[derive(Debug, Deserialize)]
pub struct RatesFile {
    /// Known rates.
    pub rates: Vec<ExchangeRate>,
}

/// An expense recorded against a plan.
#[derive(Debug, Deserialize)]
pub struct PlanExpenseRequest {
    /// Amount in major units.
    pub amount: String,
    /// Description.
    pub description: String,
    /// Date of the expense.
    pub date: NaiveDate,
}

/// Request for the `plan` command.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Plan name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Plan currency.
    pub currency: Currency,
    /// Budget in major units.
    pub budget: String,
    /// Optional category.
    #[serde(default)]
    pub category: Option<String>,
    /// First day of the plan.
    pub start_date: NaiveDate,
    /// Last day of the plan.
    pub end_date: NaiveDate,
    /// Participant names.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Expenses to record, in order.
    #[serde(default)]
    pub expenses: Vec<PlanExpenseRequest>,
}

impl PlanRequest {
    /// Builds the plan creation input.
    pub fn to_input(&self) -> AppResult<CreatePlanInput> {
        Ok(CreatePlanInput {
            name: self.name.clone(),
            description: self.description.clone(),
            budget: Money::parse(&self.budget, self.currency)?,
            category: self.category.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            participants: self.participants.clone(),
        })
    }
}
