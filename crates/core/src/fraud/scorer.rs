//! Expense scorers.

use std::collections::BTreeMap;

use expensio_shared::AppResult;
use expensio_shared::config::FraudConfig;
use expensio_shared::types::Currency;
use rust_decimal::Decimal;

use super::types::{FraudAssessment, FraudFinding, FraudThresholds, MAX_SCORE};
use crate::split::Expense;

/// Rates how trustworthy an expense looks.
pub trait ExpenseScorer {
    /// Returns a score from 0 to 100; higher is more trustworthy.
    fn score(&self, expense: &Expense) -> Decimal;

    /// Rules that fired for `expense`. Scorers without explanations
    /// return nothing.
    fn findings(&self, _expense: &Expense) -> Vec<FraudFinding> {
        Vec::new()
    }
}

/// Scores an expense and classifies the result.
pub fn assess<S>(scorer: &S, thresholds: &FraudThresholds, expense: &Expense) -> FraudAssessment
where
    S: ExpenseScorer + ?Sized,
{
    let score = scorer.score(expense);
    FraudAssessment {
        score,
        verdict: thresholds.classify(score),
        findings: scorer.findings(expense),
    }
}

/// Deducts fixed penalties from 100 for each rule that fires.
///
/// Rules:
/// - the amount is above the ceiling for its currency and category (matched
///   without case); currencies without ceilings skip this rule
/// - the same payer recorded the same total and description within the
///   duplicate window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBasedScorer {
    ceilings: BTreeMap<(Currency, String), Decimal>,
    recent: Vec<Expense>,
    duplicate_window_days: u32,
}

impl RuleBasedScorer {
    /// Creates a scorer with no ceilings, no history, and a same-day
    /// duplicate window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scorer from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if a ceiling names an unknown
    /// currency or is negative.
    pub fn from_config(config: &FraudConfig) -> AppResult<Self> {
        let mut scorer = Self::new().with_duplicate_window(config.duplicate_window_days);
        for (currency, category, ceiling) in config.ceilings()? {
            scorer = scorer.with_ceiling(currency, category, ceiling);
        }
        Ok(scorer)
    }

    /// Sets the ceiling for a category, in major units of `currency`.
    #[must_use]
    pub fn with_ceiling(mut self, currency: Currency, category: &str, ceiling: Decimal) -> Self {
        self.ceilings.insert((currency, category_key(category)), ceiling);
        self
    }

    /// Sets the duplicate window in days.
    #[must_use]
    pub fn with_duplicate_window(mut self, days: u32) -> Self {
        self.duplicate_window_days = days;
        self
    }

    /// Adds expenses to compare against for duplicates.
    #[must_use]
    pub fn with_recent(mut self, expenses: impl IntoIterator<Item = Expense>) -> Self {
        self.recent.extend(expenses);
        self
    }

    /// Records an expense as seen.
    pub fn record(&mut self, expense: Expense) {
        self.recent.push(expense);
    }

    fn high_amount(&self, expense: &Expense) -> Option<FraudFinding> {
        let category = expense.category.as_deref()?;
        let currency = expense.total.currency;
        let ceiling = *self.ceilings.get(&(currency, category_key(category)))?;
        let amount = expense.total.to_decimal();

        (amount > ceiling).then(|| FraudFinding::UnusuallyHighAmount {
            category: category.to_string(),
            currency,
            ceiling,
            amount,
        })
    }

    fn is_duplicate(&self, expense: &Expense) -> bool {
        let description = description_key(expense);
        self.recent.iter().any(|seen| {
            seen.payer == expense.payer
                && seen.total == expense.total
                && description_key(seen) == description
                && self.within_window(seen, expense)
        })
    }

    fn within_window(&self, a: &Expense, b: &Expense) -> bool {
        match (a.date, b.date) {
            (Some(a), Some(b)) => {
                (a - b).num_days().unsigned_abs() <= u64::from(self.duplicate_window_days)
            }
            _ => true,
        }
    }
}

impl ExpenseScorer for RuleBasedScorer {
    fn score(&self, expense: &Expense) -> Decimal {
        let penalty: u32 = self.findings(expense).iter().map(FraudFinding::penalty).sum();
        Decimal::from(MAX_SCORE.saturating_sub(penalty))
    }

    fn findings(&self, expense: &Expense) -> Vec<FraudFinding> {
        let mut findings = Vec::new();
        if let Some(finding) = self.high_amount(expense) {
            findings.push(finding);
        }
        if self.is_duplicate(expense) {
            findings.push(FraudFinding::DuplicateTransaction);
        }
        findings
    }
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

fn description_key(expense: &Expense) -> String {
    expense
        .description
        .as_deref()
        .map(|d| d.trim().to_lowercase())
        .unwrap_or_default()
}
