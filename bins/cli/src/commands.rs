//! Subcommand handlers.
//!
//! Each handler turns a request into a serializable report. Handlers do not
//! print; `main` owns output and exit codes.

use chrono::NaiveDate;
use expensio_core::budget::{CategorySpend, CumulativePoint, ExpensePlan, PlanStatus, VarianceResult};
use expensio_core::currency::{ExchangeRate, RateTable};
use expensio_core::fraud::{FraudAssessment, FraudThresholds, FraudVerdict, RuleBasedScorer, assess};
use expensio_core::split::{NetPosition, SplitCalculator, SplitResult, summarize_balances};
use expensio_core::suggestion::{
    RebalancingSuggester, SplitSuggester, SplitSuggestion, SuggestedShare, SuggestionPolicy,
    apply_suggestions,
};
use expensio_shared::types::{Currency, Money};
use expensio_shared::{AppConfig, AppResult};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::request::{PlanRequest, RatesFile, Roster, SplitRequest, SummaryRequest};

/// Output of the `split` command.
#[derive(Debug, Serialize)]
pub struct SplitReport {
    /// Per-participant results.
    pub results: Vec<SplitResult>,
    /// Proposed ratios for the next expense.
    pub suggestions: Vec<SplitSuggestion>,
    /// Suggestions applied to `next_total`, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_shares: Option<Vec<SuggestedShare>>,
    /// Screening outcome.
    pub fraud: FraudAssessment,
}

/// Output of the `summary` command.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    /// Net position per participant.
    pub positions: Vec<NetPosition>,
}

/// Output of the `convert` command.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    /// Amount converted.
    pub source: Money,
    /// Converted amount.
    pub converted: Money,
    /// Rate used.
    pub rate: ExchangeRate,
}

/// Output of the `plan` command.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    /// Plan with its recorded expenses.
    pub plan: ExpensePlan,
    /// Budget used, in percent.
    pub utilization_percent: Decimal,
    /// Overrun, if over budget.
    pub over_budget_by: Option<Money>,
    /// Budget against spending.
    pub variance: VarianceResult,
    /// Running total by date.
    pub cumulative: Vec<CumulativePoint>,
    /// Spending per category.
    pub by_category: Vec<CategorySpend>,
}

/// Splits an expense, screens it, and proposes the next split.
pub fn split(config: &AppConfig, request: &SplitRequest) -> AppResult<SplitReport> {
    let mut roster = Roster::default();
    let expense = request.expense.to_expense(&mut roster)?;
    let history = request
        .history
        .iter()
        .map(|past| past.to_expense(&mut roster))
        .collect::<AppResult<Vec<_>>>()?;

    let calculator = SplitCalculator::from_config(&config.split);
    let results = calculator.compute_split(&expense)?;
    info!(
        total = %expense.total,
        participants = results.len(),
        "Computed split"
    );

    let suggester = RebalancingSuggester::new(SuggestionPolicy::from_config(&config.suggestion));
    let suggestions = suggester.suggest(&results);

    let next_shares = match &request.next_total {
        Some(text) => {
            let next_total = Money::parse(text, expense.total.currency)?;
            Some(apply_suggestions(&suggestions, next_total)?)
        }
        None => None,
    };

    let scorer = RuleBasedScorer::from_config(&config.fraud)?.with_recent(history);
    let fraud = assess(&scorer, &FraudThresholds::from_config(&config.fraud), &expense);
    log_assessment(&fraud);

    Ok(SplitReport {
        results,
        suggestions,
        next_shares,
        fraud,
    })
}

fn log_assessment(assessment: &FraudAssessment) {
    if assessment.verdict == FraudVerdict::Trustworthy {
        debug!(score = %assessment.score, "Expense looks trustworthy");
        return;
    }
    for finding in &assessment.findings {
        warn!(score = %assessment.score, verdict = ?assessment.verdict, "{finding}");
    }
}

/// Aggregates several expenses into net positions.
pub fn summary(config: &AppConfig, request: &SummaryRequest) -> AppResult<SummaryReport> {
    let mut roster = Roster::default();
    let calculator = SplitCalculator::from_config(&config.split);

    let mut results = Vec::new();
    for entry in &request.expenses {
        let expense = entry.to_expense(&mut roster)?;
        results.extend(calculator.compute_split(&expense)?);
    }

    let positions = summarize_balances(&results)?;
    info!(
        expenses = request.expenses.len(),
        participants = positions.len(),
        "Summarized balances"
    );
    Ok(SummaryReport { positions })
}

/// Converts an amount using a rate file.
pub fn convert(
    amount: &str,
    from: Currency,
    to: Currency,
    date: NaiveDate,
    rates: RatesFile,
) -> AppResult<ConversionReport> {
    let source = Money::parse(amount, from)?;

    let mut table = RateTable::new();
    for rate in rates.rates {
        table.insert(rate)?;
    }
    debug!(rates = table.len(), "Loaded exchange rates");

    let rate = table.find_rate(from, to, date)?;
    let converted = table.convert(source, to, date)?;
    info!(%source, %converted, rate = %rate.rate, "Converted amount");

    Ok(ConversionReport {
        source,
        converted,
        rate,
    })
}

/// Builds a plan, records its expenses, and reports on it.
pub fn plan(request: &PlanRequest, today: NaiveDate) -> AppResult<PlanReport> {
    let mut plan = ExpensePlan::create(request.to_input()?)?;

    for entry in &request.expenses {
        let amount = Money::parse(&entry.amount, plan.budget.currency)?;
        let outcome = plan.add_expense(amount, entry.description.clone(), entry.date)?;
        if let Some(overrun) = outcome.overrun {
            warn!(plan = %plan.name, %overrun, "Budget exceeded");
        }
    }

    let status = plan.refresh_status(today);
    info!(plan = %plan.name, status = ?status, spent = %plan.spent, "Evaluated plan");
    if status == PlanStatus::Completed {
        debug!(plan = %plan.name, "Plan period has ended");
    }

    Ok(PlanReport {
        utilization_percent: plan.utilization_percent(),
        over_budget_by: plan.over_budget_by(),
        variance: plan.variance(),
        cumulative: plan.cumulative_spending()?,
        by_category: plan.spending_by_category()?,
        plan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ExpenseRequest;
    use expensio_core::split::SplitStatus;
    use expensio_shared::AppError;
    use rust_decimal_macros::dec;

    fn expense(total: &str, payer: &str, names: &[&str]) -> ExpenseRequest {
        ExpenseRequest {
            currency: Currency::Usd,
            total: total.to_string(),
            payer: payer.to_string(),
            participants: names.iter().map(ToString::to_string).collect(),
            description: Some("Dinner".to_string()),
            category: Some("Food".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
        }
    }

    #[test]
    fn test_split_report() {
        let request = SplitRequest {
            expense: expense("300", "A", &["A", "B", "C"]),
            next_total: Some("90".to_string()),
            history: Vec::new(),
        };
        let report = split(&AppConfig::default(), &request).unwrap();

        assert_eq!(report.results[0].status, SplitStatus::Overpayer);
        assert_eq!(report.suggestions[0].next_split, dec!(0.1333));
        let shares = report.next_shares.unwrap();
        assert_eq!(
            shares.iter().map(|s| s.amount.minor_units).sum::<i64>(),
            9_000
        );
        assert_eq!(report.fraud.verdict, FraudVerdict::Trustworthy);
    }

    #[test]
    fn test_split_flags_duplicate_from_history() {
        let request = SplitRequest {
            expense: expense("300", "A", &["A", "B"]),
            next_total: None,
            history: vec![expense("300", "A", &["A", "B"])],
        };
        let report = split(&AppConfig::default(), &request).unwrap();
        assert_eq!(report.fraud.score, dec!(50));
        assert_eq!(report.fraud.verdict, FraudVerdict::Doubtful);
    }

    #[test]
    fn test_split_payer_outside_group() {
        let request = SplitRequest {
            expense: expense("10", "Zed", &["A", "B"]),
            next_total: None,
            history: Vec::new(),
        };
        let err = split(&AppConfig::default(), &request).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_summary_matches_people_by_name() {
        let request = SummaryRequest {
            expenses: vec![
                expense("120", "John", &["John", "Sarah", "Mike"]),
                expense("30", "Sarah", &["John", "Sarah", "Mike"]),
            ],
        };
        let report = summary(&AppConfig::default(), &request).unwrap();
        let nets: Vec<i64> = report.positions.iter().map(|p| p.net.minor_units).collect();
        assert_eq!(nets, vec![7_000, -2_000, -5_000]);
    }

    #[test]
    fn test_convert_via_inverse_rate() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let rates = RatesFile {
            rates: vec![ExchangeRate::new(Currency::Eur, Currency::Usd, dec!(1.25), date)],
        };
        let report = convert("100", Currency::Usd, Currency::Eur, date, rates).unwrap();
        assert_eq!(report.converted, Money::new(8_000, Currency::Eur));
    }

    #[test]
    fn test_convert_missing_rate_is_not_found() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let rates = RatesFile { rates: Vec::new() };
        let err = convert("1", Currency::Usd, Currency::Jpy, date, rates).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_plan_report() {
        let request: PlanRequest = serde_json::from_str(
            r#"{
                "name": "Office Setup",
                "currency": "USD",
                "budget": "8000",
                "category": "Business",
                "start_date": "2024-01-01",
                "end_date": "2024-03-31",
                "expenses": [
                    {"amount": "4000", "description": "MacBook Pro x2", "date": "2024-01-15"},
                    {"amount": "2500", "description": "Standing desks", "date": "2024-02-01"},
                    {"amount": "2000", "description": "Office chairs", "date": "2024-02-15"}
                ]
            }"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let report = plan(&request, today).unwrap();

        assert_eq!(report.plan.status, PlanStatus::Exceeded);
        assert_eq!(report.over_budget_by, Some(Money::new(50_000, Currency::Usd)));
        assert_eq!(report.cumulative.len(), 3);
        assert_eq!(report.by_category[0].category, "Business");
    }
}
