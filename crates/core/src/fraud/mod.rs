//! Expense screening.
//!
//! Scorers rate an expense from 0 to 100, higher meaning more trustworthy.
//! Thresholds turn a score into a verdict. Scoring is a trait so a
//! different model can replace the rule-based one without touching callers.

pub mod scorer;
pub mod types;


pub use scorer::{ExpenseScorer, RuleBasedScorer, assess};
pub use types::{FraudAssessment, FraudFinding, FraudThresholds, FraudVerdict};
