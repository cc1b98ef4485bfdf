//! Fair-split suggestions for the next shared expense.
//!
//! A suggester looks at how an expense was split and proposes what share of
//! the next expense each participant should carry, so overpayers pay less
//! next time and underpayers pay more.

pub mod error;
pub mod service;
pub mod types;


pub use error::SuggestionError;
pub use service::{EqualSuggester, RebalancingSuggester, SplitSuggester, apply_suggestions};
pub use types::{SplitSuggestion, SuggestedShare, SuggestionPolicy};
