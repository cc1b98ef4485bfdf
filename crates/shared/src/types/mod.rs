//! Common types used across the application.

pub mod currency;
pub mod id;
pub mod money;

pub use currency::Currency;
pub use id::*;
pub use money::{Money, MoneyError};
