//! Multi-currency handling: allocation, exchange rates, and conversion.

pub mod allocation;
pub mod conversion;
pub mod error;
pub mod exchange;

#[cfg(test)]
mod props;

pub use allocation::AllocationUtil;
pub use conversion::{convert_amount, convert_money};
pub use error::ConversionError;
pub use exchange::{ExchangeRate, RateTable};
