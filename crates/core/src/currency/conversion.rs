//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Always round to the target currency's minor-unit precision
//! - Use banker's rounding (round half to even)

use expensio_shared::types::Money;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use super::error::ConversionError;
use super::exchange::ExchangeRate;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Returns `None` if the product overflows.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Option<Decimal> {
    let converted = amount.checked_mul(rate)?;
    Some(converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven))
}

/// Converts money into the rate's target currency.
///
/// # Errors
///
/// Returns `ConversionError::CurrencyMismatch` if `money` is not in the
/// rate's source currency, `NonPositiveRate` for a zero or negative rate, and
/// `Overflow` if the result does not fit in minor units.
pub fn convert_money(money: Money, rate: &ExchangeRate) -> Result<Money, ConversionError> {
    if money.currency != rate.from_currency {
        return Err(ConversionError::CurrencyMismatch {
            expected: rate.from_currency,
            got: money.currency,
        });
    }
    if rate.rate <= Decimal::ZERO {
        return Err(ConversionError::NonPositiveRate(rate.rate));
    }

    let target = rate.to_currency;
    let converted = convert_amount(money.to_decimal(), rate.rate, target.minor_unit_exponent())
        .ok_or(ConversionError::Overflow)?;

    Ok(Money::from_decimal(converted, target)?)
}
