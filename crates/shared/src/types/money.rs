//! Money type stored as an integer count of minor units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are held as `i64` minor units (cents for USD, yen for JPY) and
//! only cross into `rust_decimal::Decimal` at the parsing and display edges.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::currency::Currency;

/// Errors raised while constructing or combining money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input text is not a finite decimal number.
    #[error("Not a finite decimal amount: {0:?}")]
    NotANumber(String),

    /// Amount has more fractional digits than the currency allows.
    #[error("Amount {amount} has more than {places} decimal places allowed for {currency}")]
    ExcessPrecision {
        /// Offending amount.
        amount: Decimal,
        /// Decimal places the currency allows.
        places: u32,
        /// Currency of the amount.
        currency: Currency,
    },

    /// Amount does not fit in the minor-unit representation.
    #[error("Amount is out of range")]
    Overflow,

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Expected currency.
        expected: Currency,
        /// Actual currency.
        got: Currency,
    },
}

/// Represents a monetary amount with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub minor_units: i64,
    /// ISO 4217 currency.
    pub currency: Currency,
}

impl Money {
    /// Creates a new Money instance from minor units.
    #[must_use]
    pub const fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Converts a decimal major-unit amount into minor units.
    ///
    /// The amount must be exactly representable at the currency's precision:
    /// `12.345` USD is rejected rather than silently rounded.
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let scaled = amount
            .checked_mul(Decimal::from(currency.minor_units_per_major()))
            .ok_or(MoneyError::Overflow)?;

        if !scaled.fract().is_zero() {
            return Err(MoneyError::ExcessPrecision {
                amount,
                places: currency.minor_unit_exponent(),
                currency,
            });
        }

        let minor_units = scaled.trunc().to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self::new(minor_units, currency))
    }

    /// Parses user-entered text (e.g. `"1250.50"`) into money.
    pub fn parse(text: &str, currency: Currency) -> Result<Self, MoneyError> {
        let trimmed = text.trim();
        let amount =
            Decimal::from_str(trimmed).map_err(|_| MoneyError::NotANumber(trimmed.to_string()))?;
        Self::from_decimal(amount, currency)
    }

    /// Returns the amount in major units.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor_units, self.currency.minor_unit_exponent())
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.minor_units > 0
    }

    /// Adds two amounts of the same currency.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        self.minor_units
            .checked_add(other.minor_units)
            .map(|sum| Self::new(sum, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    /// Subtracts `other` from `self`; both must share a currency.
    pub fn checked_sub(self, other: Self) -> Result<Self, MoneyError> {
        self.ensure_same_currency(other)?;
        self.minor_units
            .checked_sub(other.minor_units)
            .map(|diff| Self::new(diff, self.currency))
            .ok_or(MoneyError::Overflow)
    }

    fn ensure_same_currency(self, other: Self) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                got: other.currency,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.currency)
    }
}
