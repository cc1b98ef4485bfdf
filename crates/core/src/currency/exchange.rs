//! Exchange rate types and in-memory rate lookup.

use chrono::NaiveDate;
use expensio_shared::types::{Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::conversion::convert_money;
use super::error::ConversionError;

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency.
    pub from_currency: Currency,
    /// Target currency.
    pub to_currency: Currency,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(
        from_currency: Currency,
        to_currency: Currency,
        rate: Decimal,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            from_currency,
            to_currency,
            rate,
            effective_date,
        }
    }

    /// Returns the inverse rate.
    pub fn inverse(&self) -> Result<Self, ConversionError> {
        let inverted = Decimal::ONE
            .checked_div(self.rate)
            .filter(|r| r.is_sign_positive() && !r.is_zero())
            .ok_or(ConversionError::NonPositiveRate(self.rate))?;

        Ok(Self {
            from_currency: self.to_currency,
            to_currency: self.from_currency,
            rate: inverted,
            effective_date: self.effective_date,
        })
    }
}

/// Currency used as the bridge when no direct or inverse rate exists.
const TRIANGULATION_CURRENCY: Currency = Currency::Usd;

/// In-memory exchange rate store.
///
/// Lookups pick the latest rate effective on or before the requested date,
/// trying the direct pair, then the inverse pair, then triangulation through USD.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rates: Vec::new() }
    }

    /// Stores a rate, replacing any rate for the same pair and date.
    pub fn insert(&mut self, rate: ExchangeRate) -> Result<(), ConversionError> {
        if rate.rate <= Decimal::ZERO {
            return Err(ConversionError::NonPositiveRate(rate.rate));
        }
        if rate.from_currency == rate.to_currency {
            return Err(ConversionError::SameCurrency);
        }

        self.rates.retain(|existing| {
            !(existing.from_currency == rate.from_currency
                && existing.to_currency == rate.to_currency
                && existing.effective_date == rate.effective_date)
        });
        self.rates.push(rate);
        Ok(())
    }

    /// Number of stored rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rates are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Finds the rate to convert `from` into `to` as of `date`.
    pub fn find_rate(
        &self,
        from: Currency,
        to: Currency,
        date: NaiveDate,
    ) -> Result<ExchangeRate, ConversionError> {
        if from == to {
            return Ok(ExchangeRate::new(from, to, Decimal::ONE, date));
        }

        if let Some(rate) = self.find_with_inverse(from, to, date)? {
            return Ok(rate);
        }

        if from != TRIANGULATION_CURRENCY && to != TRIANGULATION_CURRENCY {
            let first = self.find_with_inverse(from, TRIANGULATION_CURRENCY, date)?;
            let second = self.find_with_inverse(TRIANGULATION_CURRENCY, to, date)?;
            if let (Some(first), Some(second)) = (first, second) {
                let rate = first
                    .rate
                    .checked_mul(second.rate)
                    .ok_or(ConversionError::Overflow)?;
                let effective_date = first.effective_date.min(second.effective_date);
                return Ok(ExchangeRate::new(from, to, rate, effective_date));
            }
        }

        Err(ConversionError::RateNotFound { from, to, date })
    }

    /// Converts money into `to` using the rate in effect on `date`.
    pub fn convert(
        &self,
        money: Money,
        to: Currency,
        date: NaiveDate,
    ) -> Result<Money, ConversionError> {
        if money.currency == to {
            return Ok(money);
        }
        let rate = self.find_rate(money.currency, to, date)?;
        convert_money(money, &rate)
    }

    fn find_with_inverse(
        &self,
        from: Currency,
        to: Currency,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRate>, ConversionError> {
        if let Some(direct) = self.find_direct(from, to, date) {
            return Ok(Some(direct.clone()));
        }
        self.find_direct(to, from, date)
            .map(ExchangeRate::inverse)
            .transpose()
    }

    fn find_direct(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<&ExchangeRate> {
        self.rates
            .iter()
            .filter(|r| r.from_currency == from && r.to_currency == to && r.effective_date <= date)
            .max_by_key(|r| r.effective_date)
    }
}
