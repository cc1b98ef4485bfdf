//! ISO 4217 currency catalogue.
//!
//! Every supported currency carries its minor-unit exponent: the number of
//! decimal places its smallest denomination represents. Yen and won have no
//! minor unit, so one minor unit equals one major unit.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Japanese Yen
    Jpy,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Swiss Franc
    Chf,
    /// Chinese Yuan
    Cny,
    /// Indian Rupee
    Inr,
    /// South Korean Won
    Krw,
    /// Singapore Dollar
    Sgd,
    /// Hong Kong Dollar
    Hkd,
}

impl Currency {
    /// All supported currencies, in catalogue order.
    pub const ALL: [Self; 12] = [
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Jpy,
        Self::Cad,
        Self::Aud,
        Self::Chf,
        Self::Cny,
        Self::Inr,
        Self::Krw,
        Self::Sgd,
        Self::Hkd,
    ];

    /// Returns the three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Chf => "CHF",
            Self::Cny => "CNY",
            Self::Inr => "INR",
            Self::Krw => "KRW",
            Self::Sgd => "SGD",
            Self::Hkd => "HKD",
        }
    }

    /// Returns the English display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Chf => "Swiss Franc",
            Self::Cny => "Chinese Yuan",
            Self::Inr => "Indian Rupee",
            Self::Krw => "South Korean Won",
            Self::Sgd => "Singapore Dollar",
            Self::Hkd => "Hong Kong Dollar",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy | Self::Cny => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
            Self::Chf => "CHF",
            Self::Inr => "₹",
            Self::Krw => "₩",
            Self::Sgd => "S$",
            Self::Hkd => "HK$",
        }
    }

    /// Number of decimal places carried by the minor unit.
    #[must_use]
    pub const fn minor_unit_exponent(self) -> u32 {
        match self {
            Self::Jpy | Self::Krw => 0,
            _ => 2,
        }
    }

    /// Number of minor units in one major unit (100 for cents, 1 for yen).
    #[must_use]
    pub const fn minor_units_per_major(self) -> i64 {
        10_i64.pow(self.minor_unit_exponent())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|currency| currency.code() == upper)
            .ok_or_else(|| format!("Unknown currency: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(Currency::Usd, 2, 100)]
    #[case(Currency::Inr, 2, 100)]
    #[case(Currency::Eur, 2, 100)]
    #[case(Currency::Jpy, 0, 1)]
    #[case(Currency::Krw, 0, 1)]
    fn test_minor_unit_scale(#[case] currency: Currency, #[case] exponent: u32, #[case] per_major: i64) {
        assert_eq!(currency.minor_unit_exponent(), exponent);
        assert_eq!(currency.minor_units_per_major(), per_major);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Inr.to_string(), "INR");
        assert_eq!(Currency::Hkd.to_string(), "HKD");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str(" krw ").unwrap(), Currency::Krw);

        assert!(Currency::from_str("XXX").is_err());
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_every_code_round_trips() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_str(currency.code()).unwrap(), currency);
        }
    }

    #[test]
    fn test_currency_serde_uppercase() {
        let json = serde_json::to_string(&Currency::Sgd).unwrap();
        assert_eq!(json, "\"SGD\"");
        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::Jpy);
    }
}
