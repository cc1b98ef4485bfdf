//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Split calculation configuration.
    pub split: SplitConfig,
    /// Fair-split suggestion configuration.
    pub suggestion: SuggestionConfig,
    /// Fraud screening configuration.
    pub fraud: FraudConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Split calculation configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Balance tolerance in minor units. `None` means one major unit of the
    /// expense currency.
    pub tolerance_minor_units: Option<u64>,
}

/// Fair-split suggestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    /// Lowest next-split ratio proposed for an overpayer.
    #[serde(default = "default_overpayer_floor")]
    pub overpayer_floor: Decimal,
    /// Highest next-split ratio proposed for an underpayer.
    #[serde(default = "default_underpayer_cap")]
    pub underpayer_cap: Decimal,
    /// Fraction of an overpayer's surplus credited against the next split.
    #[serde(default = "default_overpayer_damping")]
    pub overpayer_damping: Decimal,
    /// Fraction of an underpayer's deficit added to the next split.
    #[serde(default = "default_underpayer_damping")]
    pub underpayer_damping: Decimal,
}

fn default_overpayer_floor() -> Decimal {
    Decimal::new(1, 1)
}

fn default_underpayer_cap() -> Decimal {
    Decimal::new(6, 1)
}

fn default_overpayer_damping() -> Decimal {
    Decimal::new(3, 1)
}

fn default_underpayer_damping() -> Decimal {
    Decimal::new(5, 1)
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            overpayer_floor: default_overpayer_floor(),
            underpayer_cap: default_underpayer_cap(),
            overpayer_damping: default_overpayer_damping(),
            underpayer_damping: default_underpayer_damping(),
        }
    }
}

/// Fraud screening configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FraudConfig {
    /// Scores strictly above this are trustworthy.
    #[serde(default = "default_trustworthy_above")]
    pub trustworthy_above: Decimal,
    /// Scores at or above this (and not trustworthy) are doubtful.
    #[serde(default = "default_doubtful_from")]
    pub doubtful_from: Decimal,
    /// Days within which an identical expense counts as a duplicate.
    #[serde(default = "default_duplicate_window_days")]
    pub duplicate_window_days: u32,
    /// Category ceilings in major units, keyed by currency code and then by
    /// category. Expenses in a currency with no entry skip the ceiling rule.
    #[serde(default)]
    pub category_ceilings: BTreeMap<String, BTreeMap<String, Decimal>>,
}

fn default_trustworthy_above() -> Decimal {
    Decimal::from(70)
}

fn default_doubtful_from() -> Decimal {
    Decimal::from(40)
}

fn default_duplicate_window_days() -> u32 {
    1
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            trustworthy_above: default_trustworthy_above(),
            doubtful_from: default_doubtful_from(),
            duplicate_window_days: default_duplicate_window_days(),
            category_ceilings: BTreeMap::new(),
        }
    }
}

impl FraudConfig {
    /// Flattens the configured ceilings into `(currency, category, ceiling)`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` for an unknown currency code or a
    /// negative ceiling.
    pub fn ceilings(&self) -> Result<Vec<(Currency, &str, Decimal)>, AppError> {
        let mut ceilings = Vec::new();
        for (code, categories) in &self.category_ceilings {
            let currency: Currency = code.parse().map_err(|err| {
                AppError::Configuration(format!("fraud.category_ceilings: {err}"))
            })?;
            for (category, ceiling) in categories {
                if ceiling.is_sign_negative() {
                    return Err(AppError::Configuration(format!(
                        "fraud.category_ceilings.{code}.{category} must not be negative"
                    )));
                }
                ceilings.push((currency, category.as_str(), *ceiling));
            }
        }
        Ok(ceilings)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "expensio=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXPENSIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds and ratios are mutually consistent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` describing the first inconsistency.
    pub fn validate(&self) -> Result<(), AppError> {
        let hundred = Decimal::ONE_HUNDRED;
        let fraud = &self.fraud;
        if fraud.doubtful_from < Decimal::ZERO || fraud.trustworthy_above > hundred {
            return Err(AppError::Configuration(
                "fraud thresholds must lie within 0..=100".to_string(),
            ));
        }
        if fraud.doubtful_from > fraud.trustworthy_above {
            return Err(AppError::Configuration(format!(
                "fraud.doubtful_from ({}) exceeds fraud.trustworthy_above ({})",
                fraud.doubtful_from, fraud.trustworthy_above
            )));
        }
        fraud.ceilings()?;

        let suggestion = &self.suggestion;
        let ratios = [suggestion.overpayer_floor, suggestion.underpayer_cap];
        if ratios.iter().any(|r| *r < Decimal::ZERO || *r > Decimal::ONE) {
            return Err(AppError::Configuration(
                "suggestion floor and cap must lie within 0..=1".to_string(),
            ));
        }
        let damping = [suggestion.overpayer_damping, suggestion.underpayer_damping];
        if damping.iter().any(|d| *d < Decimal::ZERO || *d > Decimal::ONE) {
            return Err(AppError::Configuration(
                "suggestion damping factors must lie within 0..=1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.split.tolerance_minor_units, None);
        assert_eq!(config.suggestion.overpayer_floor, dec!(0.1));
        assert_eq!(config.suggestion.underpayer_cap, dec!(0.6));
        assert_eq!(config.fraud.trustworthy_above, dec!(70));
        assert_eq!(config.fraud.doubtful_from, dec!(40));
        assert_eq!(config.logging.filter, "expensio=info");
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "EXPENSIO__SPLIT__TOLERANCE_MINOR_UNITS",
                "EXPENSIO__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.split.tolerance_minor_units, None);
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_load_env_overrides() {
        temp_env::with_vars(
            [
                ("EXPENSIO__SPLIT__TOLERANCE_MINOR_UNITS", Some("50")),
                ("EXPENSIO__LOGGING__JSON", Some("true")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.split.tolerance_minor_units, Some(50));
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_validate_rejects_inverted_fraud_thresholds() {
        let mut config = AppConfig::default();
        config.fraud.doubtful_from = dec!(80);
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_validate_rejects_ratio_out_of_range() {
        let mut config = AppConfig::default();
        config.suggestion.underpayer_cap = dec!(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_damping_out_of_range() {
        let mut config = AppConfig::default();
        config.suggestion.overpayer_damping = Decimal::from_i128_with_scale(10_i128.pow(24), 0);
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");

        let mut config = AppConfig::default();
        config.suggestion.underpayer_damping = dec!(1.01);
        assert!(config.validate().is_err());

        config.suggestion.underpayer_damping = dec!(1);
        assert!(config.validate().is_ok());
    }

    fn ceilings(code: &str, category: &str, ceiling: Decimal) -> FraudConfig {
        let mut fraud = FraudConfig::default();
        fraud.category_ceilings.insert(
            code.to_string(),
            BTreeMap::from([(category.to_string(), ceiling)]),
        );
        fraud
    }

    #[test]
    fn test_validate_rejects_negative_ceiling() {
        let config = AppConfig {
            fraud: ceilings("USD", "Food", dec!(-1)),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_ceiling_currency() {
        let config = AppConfig {
            fraud: ceilings("XYZ", "Food", dec!(500)),
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_ceilings_are_keyed_by_currency() {
        let fraud = ceilings("inr", "Food", dec!(2000));
        assert_eq!(
            fraud.ceilings().unwrap(),
            vec![(Currency::Inr, "Food", dec!(2000))]
        );
    }
}
