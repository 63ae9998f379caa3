//! Tunables for the schedule generator.
//!
//! The defaults reproduce the standard behaviour: a loan counts as paid off once
//! at most one cent is left, a period whose interest eats the whole installment
//! still amortizes one cent, schedules stop after 1000 periods, and installments
//! are spaced 30 days apart.

use std::path::Path;

use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AmortizationError, AmortizationResult};

/// Configuration for [`ScheduleGenerator`](crate::ScheduleGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Balances at or below this amount are treated as paid off.
    pub payoff_epsilon: Decimal,
    /// Principal applied when interest consumes the whole installment.
    pub principal_floor: Decimal,
    /// Maximum number of installments in one schedule.
    pub max_periods: u32,
    /// Days between consecutive installment dates.
    pub period_days: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            payoff_epsilon: dec!(0.01),
            principal_floor: dec!(0.01),
            max_periods: 1000,
            period_days: 30,
        }
    }
}

impl GeneratorConfig {
    /// Parses a JSON document. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> AmortizationResult<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading generator config {}", path.display()))?;
        let config = Self::from_json_str(&raw)
            .with_context(|| format!("parsing generator config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> AmortizationResult<()> {
        if self.payoff_epsilon < Decimal::ZERO {
            return Err(AmortizationError::InvalidConfig(
                "payoff_epsilon cannot be negative".into(),
            ));
        }
        if self.principal_floor <= Decimal::ZERO {
            return Err(AmortizationError::InvalidConfig(
                "principal_floor must be positive".into(),
            ));
        }
        if self.max_periods == 0 {
            return Err(AmortizationError::InvalidConfig(
                "max_periods must be at least 1".into(),
            ));
        }
        if self.period_days == 0 {
            return Err(AmortizationError::InvalidConfig(
                "period_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_periods, 1000);
        assert_eq!(config.payoff_epsilon, dec!(0.01));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{ "max_periods": 360 }"#).unwrap();
        assert_eq!(config.max_periods, 360);
        assert_eq!(config.period_days, 30);
        assert_eq!(config.principal_floor, dec!(0.01));
    }

    #[test]
    fn test_rejects_zero_period_cap() {
        let err = GeneratorConfig::from_json_str(r#"{ "max_periods": 0 }"#).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = GeneratorConfig::from_json_str("{ max_periods: ").unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GeneratorConfig::from_path("/nonexistent/generator.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/generator.json"));
    }
}
