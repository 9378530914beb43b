use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

use crate::inputs::IntoBmiDecimal;
use crate::types::{BmiCategory, ConfigError};

pub const DEFAULT_UNDERWEIGHT_LIMIT: Decimal = dec!(18.5);
pub const DEFAULT_NORMAL_LIMIT: Decimal = dec!(25.0);
pub const DEFAULT_OVERWEIGHT_LIMIT: Decimal = dec!(30.0);

/// Classification thresholds.
///
/// Each limit is the exclusive upper bound of its band and the inclusive
/// lower bound of the next one. Unset limits fall back to the WHO adult
/// values (18.5 / 25.0 / 30.0).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiConfig {
    pub underweight_limit: Option<Decimal>,
    pub normal_limit: Option<Decimal>,
    pub overweight_limit: Option<Decimal>,
}

impl std::str::FromStr for BmiConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: BmiConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl BmiConfig {
    pub fn builder() -> BmiConfigBuilder {
        BmiConfigBuilder::default()
    }

    /// Checks that all limits are positive and strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("underweight_limit", self.get_underweight_limit()),
            ("normal_limit", self.get_normal_limit()),
            ("overweight_limit", self.get_overweight_limit()),
        ];

        for (name, value) in limits {
            if value <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        for pair in limits.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if lower >= upper {
                return Err(ConfigError::Invalid(format!(
                    "{} ({}) must be below {} ({})",
                    lower_name, lower, upper_name, upper
                )));
            }
        }

        Ok(())
    }

    /// Loads overrides from `BMI_UNDERWEIGHT_LIMIT`, `BMI_NORMAL_LIMIT` and
    /// `BMI_OVERWEIGHT_LIMIT`. Unset variables keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Builds a configuration from a variable lookup with `env::var` semantics.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let config = Self {
            underweight_limit: lookup_decimal(&lookup, "BMI_UNDERWEIGHT_LIMIT")?,
            normal_limit: lookup_decimal(&lookup, "BMI_NORMAL_LIMIT")?,
            overweight_limit: lookup_decimal(&lookup, "BMI_OVERWEIGHT_LIMIT")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{}: {}", path, e)))?;
        debug!(path, "loaded bmi config file");
        content.parse()
    }

    pub fn get_underweight_limit(&self) -> Decimal {
        self.underweight_limit.unwrap_or(DEFAULT_UNDERWEIGHT_LIMIT)
    }

    pub fn get_normal_limit(&self) -> Decimal {
        self.normal_limit.unwrap_or(DEFAULT_NORMAL_LIMIT)
    }

    pub fn get_overweight_limit(&self) -> Decimal {
        self.overweight_limit.unwrap_or(DEFAULT_OVERWEIGHT_LIMIT)
    }

    /// Maps a (rounded) BMI value to its category.
    pub fn classify(&self, value: Decimal) -> BmiCategory {
        if value < self.get_underweight_limit() {
            BmiCategory::Underweight
        } else if value < self.get_normal_limit() {
            BmiCategory::Normal
        } else if value < self.get_overweight_limit() {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

fn lookup_decimal<F>(lookup: &F, name: &str) -> Result<Option<Decimal>, ConfigError>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(name) {
        Ok(raw) => raw.as_str().into_bmi_decimal().map(Some).map_err(|reason| ConfigError::Env {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::Env {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}

// ========== BmiConfigBuilder ==========

#[derive(Debug, Default)]
pub struct BmiConfigBuilder {
    underweight_limit: Option<Decimal>,
    normal_limit: Option<Decimal>,
    overweight_limit: Option<Decimal>,
}

impl BmiConfigBuilder {
    pub fn underweight_limit(mut self, value: impl IntoBmiDecimal) -> Self {
        if let Ok(v) = value.into_bmi_decimal() {
            self.underweight_limit = Some(v);
        }
        self
    }

    pub fn normal_limit(mut self, value: impl IntoBmiDecimal) -> Self {
        if let Ok(v) = value.into_bmi_decimal() {
            self.normal_limit = Some(v);
        }
        self
    }

    pub fn overweight_limit(mut self, value: impl IntoBmiDecimal) -> Self {
        if let Ok(v) = value.into_bmi_decimal() {
            self.overweight_limit = Some(v);
        }
        self
    }

    pub fn build(self) -> Result<BmiConfig, ConfigError> {
        let config = BmiConfig {
            underweight_limit: self.underweight_limit,
            normal_limit: self.normal_limit,
            overweight_limit: self.overweight_limit,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = BmiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.classify(dec!(18.4)), BmiCategory::Underweight);
        assert_eq!(config.classify(dec!(18.5)), BmiCategory::Normal);
        assert_eq!(config.classify(dec!(24.9)), BmiCategory::Normal);
        assert_eq!(config.classify(dec!(25.0)), BmiCategory::Overweight);
        assert_eq!(config.classify(dec!(29.9)), BmiCategory::Overweight);
        assert_eq!(config.classify(dec!(30.0)), BmiCategory::Obese);
    }

    #[test]
    fn test_builder_validation() {
        let res = BmiConfig::builder().normal_limit(23).build();
        assert!(res.is_ok());
        assert_eq!(res.unwrap().classify(dec!(23.0)), BmiCategory::Overweight);

        let res_fail = BmiConfig::builder().underweight_limit(26).build();
        assert!(matches!(res_fail, Err(ConfigError::Invalid(_))));

        let res_zero = BmiConfig::builder().underweight_limit(0).build();
        assert!(res_zero.is_err());
    }

    #[test]
    fn test_from_json() {
        let config: BmiConfig = r#"{"overweightLimit":"27.5"}"#.parse().unwrap();
        assert_eq!(config.get_overweight_limit(), dec!(27.5));
        assert_eq!(config.get_normal_limit(), dec!(25.0));

        let bad = "not json".parse::<BmiConfig>();
        assert!(matches!(bad, Err(ConfigError::Parse(_))));
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Result<String, env::VarError> + 'a {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
                .ok_or(env::VarError::NotPresent)
        }
    }

    #[test]
    fn test_unset_env_vars_keep_defaults() {
        let config = BmiConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(config, BmiConfig::default());

        let config = BmiConfig::from_lookup(vars(&[("BMI_NORMAL_LIMIT", " 24 ")])).unwrap();
        assert_eq!(config.get_normal_limit(), dec!(24));
        assert_eq!(config.get_underweight_limit(), dec!(18.5));
    }

    #[test]
    fn test_non_numeric_env_var() {
        let res = BmiConfig::from_lookup(vars(&[("BMI_NORMAL_LIMIT", "abc")]));
        assert_eq!(
            res,
            Err(ConfigError::Env {
                name: "BMI_NORMAL_LIMIT".to_string(),
                reason: "not a number".to_string(),
            })
        );
    }

    #[test]
    fn test_non_increasing_env_limits() {
        let res = BmiConfig::from_lookup(vars(&[
            ("BMI_UNDERWEIGHT_LIMIT", "26"),
            ("BMI_NORMAL_LIMIT", "25"),
        ]));
        assert!(matches!(res, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file() {
        let res = BmiConfig::try_from_json("/nonexistent/bmi-config.json");
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }
}
