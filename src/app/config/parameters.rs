//! Robustness parameters.
//!
//! Parameters come from three places: the `[parameters]` table of the
//! application config, the `#Parameters` section of a dataset and CLI flags.
//! Each source yields a sparse [`RorParameters`]; [`RorParameters::overlay`]
//! stacks them and absent keys fall back to defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::aggregator::AggregatorKind;
use crate::app::tie_resolver::TieResolverKind;
use crate::domain::dataset::{DEFAULT_BIG_M, DEFAULT_EPS};
use crate::error::ConfigError;

pub const DEFAULT_INITIAL_ALPHA: f64 = 0.0;
pub const DEFAULT_PRECISION: u32 = 3;
pub const DEFAULT_NUMBER_OF_ALPHA_VALUES: usize = 3;
pub const MAX_PRECISION: u32 = 10;
pub const MAX_NUMBER_OF_ALPHA_VALUES: usize = 15;

/// Recognized parameter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Eps,
    InitialAlpha,
    AlphaValues,
    Precision,
    AlphaWeights,
    ResultsAggregator,
    NumberOfAlphaValues,
    TieResolver,
    BigM,
}

impl Parameter {
    pub const ALL: [Parameter; 9] = [
        Parameter::Eps,
        Parameter::InitialAlpha,
        Parameter::AlphaValues,
        Parameter::Precision,
        Parameter::AlphaWeights,
        Parameter::ResultsAggregator,
        Parameter::NumberOfAlphaValues,
        Parameter::TieResolver,
        Parameter::BigM,
    ];

    /// Key as written in dataset files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Eps => "EPS",
            Self::InitialAlpha => "INITIAL_ALPHA",
            Self::AlphaValues => "ALPHA_VALUES",
            Self::Precision => "PRECISION",
            Self::AlphaWeights => "ALPHA_WEIGHTS",
            Self::ResultsAggregator => "RESULTS_AGGREGATOR",
            Self::NumberOfAlphaValues => "NUMBER_OF_ALPHA_VALUES",
            Self::TieResolver => "TIE_RESOLVER",
            Self::BigM => "M",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Parameter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ConfigError::UnknownParameter {
                key: key.to_string(),
            })
    }
}

/// Sparse parameter set: `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RorParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_weights: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_aggregator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_alpha_values: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_resolver: Option<String>,
    /// Big-M constant.
    #[serde(default, rename = "m", skip_serializing_if = "Option::is_none")]
    pub big_m: Option<f64>,
}

impl RorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and set one `key=value` pair. Keys are case-insensitive.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let parameter: Parameter = key.parse()?;
        let field = parameter.key();
        let raw = raw.trim();
        match parameter {
            Parameter::Eps => self.eps = Some(parse_float(field, raw)?),
            Parameter::InitialAlpha => self.initial_alpha = Some(parse_float(field, raw)?),
            Parameter::AlphaValues => self.alpha_values = Some(parse_list(field, raw)?),
            Parameter::Precision => self.precision = Some(parse_int(field, raw)?),
            Parameter::AlphaWeights => self.alpha_weights = Some(parse_list(field, raw)?),
            Parameter::ResultsAggregator => self.results_aggregator = Some(parse_string(raw)),
            Parameter::NumberOfAlphaValues => {
                self.number_of_alpha_values = Some(parse_int(field, raw)?)
            }
            Parameter::TieResolver => self.tie_resolver = Some(parse_string(raw)),
            Parameter::BigM => self.big_m = Some(parse_float(field, raw)?),
        }
        self.validate_one(parameter)
    }

    /// Values set in `higher` replace the ones set here.
    #[must_use]
    pub fn overlay(mut self, higher: &RorParameters) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if higher.$field.is_some() {
                    self.$field = higher.$field.clone();
                })*
            };
        }
        take!(
            eps,
            initial_alpha,
            alpha_values,
            precision,
            alpha_weights,
            results_aggregator,
            number_of_alpha_values,
            tie_resolver,
            big_m
        );
        self
    }

    /// Validate every value that is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Parameter::ALL
            .into_iter()
            .try_for_each(|parameter| self.validate_one(parameter))
    }

    fn validate_one(&self, parameter: Parameter) -> Result<(), ConfigError> {
        let field = parameter.key();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            field,
            reason: reason.to_string(),
        };
        match parameter {
            Parameter::Eps => match self.eps {
                Some(eps) if !(eps > 0.0 && eps.is_finite()) => Err(invalid("must be greater than 0")),
                _ => Ok(()),
            },
            Parameter::InitialAlpha => match self.initial_alpha {
                Some(alpha) if !(0.0..=1.0).contains(&alpha) => Err(invalid("must be within [0, 1]")),
                _ => Ok(()),
            },
            Parameter::AlphaValues => match &self.alpha_values {
                Some(values) if values.is_empty() => Err(invalid("must not be empty")),
                Some(values) if values.iter().any(|a| !(0.0..=1.0).contains(a)) => {
                    Err(invalid("every value must be within [0, 1]"))
                }
                _ => Ok(()),
            },
            Parameter::Precision => match self.precision {
                Some(precision) if precision > MAX_PRECISION => {
                    Err(invalid("must be within [0, 10]"))
                }
                _ => Ok(()),
            },
            Parameter::AlphaWeights => match &self.alpha_weights {
                Some(weights) if weights.iter().any(|w| !(*w >= 0.0 && w.is_finite())) => {
                    Err(invalid("every weight must be greater or equal 0"))
                }
                _ => Ok(()),
            },
            Parameter::ResultsAggregator => match &self.results_aggregator {
                Some(name) => name.parse::<AggregatorKind>().map(|_| ()),
                None => Ok(()),
            },
            Parameter::NumberOfAlphaValues => match self.number_of_alpha_values {
                Some(count) if !(1..=MAX_NUMBER_OF_ALPHA_VALUES).contains(&count) => {
                    Err(invalid("must be within [1, 15]"))
                }
                _ => Ok(()),
            },
            Parameter::TieResolver => match &self.tie_resolver {
                Some(name) => name.parse::<TieResolverKind>().map(|_| ()),
                None => Ok(()),
            },
            Parameter::BigM => match self.big_m {
                Some(m) if !(m > 0.0 && m.is_finite()) => Err(invalid("must be greater than 0")),
                _ => Ok(()),
            },
        }
    }

    pub fn eps(&self) -> f64 {
        self.eps.unwrap_or(DEFAULT_EPS)
    }

    pub fn initial_alpha(&self) -> f64 {
        self.initial_alpha.unwrap_or(DEFAULT_INITIAL_ALPHA)
    }

    pub fn alpha_values(&self) -> Vec<f64> {
        self.alpha_values
            .clone()
            .unwrap_or_else(|| vec![0.0, 0.5, 1.0])
    }

    pub fn precision(&self) -> u32 {
        self.precision.unwrap_or(DEFAULT_PRECISION)
    }

    pub fn alpha_weights(&self) -> Vec<f64> {
        self.alpha_weights
            .clone()
            .unwrap_or_else(|| vec![1.0, 1.0, 1.0])
    }

    pub fn results_aggregator(&self) -> Result<AggregatorKind, ConfigError> {
        self.results_aggregator
            .as_deref()
            .map_or(Ok(AggregatorKind::default()), |name| name.parse())
    }

    pub fn number_of_alpha_values(&self) -> usize {
        self.number_of_alpha_values
            .unwrap_or(DEFAULT_NUMBER_OF_ALPHA_VALUES)
    }

    pub fn tie_resolver(&self) -> Result<TieResolverKind, ConfigError> {
        self.tie_resolver
            .as_deref()
            .map_or(Ok(TieResolverKind::default()), |name| name.parse())
    }

    pub fn big_m(&self) -> f64 {
        self.big_m.unwrap_or(DEFAULT_BIG_M)
    }

    /// Explicitly set parameters formatted for a dataset file.
    pub fn explicit(&self) -> Vec<(Parameter, String)> {
        let mut out = Vec::new();
        if let Some(v) = self.eps {
            out.push((Parameter::Eps, format!("{v:?}")));
        }
        if let Some(v) = self.initial_alpha {
            out.push((Parameter::InitialAlpha, format!("{v:?}")));
        }
        if let Some(v) = &self.alpha_values {
            out.push((Parameter::AlphaValues, format_list(v)));
        }
        if let Some(v) = self.precision {
            out.push((Parameter::Precision, v.to_string()));
        }
        if let Some(v) = &self.alpha_weights {
            out.push((Parameter::AlphaWeights, format_list(v)));
        }
        if let Some(v) = &self.results_aggregator {
            out.push((Parameter::ResultsAggregator, v.clone()));
        }
        if let Some(v) = self.number_of_alpha_values {
            out.push((Parameter::NumberOfAlphaValues, v.to_string()));
        }
        if let Some(v) = &self.tie_resolver {
            out.push((Parameter::TieResolver, v.clone()));
        }
        if let Some(v) = self.big_m {
            out.push((Parameter::BigM, format!("{v:?}")));
        }
        out
    }
}

fn parse_float(field: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("'{raw}' is not a number"),
    })
}

fn parse_int<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("'{raw}' is not a non-negative integer"),
    })
}

fn parse_list(field: &'static str, raw: &str) -> Result<Vec<f64>, ConfigError> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ConfigError::InvalidValue {
            field,
            reason: format!("'{raw}' is not a list, expected [v1, v2, ...]"),
        })?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|item| parse_float(field, item.trim()))
        .collect()
}

fn parse_string(raw: &str) -> String {
    raw.trim_matches(|c| c == '"' || c == '\'').to_string()
}

fn format_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{v:?}")).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let parameters = RorParameters::new();
        assert_eq!(parameters.eps(), 1e-6);
        assert_eq!(parameters.initial_alpha(), 0.0);
        assert_eq!(parameters.alpha_values(), vec![0.0, 0.5, 1.0]);
        assert_eq!(parameters.precision(), 3);
        assert_eq!(parameters.alpha_weights(), vec![1.0, 1.0, 1.0]);
        assert_eq!(
            parameters.results_aggregator().unwrap(),
            AggregatorKind::Default
        );
        assert_eq!(parameters.number_of_alpha_values(), 3);
        assert_eq!(parameters.tie_resolver().unwrap(), TieResolverKind::NoTieResolver);
        assert_eq!(parameters.big_m(), 10.0);
        assert!(parameters.explicit().is_empty());
    }

    #[test]
    fn test_set_is_case_insensitive() {
        let mut parameters = RorParameters::new();
        parameters.set("eps", "0.01").unwrap();
        parameters.set("Alpha_Values", "[0, 0.25, 1]").unwrap();
        parameters.set("RESULTS_AGGREGATOR", "BordaResultAggregator").unwrap();
        parameters.set("m", "100").unwrap();

        assert_eq!(parameters.eps(), 0.01);
        assert_eq!(parameters.alpha_values(), vec![0.0, 0.25, 1.0]);
        assert_eq!(parameters.results_aggregator().unwrap(), AggregatorKind::Borda);
        assert_eq!(parameters.big_m(), 100.0);
    }

    #[test]
    fn test_unknown_key() {
        let mut parameters = RorParameters::new();
        assert!(matches!(
            parameters.set("SPEED", "1"),
            Err(ConfigError::UnknownParameter { key }) if key == "SPEED"
        ));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("EPS", "0"),
            ("EPS", "abc"),
            ("INITIAL_ALPHA", "1.5"),
            ("ALPHA_VALUES", "0.5"),
            ("ALPHA_VALUES", "[0.5, 2]"),
            ("PRECISION", "11"),
            ("PRECISION", "-1"),
            ("ALPHA_WEIGHTS", "[1, -1]"),
            ("NUMBER_OF_ALPHA_VALUES", "0"),
            ("NUMBER_OF_ALPHA_VALUES", "16"),
            ("M", "-3"),
        ];
        for (key, value) in cases {
            let mut parameters = RorParameters::new();
            assert!(
                parameters.set(key, value).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_unknown_aggregator_is_reported_immediately() {
        let mut parameters = RorParameters::new();
        assert!(matches!(
            parameters.set("RESULTS_AGGREGATOR", "MagicAggregator"),
            Err(ConfigError::UnknownAggregator { .. })
        ));
        assert!(matches!(
            parameters.set("TIE_RESOLVER", "CoinFlip"),
            Err(ConfigError::UnknownTieResolver { .. })
        ));
    }

    #[test]
    fn test_overlay_precedence() {
        let mut low = RorParameters::new();
        low.set("EPS", "0.1").unwrap();
        low.set("PRECISION", "5").unwrap();
        let mut high = RorParameters::new();
        high.set("EPS", "0.2").unwrap();

        let merged = low.overlay(&high);
        assert_eq!(merged.eps(), 0.2);
        assert_eq!(merged.precision(), 5);
    }

    #[test]
    fn test_explicit_formatting() {
        let mut parameters = RorParameters::new();
        parameters.set("ALPHA_WEIGHTS", "[1, 2, 0.5]").unwrap();
        parameters.set("EPS", "0.001").unwrap();

        let explicit = parameters.explicit();
        assert_eq!(
            explicit,
            vec![
                (Parameter::Eps, "0.001".to_string()),
                (Parameter::AlphaWeights, "[1.0, 2.0, 0.5]".to_string()),
            ]
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let parameters: RorParameters = toml::from_str(
            r#"
            eps = 0.5
            alpha_values = [0.0, 1.0]
            m = 20.0
            tie_resolver = "BordaTieResolver"
            "#,
        )
        .unwrap();
        assert_eq!(parameters.eps(), 0.5);
        assert_eq!(parameters.alpha_values(), vec![0.0, 1.0]);
        assert_eq!(parameters.big_m(), 20.0);
        assert!(parameters.validate().is_ok());

        assert!(toml::from_str::<RorParameters>("speed = 1").is_err());
    }
}
