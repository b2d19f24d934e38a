//! Application configuration loading and validation.
//!
//! Configuration is an optional TOML file with a `[logging]` table and a
//! `[parameters]` table holding defaults for the robustness parameters.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod logging;
mod parameters;

pub use logging::LoggingConfig;
pub use parameters::{
    Parameter, RorParameters, DEFAULT_INITIAL_ALPHA, DEFAULT_NUMBER_OF_ALPHA_VALUES,
    DEFAULT_PRECISION, MAX_NUMBER_OF_ALPHA_VALUES, MAX_PRECISION,
};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "ror.toml";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Lowest-precedence parameter values.
    #[serde(default)]
    pub parameters: RorParameters,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate TOML content.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `ror.toml` when present, else defaults.
    #[allow(clippy::result_large_err)]
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        self.parameters.validate()?;
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [parameters]
            eps = 0.001
            results_aggregator = "CopelandResultAggregator"
            number_of_alpha_values = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.parameters.eps(), 0.001);
        assert_eq!(config.parameters.number_of_alpha_values(), 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_parameter_fails_at_load() {
        let err = Config::parse("[parameters]\neps = -1.0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "EPS", .. })
        ));

        let err = Config::parse("[parameters]\ntie_resolver = \"Coin\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::UnknownTieResolver { .. })));
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        assert!(matches!(
            Config::parse("[exchange]\nname = \"x\""),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/ror.toml"),
            Err(Error::Config(ConfigError::ReadFile(_)))
        ));
    }
}
