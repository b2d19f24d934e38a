use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unknown parameter '{key}'")]
    UnknownParameter { key: String },

    #[error("unknown results aggregator '{name}' (available: {available})")]
    UnknownAggregator { name: String, available: String },

    #[error("unknown tie resolver '{name}' (available: {available})")]
    UnknownTieResolver { name: String, available: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while reading or validating a dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("dataset has no {section} section")]
    MissingSection { section: &'static str },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("invalid criterion '{criterion}': {reason}")]
    InvalidCriterion { criterion: String, reason: String },

    #[error("alternative '{0}' is defined more than once")]
    DuplicateAlternative(String),

    #[error("unknown alternative '{0}'")]
    UnknownAlternative(String),

    #[error("alternative '{alternative}' has {actual} values, expected {expected}")]
    RowWidth {
        alternative: String,
        expected: usize,
        actual: usize,
    },

    #[error("dataset has no alternatives")]
    Empty,
}

/// Model-construction invariant violations.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("target references variable '{0}' that is not used by any constraint")]
    UnknownTargetVariable(String),

    #[error("alpha must be within [0, 1], got {0}")]
    AlphaOutOfRange(f64),

    #[error("unknown alternative '{0}'")]
    UnknownAlternative(String),

    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("at least {required} alternatives are required, got {actual}")]
    NotEnoughAlternatives { required: usize, actual: usize },

    #[error("model has no target")]
    MissingTarget,
}

/// Failures of the two-phase computation.
#[derive(Error, Debug)]
pub enum CalculationError {
    #[error("delta phase is infeasible: preference information is contradictory")]
    DeltaInfeasible,

    #[error("distance of '{alternative}' for alpha {alpha} is infeasible")]
    DistanceInfeasible { alternative: String, alpha: f64 },

    #[error("{stage} problem is unbounded")]
    Unbounded { stage: String },

    #[error("solver '{solver}' failed: {reason}")]
    Solver { solver: &'static str, reason: String },

    #[error("no result for alternative '{alternative}' at {alpha}")]
    MissingResult { alternative: String, alpha: String },

    #[error("result has not been aggregated yet")]
    NotAggregated,

    #[error("aggregator {aggregator} cannot run: {reason}")]
    Aggregation {
        aggregator: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("calculations failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculation_error_is_prefixed() {
        let err: Error = CalculationError::DeltaInfeasible.into();
        assert!(err.to_string().starts_with("calculations failed"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: Error = ConfigError::UnknownParameter {
            key: "FOO".into(),
        }
        .into();
        assert_eq!(err.to_string(), "unknown parameter 'FOO'");
    }
}
