//! Aggregator, tie resolver and dataset setup from resolved parameters.

use tracing::info;

use crate::app::aggregator::ResultAggregator;
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::domain::dataset::Dataset;
use crate::error::ConfigError;

/// Build the aggregator named by `RESULTS_AGGREGATOR`.
pub(crate) fn build_aggregator(
    parameters: &RorParameters,
) -> Result<Box<dyn ResultAggregator>, ConfigError> {
    let aggregator = parameters.results_aggregator()?.build();
    info!(aggregator = aggregator.name(), "Aggregator selected");
    Ok(aggregator)
}

/// Build the tie resolver named by `TIE_RESOLVER`.
pub(crate) fn build_tie_resolver(
    parameters: &RorParameters,
) -> Result<Box<dyn TieResolver>, ConfigError> {
    let tie_resolver = parameters.tie_resolver()?.build();
    info!(tie_resolver = tie_resolver.name(), "Tie resolver selected");
    Ok(tie_resolver)
}

/// Copy of `dataset` carrying the run's `EPS` and `M`.
pub(crate) fn prepare_dataset(dataset: &Dataset, parameters: &RorParameters) -> Dataset {
    dataset
        .clone()
        .with_eps(parameters.eps())
        .with_big_m(parameters.big_m())
}
