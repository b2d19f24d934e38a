//! `ror check`: validate a dataset and its parameters without solving.

use serde_json::json;

use crate::cli::output;
use crate::cli::DatasetArgs;
use crate::error::Result;

#[allow(clippy::result_large_err)]
pub(super) fn execute(args: &DatasetArgs) -> Result<()> {
    let session = args.open()?;
    let dataset = &session.loaded.dataset;
    let parameters = &session.parameters;
    let aggregator = parameters.results_aggregator()?;
    let tie_resolver = parameters.tie_resolver()?;

    if output::is_json() {
        output::emit_json(
            "check",
            json!({
                "alternatives": dataset.alternatives(),
                "criteria": dataset.criteria(),
                "preferences": dataset.preferences().len(),
                "intensities": dataset.intensities().len(),
                "aggregator": aggregator.name(),
                "tie_resolver": tie_resolver.name(),
                "parameters": parameters,
            }),
        );
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Dataset");
    output::field("Path", args.dataset.display());
    output::field("Alternatives", dataset.alternatives().len());
    let criteria: Vec<String> = dataset
        .criteria()
        .iter()
        .map(|c| format!("{}[{}]", c.name, c.kind.marker()))
        .collect();
    output::field("Criteria", criteria.join(", "));
    output::field("Preferences", dataset.preferences().len());
    output::field("Intensities", dataset.intensities().len());

    output::section("Parameters");
    output::field("Aggregator", output::highlight(aggregator));
    output::field("Tie resolver", output::highlight(tie_resolver));
    output::field("Eps", parameters.eps());
    output::field("M", parameters.big_m());
    output::field("Initial alpha", parameters.initial_alpha());
    output::field("Precision", parameters.precision());

    output::success("Dataset is valid");
    Ok(())
}
