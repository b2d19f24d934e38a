//! `ror solve`: run both phases and print the ranks.

use std::sync::Arc;

use serde_json::json;
use tabled::builder::Builder;
use tabled::{Table, Tabled};

use crate::adapter::solver::HiGHSSolver;
use crate::app::{Orchestrator, Progress};
use crate::cli::output;
use crate::cli::SolveArgs;
use crate::domain::rank::Rank;
use crate::domain::result::{RorResult, SUM_COLUMN};
use crate::error::Result;

#[derive(Tabled)]
struct RankRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Alternatives")]
    alternatives: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[allow(clippy::result_large_err)]
pub(super) fn execute(args: &SolveArgs) -> Result<()> {
    let session = args.dataset.open()?;
    let dataset = &session.loaded.dataset;
    let orchestrator = Orchestrator::new(Arc::new(HiGHSSolver::new()), session.parameters)?;
    let parameters = orchestrator.parameters();
    let precision = parameters.precision();

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Solve");
    output::field("Dataset", args.dataset.dataset.display());
    output::field("Alternatives", dataset.alternatives().len());
    output::field("Aggregator", output::highlight(orchestrator.aggregator().name()));
    output::field("Tie resolver", output::highlight(orchestrator.tie_resolver().name()));

    let alphas = orchestrator.aggregator().alpha_values(parameters).len();
    let total = (2 + dataset.alternatives().len() * alphas) as u64;
    let pb = output::progress_bar(total);
    let mut advance = |fraction: f64, description: &str| {
        pb.set_position((fraction * total as f64).round() as u64);
        pb.set_message(description.to_string());
    };
    let progress: Progress<'_> = &mut advance;
    let outcome = orchestrator.run(dataset, Some(progress));
    pb.finish_and_clear();
    let result = outcome?;

    let explanation = match args.explain.as_deref() {
        Some([a, b]) => Some(orchestrator.aggregator().explain(&result, parameters, a, b)?),
        _ => None,
    };

    if output::is_json() {
        output::emit_json(
            "result",
            json!({
                "result": result,
                "table": result.table()?,
                "parameters": parameters,
                "explanation": explanation,
            }),
        );
        return Ok(());
    }

    if let Some(delta) = result.delta() {
        output::field("Delta", output::score(delta, precision));
    }

    output::section("Scores");
    output::lines(&score_table(&result, precision)?);

    for rank in result.intermediate_ranks() {
        output::section(&format!("Rank {}", rank.name));
        output::lines(&rank_table(rank, precision));
    }

    if let Some(rank) = result.final_rank() {
        output::section("Final rank");
        output::lines(&rank_table(rank, precision));
        output::success(&rank.to_string());
    }

    if let Some(explanation) = explanation {
        output::section("Explanation");
        output::lines(&explanation);
    }
    Ok(())
}

/// One column per alpha plus the row sum.
#[allow(clippy::result_large_err)]
fn score_table(result: &RorResult, precision: u32) -> Result<String> {
    let table = result.table()?;
    let mut builder = Builder::default();

    let mut header = vec!["Alternative".to_string()];
    header.extend(
        result
            .alpha_values()
            .iter()
            .map(|alpha| alpha.name.clone())
            .chain(std::iter::once(SUM_COLUMN.to_string())),
    );
    builder.push_record(header);

    for row in &table.rows {
        let mut record = vec![row.alternative.clone()];
        record.extend(
            row.values
                .iter()
                .chain(std::iter::once(&row.sum))
                .map(|value| output::score(*value, precision)),
        );
        builder.push_record(record);
    }
    Ok(builder.build().to_string())
}

fn rank_table(rank: &Rank, precision: u32) -> String {
    let rows: Vec<RankRow> = rank
        .groups()
        .iter()
        .enumerate()
        .map(|(i, group)| RankRow {
            position: i + 1,
            alternatives: group
                .iter()
                .map(|item| item.alternative.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            value: group
                .iter()
                .map(|item| output::score(item.value, precision))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    Table::new(rows).to_string()
}
