//! `ror aggregators`: list the registries.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::app::{AggregatorKind, TieResolverKind};
use crate::cli::output;

#[derive(Tabled)]
struct RegistryRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Default")]
    default: &'static str,
    #[tabled(rename = "Description")]
    help: &'static str,
}

fn mark(is_default: bool) -> &'static str {
    if is_default {
        "yes"
    } else {
        ""
    }
}

fn aggregator_rows() -> Vec<RegistryRow> {
    AggregatorKind::ALL
        .into_iter()
        .map(|kind| RegistryRow {
            name: kind.name(),
            default: mark(kind == AggregatorKind::default()),
            help: kind.build().help(),
        })
        .collect()
}

fn tie_resolver_rows() -> Vec<RegistryRow> {
    TieResolverKind::ALL
        .into_iter()
        .map(|kind| RegistryRow {
            name: kind.name(),
            default: mark(kind == TieResolverKind::default()),
            help: kind.build().help(),
        })
        .collect()
}

pub(super) fn execute() {
    if output::is_json() {
        let entries = |rows: Vec<RegistryRow>| -> Vec<serde_json::Value> {
            rows.into_iter()
                .map(|row| json!({ "name": row.name, "default": !row.default.is_empty(), "help": row.help }))
                .collect()
        };
        output::emit_json(
            "aggregators",
            json!({
                "aggregators": entries(aggregator_rows()),
                "tie_resolvers": entries(tie_resolver_rows()),
            }),
        );
        return;
    }

    output::section("Result aggregators");
    output::lines(&Table::new(aggregator_rows()).to_string());
    output::section("Tie resolvers");
    output::lines(&Table::new(tie_resolver_rows()).to_string());
}
