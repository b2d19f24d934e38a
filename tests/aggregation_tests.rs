mod support;

use ror_uta::app::{AggregatorKind, RorParameters, TieResolverKind};
use ror_uta::domain::{AlphaValues, RorResult};
use ror_uta::error::{CalculationError, Error};

use support::{assert_near, rqs_result};

fn aggregate(aggregator: AggregatorKind, tie_resolver: TieResolverKind) -> RorResult {
    let parameters = RorParameters::new();
    let aggregator = aggregator.build();
    let mut result = rqs_result(aggregator.alpha_values(&parameters));
    aggregator
        .aggregate(&mut result, &parameters, tie_resolver.build().as_ref())
        .unwrap();
    result
}

fn final_groups(result: &RorResult) -> Vec<Vec<String>> {
    result
        .final_rank()
        .unwrap()
        .alternatives()
        .into_iter()
        .map(|group| group.into_iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn default_aggregator_ties_rank_reversals() {
    let result = aggregate(AggregatorKind::Default, TieResolverKind::NoTieResolver);
    assert_eq!(final_groups(&result), vec![vec!["a2"], vec!["a1", "a3"]]);
    assert_eq!(result.intermediate_ranks().len(), 3);
    assert_eq!(result.aggregator(), Some("DefaultResultAggregator"));
    assert_eq!(result.tie_resolver(), Some("NoTieResolver"));
}

#[test]
fn tie_resolvers_only_reorder_inside_groups() {
    for resolver in [TieResolverKind::Borda, TieResolverKind::Copeland] {
        let result = aggregate(AggregatorKind::Default, resolver);
        assert_eq!(
            final_groups(&result),
            vec![vec!["a2"], vec!["a3", "a1"]],
            "{resolver}"
        );
    }
}

#[test]
fn voting_aggregators_rank_by_score_descending() {
    for kind in [AggregatorKind::Borda, AggregatorKind::Copeland] {
        let result = aggregate(kind, TieResolverKind::NoTieResolver);
        assert_eq!(
            final_groups(&result),
            vec![vec!["a2"], vec!["a3"], vec!["a1"]],
            "{kind}"
        );
    }

    let borda = aggregate(AggregatorKind::Borda, TieResolverKind::NoTieResolver);
    let rank = borda.final_rank().unwrap();
    assert_near(rank.item("a2").unwrap().value, 3.0, 1e-12);
    assert_near(rank.item("a3").unwrap().value, 5.0 / 3.0, 1e-12);
    assert_near(rank.item("a1").unwrap().value, 4.0 / 3.0, 1e-12);
}

#[test]
fn weighted_aggregator_divides_by_weights() {
    let mut parameters = RorParameters::new();
    parameters.set("ALPHA_VALUES", "[0.5, 0.0, 1.0]").unwrap();
    parameters.set("ALPHA_WEIGHTS", "[1, 2, 1]").unwrap();
    let aggregator = AggregatorKind::Weighted.build();
    let mut result = rqs_result(aggregator.alpha_values(&parameters));
    aggregator
        .aggregate(&mut result, &parameters, TieResolverKind::default().build().as_ref())
        .unwrap();

    assert_eq!(final_groups(&result), vec![vec!["a2"], vec!["a3"], vec!["a1"]]);
    let rank = result.final_rank().unwrap();
    assert_near(rank.item("a2").unwrap().value, 2.5, 1e-12);
    assert_near(rank.item("a1").unwrap().value, 5.0, 1e-12);

    let text = aggregator.explain(&result, &parameters, "a1", "a3").unwrap();
    assert!(text.starts_with("a1 is worse than a3"), "{text}");
}

#[test]
fn missing_alpha_column_fails_aggregation() {
    let parameters = RorParameters::new();
    let aggregator = AggregatorKind::Borda.build();
    let mut result = rqs_result(AlphaValues::linspace(5));
    let err = aggregator
        .aggregate(&mut result, &parameters, TieResolverKind::default().build().as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Calculation(CalculationError::MissingResult { .. })
    ));
    assert!(result.final_rank().is_none());
}

#[test]
fn explain_before_aggregation_is_an_error() {
    let parameters = RorParameters::new();
    let aggregator = AggregatorKind::Default.build();
    let result = rqs_result(aggregator.alpha_values(&parameters));
    let err = aggregator.explain(&result, &parameters, "a1", "a2").unwrap_err();
    assert!(matches!(err, Error::Calculation(CalculationError::NotAggregated)));
}

#[test]
fn parameter_sources_stack_by_precedence() {
    let config = RorParameters {
        eps: Some(0.1),
        precision: Some(2),
        number_of_alpha_values: Some(5),
        ..RorParameters::default()
    };
    let dataset = RorParameters {
        eps: Some(0.01),
        precision: Some(4),
        ..RorParameters::default()
    };
    let cli = RorParameters {
        eps: Some(0.001),
        ..RorParameters::default()
    };

    let effective = config.overlay(&dataset).overlay(&cli);
    assert_eq!(effective.eps(), 0.001);
    assert_eq!(effective.precision(), 4);
    assert_eq!(effective.number_of_alpha_values(), 5);
    assert_eq!(effective.initial_alpha(), 0.0);
}
