//! Borda count over evenly spaced alphas.

use crate::app::aggregator::{
    alpha_ranks, ensure_known, final_rank, finish, relative, AggregatorKind, ResultAggregator,
    FINAL_RANK,
};
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::app::voting::BordaVoter;
use crate::domain::alpha::AlphaValues;
use crate::domain::rank::{Order, Rank, RankItem};
use crate::domain::result::RorResult;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct BordaResultAggregator;

impl ResultAggregator for BordaResultAggregator {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Borda
    }

    fn help(&self) -> &'static str {
        "Samples NUMBER_OF_ALPHA_VALUES evenly spaced alphas. In every alpha column the \
         closest alternative gets n points and the farthest 1; alternatives are ranked \
         by their mean points, more first."
    }

    fn alpha_values(&self, parameters: &RorParameters) -> AlphaValues {
        AlphaValues::linspace(parameters.number_of_alpha_values())
    }

    fn aggregate(
        &self,
        result: &mut RorResult,
        parameters: &RorParameters,
        tie_resolver: &dyn TieResolver,
    ) -> Result<()> {
        let eps = parameters.eps();
        let votes = BordaVoter.vote(&result.alternative_scores()?);
        let items = votes
            .mean
            .iter()
            .map(|(alternative, mean)| RankItem::new(alternative.as_str(), *mean))
            .collect();

        for rank in alpha_ranks(result, eps)? {
            result.add_intermediate_rank(rank);
        }
        let rank = Rank::grouped(FINAL_RANK, items, Order::Descending, eps);
        finish(self, result, rank, parameters, tie_resolver)
    }

    fn explain(
        &self,
        result: &RorResult,
        parameters: &RorParameters,
        alternative_1: &str,
        alternative_2: &str,
    ) -> Result<String> {
        ensure_known(result, alternative_1)?;
        ensure_known(result, alternative_2)?;
        let precision = parameters.precision() as usize;
        let rank = final_rank(result)?;
        let votes = BordaVoter.vote(&result.alternative_scores()?);

        let position_1 = rank.position(alternative_1).unwrap_or(0);
        let position_2 = rank.position(alternative_2).unwrap_or(0);
        let points = |alternative: &str| {
            votes
                .points_of(alternative)
                .unwrap_or_default()
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mean_1 = votes.mean_of(alternative_1).unwrap_or_default();
        let mean_2 = votes.mean_of(alternative_2).unwrap_or_default();

        Ok([
            format!(
                "{alternative_1} is {} {alternative_2} in the final rank (positions {position_1} and {position_2}).",
                relative(position_1, position_2)
            ),
            format!("Borda points of {alternative_1} per alpha: [{}]", points(alternative_1)),
            format!("Borda points of {alternative_2} per alpha: [{}]", points(alternative_2)),
            format!(
                "Mean points: {alternative_1} {mean_1:.precision$}, {alternative_2} {mean_2:.precision$}; more is better."
            ),
        ]
        .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::aggregator::fixtures;
    use crate::app::tie_resolver::NoTieResolver;

    #[test]
    fn test_alpha_values_follow_number_of_alpha_values() {
        let mut parameters = RorParameters::new();
        parameters.set("NUMBER_OF_ALPHA_VALUES", "5").unwrap();
        let alphas = BordaResultAggregator.alpha_values(&parameters);
        assert_eq!(
            alphas.keys(),
            vec!["alpha_0.0", "alpha_0.25", "alpha_0.5", "alpha_0.75", "alpha_1.0"]
        );
    }

    #[test]
    fn test_ranks_by_mean_points() {
        let parameters = RorParameters::new();
        let aggregator = BordaResultAggregator;
        let mut result = fixtures::result(aggregator.alpha_values(&parameters));
        aggregator
            .aggregate(&mut result, &parameters, &NoTieResolver)
            .unwrap();

        let rank = result.final_rank().unwrap();
        // means: a2 3, a3 5/3, a1 4/3
        assert_eq!(rank.alternatives(), vec![vec!["a2"], vec!["a3"], vec!["a1"]]);
        assert_eq!(rank.order, Order::Descending);
        assert!((rank.item("a2").unwrap().value - 3.0).abs() < 1e-12);
        assert_eq!(result.intermediate_ranks().len(), 3);

        let text = aggregator.explain(&result, &parameters, "a1", "a3").unwrap();
        assert!(text.starts_with("a1 is worse than a3"));
        assert!(text.contains("Borda points of a1 per alpha: [1, 2, 1]"));
    }

    #[test]
    fn test_explain_before_aggregation_fails() {
        let parameters = RorParameters::new();
        let result = fixtures::result(BordaResultAggregator.alpha_values(&parameters));
        assert!(BordaResultAggregator
            .explain(&result, &parameters, "a1", "a2")
            .is_err());
    }
}
