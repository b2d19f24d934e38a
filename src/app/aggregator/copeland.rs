//! Copeland pairwise voting over evenly spaced alphas.

use crate::app::aggregator::{
    alpha_ranks, ensure_known, final_rank, finish, relative, AggregatorKind, ResultAggregator,
    FINAL_RANK,
};
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::app::voting::CopelandVoter;
use crate::domain::alpha::AlphaValues;
use crate::domain::rank::{Order, Rank, RankItem};
use crate::domain::result::RorResult;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopelandResultAggregator;

impl ResultAggregator for CopelandResultAggregator {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Copeland
    }

    fn help(&self) -> &'static str {
        "Samples NUMBER_OF_ALPHA_VALUES evenly spaced alphas. For every pair of \
         alternatives and every alpha the closer one wins a point, a tie within EPS gives \
         half a point each; alternatives are ranked by their normalized score, higher first."
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
        let votes = CopelandVoter::new(eps).vote(&result.alternative_scores()?);
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
        let votes = CopelandVoter::new(parameters.eps()).vote(&result.alternative_scores()?);

        let position_1 = rank.position(alternative_1).unwrap_or(0);
        let position_2 = rank.position(alternative_2).unwrap_or(0);
        let won_1 = votes.against(alternative_1, alternative_2).unwrap_or_default();
        let won_2 = votes.against(alternative_2, alternative_1).unwrap_or_default();
        let mean_1 = votes.mean_of(alternative_1).unwrap_or_default();
        let mean_2 = votes.mean_of(alternative_2).unwrap_or_default();

        Ok([
            format!(
                "{alternative_1} is {} {alternative_2} in the final rank (positions {position_1} and {position_2}).",
                relative(position_1, position_2)
            ),
            format!(
                "Head to head over {} alphas: {alternative_1} {won_1}, {alternative_2} {won_2}.",
                result.alpha_values().len()
            ),
            format!(
                "Copeland scores: {alternative_1} {mean_1:.precision$}, {alternative_2} {mean_2:.precision$}; higher is better."
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
    fn test_ranks_by_pairwise_wins() {
        let parameters = RorParameters::new();
        let aggregator = CopelandResultAggregator;
        let mut result = fixtures::result(aggregator.alpha_values(&parameters));
        aggregator
            .aggregate(&mut result, &parameters, &NoTieResolver)
            .unwrap();

        // row sums a2 5, a3 3, a1 1, over 3 alphas * 2 opponents
        let rank = result.final_rank().unwrap();
        assert_eq!(rank.alternatives(), vec![vec!["a2"], vec!["a3"], vec!["a1"]]);
        assert!((rank.item("a3").unwrap().value - 0.5).abs() < 1e-12);
        assert_eq!(result.aggregator(), Some("CopelandResultAggregator"));

        let text = aggregator.explain(&result, &parameters, "a2", "a3").unwrap();
        assert!(text.contains("Head to head over 3 alphas: a2 2, a3 1."));
    }

    #[test]
    fn test_all_equal_is_one_group() {
        let parameters = RorParameters::new();
        let mut result = RorResult::new(
            vec!["x".into(), "y".into()],
            CopelandResultAggregator.alpha_values(&parameters),
        );
        for alpha in CopelandResultAggregator.alpha_values(&parameters).keys() {
            result.add_result("x", &alpha, 0.5);
            result.add_result("y", &alpha, 0.5);
        }
        CopelandResultAggregator
            .aggregate(&mut result, &parameters, &NoTieResolver)
            .unwrap();
        assert_eq!(
            result.final_rank().unwrap().alternatives(),
            vec![vec!["x", "y"]]
        );
    }
}
