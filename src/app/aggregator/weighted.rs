//! Weighted sum of distances.
//!
//! Each distance is divided by the weight of its alpha, so a larger weight
//! shrinks the distance. A zero weight maps the distance to [`BIG_NUMBER`].

use std::collections::BTreeMap;

use crate::app::aggregator::{
    alpha_ranks, ensure_known, final_rank, finish, relative, AggregatorKind, ResultAggregator,
    FINAL_RANK,
};
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::domain::alpha::AlphaValues;
use crate::domain::rank::{Order, Rank, RankItem};
use crate::domain::result::RorResult;
use crate::error::{CalculationError, Result};

/// Weighted value of a distance whose alpha has weight 0.
pub const BIG_NUMBER: f64 = 1e11;

#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedResultAggregator;

impl WeightedResultAggregator {
    /// Weighted distances per alternative, in alpha order.
    fn weighted(
        &self,
        result: &RorResult,
        parameters: &RorParameters,
    ) -> Result<BTreeMap<String, Vec<f64>>> {
        let weights = parameters.alpha_weights();
        let alphas = result.alpha_values().len();
        if weights.len() != alphas {
            return Err(CalculationError::Aggregation {
                aggregator: self.name(),
                reason: format!(
                    "ALPHA_WEIGHTS has {} entries but there are {alphas} alpha values",
                    weights.len()
                ),
            }
            .into());
        }

        Ok(result
            .alternative_scores()?
            .into_iter()
            .map(|(alternative, values)| {
                let weighted = values
                    .iter()
                    .zip(&weights)
                    .map(|(value, weight)| {
                        if *weight == 0.0 {
                            BIG_NUMBER
                        } else {
                            value / weight
                        }
                    })
                    .collect();
                (alternative, weighted)
            })
            .collect())
    }
}

impl ResultAggregator for WeightedResultAggregator {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Weighted
    }

    fn help(&self) -> &'static str {
        "Divides each distance by the weight of its alpha (ALPHA_VALUES, ALPHA_WEIGHTS) \
         and ranks by the sum, lower first. A weight of 0 turns the distance into a very \
         large number."
    }

    fn alpha_values(&self, parameters: &RorParameters) -> AlphaValues {
        AlphaValues::from_values(&parameters.alpha_values())
    }

    fn aggregate(
        &self,
        result: &mut RorResult,
        parameters: &RorParameters,
        tie_resolver: &dyn TieResolver,
    ) -> Result<()> {
        let eps = parameters.eps();
        let weighted = self.weighted(result, parameters)?;
        let items = result
            .alternatives()
            .iter()
            .filter_map(|alternative| {
                let values = weighted.get(alternative)?;
                Some(RankItem::new(alternative.as_str(), values.iter().sum()))
            })
            .collect();

        for rank in alpha_ranks(result, eps)? {
            result.add_intermediate_rank(rank);
        }
        let rank = Rank::grouped(FINAL_RANK, items, Order::Ascending, eps);
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
        let weighted = self.weighted(result, parameters)?;
        let weights = parameters.alpha_weights();

        let position_1 = rank.position(alternative_1).unwrap_or(0);
        let position_2 = rank.position(alternative_2).unwrap_or(0);
        let mut lines = vec![format!(
            "{alternative_1} is {} {alternative_2} in the final rank (positions {position_1} and {position_2}).",
            relative(position_1, position_2)
        )];

        let empty = Vec::new();
        let values_1 = weighted.get(alternative_1).unwrap_or(&empty);
        let values_2 = weighted.get(alternative_2).unwrap_or(&empty);
        for (((alpha, weight), v1), v2) in result
            .alpha_values()
            .iter()
            .zip(&weights)
            .zip(values_1)
            .zip(values_2)
        {
            lines.push(format!(
                "{} (weight {weight}): {alternative_1} {v1:.precision$}, {alternative_2} {v2:.precision$}",
                alpha.name
            ));
        }
        let sum_1: f64 = values_1.iter().sum();
        let sum_2: f64 = values_2.iter().sum();
        lines.push(format!(
            "Weighted sums: {alternative_1} {sum_1:.precision$}, {alternative_2} {sum_2:.precision$}; lower is better."
        ));
        Ok(lines.join("\n"))
    }
}
