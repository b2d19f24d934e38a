//! Rank-reversal aggregation over the Q, R and S alphas.
//!
//! R (α = 0.5) gives the base order. An alternative `j` ranked after `i` in R
//! is merged into `i`'s group when the order of the pair is reversed in both
//! extreme ranks Q (α = 0.0) and S (α = 1.0).

use crate::app::aggregator::{
    alpha_ranks, column, ensure_known, final_rank, finish, relative, AggregatorKind,
    ResultAggregator, FINAL_RANK,
};
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::domain::alpha::{AlphaValue, AlphaValues};
use crate::domain::rank::{flat_rank, Order, Rank, RankItem};
use crate::domain::result::RorResult;
use crate::error::{CalculationError, Result};

pub const Q: &str = "Q";
pub const R: &str = "R";
pub const S: &str = "S";

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResultAggregator;

impl DefaultResultAggregator {
    fn alpha<'a>(&self, result: &'a RorResult, name: &str) -> Result<&'a AlphaValue> {
        result.alpha_values().by_name(name).ok_or_else(|| {
            CalculationError::Aggregation {
                aggregator: self.name(),
                reason: format!("alpha value {name} is missing, expected Q, R and S"),
            }
            .into()
        })
    }

    fn rank<'a>(&self, ranks: &'a [Rank], name: &str) -> Result<&'a Rank> {
        ranks.iter().find(|rank| rank.name == name).ok_or_else(|| {
            CalculationError::Aggregation {
                aggregator: self.name(),
                reason: format!("rank {name} is missing"),
            }
            .into()
        })
    }
}

/// Walk `r` in order and pull every later alternative whose position is
/// reversed in both `q` and `s` into the current group.
fn reversal_groups(r: &[RankItem], q: &Rank, s: &Rank) -> Vec<Vec<RankItem>> {
    let position = |rank: &Rank, alternative: &str| rank.position(alternative).unwrap_or(usize::MAX);
    let mut taken = vec![false; r.len()];
    let mut groups = Vec::new();

    for i in 0..r.len() {
        if taken[i] {
            continue;
        }
        taken[i] = true;
        let q_i = position(q, &r[i].alternative);
        let s_i = position(s, &r[i].alternative);
        let mut group = vec![r[i].clone()];
        for j in (i + 1)..r.len() {
            if taken[j] {
                continue;
            }
            if q_i > position(q, &r[j].alternative) && s_i > position(s, &r[j].alternative) {
                taken[j] = true;
                group.push(r[j].clone());
            }
        }
        groups.push(group);
    }
    groups
}

impl ResultAggregator for DefaultResultAggregator {
    fn kind(&self) -> AggregatorKind {
        AggregatorKind::Default
    }

    fn help(&self) -> &'static str {
        "Ranks by the distance at alpha 0.5 (R). Two alternatives are tied when \
         the one behind in R is ahead in both extreme ranks, alpha 0.0 (Q) and alpha 1.0 (S). \
         Always samples exactly these three alpha values."
    }

    fn alpha_values(&self, _parameters: &RorParameters) -> AlphaValues {
        AlphaValues::new(vec![
            AlphaValue::new(0.0, Q),
            AlphaValue::new(0.5, R),
            AlphaValue::new(1.0, S),
        ])
    }

    fn aggregate(
        &self,
        result: &mut RorResult,
        parameters: &RorParameters,
        tie_resolver: &dyn TieResolver,
    ) -> Result<()> {
        let r_alpha = self.alpha(result, R)?;
        self.alpha(result, Q)?;
        self.alpha(result, S)?;

        let r_flat = flat_rank(column(result, r_alpha)?, Order::Ascending);
        let ranks = alpha_ranks(result, parameters.eps())?;
        let groups = reversal_groups(&r_flat, self.rank(&ranks, Q)?, self.rank(&ranks, S)?);

        for rank in ranks {
            result.add_intermediate_rank(rank);
        }
        let rank = Rank::new(FINAL_RANK, Order::Ascending, groups);
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
        let position = |rank: &Rank, alternative: &str| rank.position(alternative).unwrap_or(0);

        let final_1 = position(rank, alternative_1);
        let final_2 = position(rank, alternative_2);
        let mut lines = vec![format!(
            "{alternative_1} is {} {alternative_2} in the final rank (positions {final_1} and {final_2}).",
            relative(final_1, final_2)
        )];

        for name in [R, Q, S] {
            let alpha = self.alpha(result, name)?;
            let Some(intermediate) = result.intermediate_rank(name) else {
                continue;
            };
            let (p1, p2) = (
                position(intermediate, alternative_1),
                position(intermediate, alternative_2),
            );
            let d1 = result.score(alternative_1, &alpha.key()).unwrap_or(f64::NAN);
            let d2 = result.score(alternative_2, &alpha.key()).unwrap_or(f64::NAN);
            lines.push(format!(
                "{name} (alpha {:.1}): {alternative_1} at {p1} with distance {d1:.precision$}, \
                 {alternative_2} at {p2} with distance {d2:.precision$}.",
                alpha.value
            ));
        }

        if final_1 == final_2 {
            lines.push(format!(
                "The alternative behind in R is ahead in both Q and S, so {alternative_1} and \
                 {alternative_2} are indifferent."
            ));
        } else {
            lines.push(
                "Q and S do not both reverse the order given by R, so the R order is kept."
                    .to_string(),
            );
        }
        Ok(lines.join("\n"))
    }
}
