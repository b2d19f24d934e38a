//! Result aggregators.
//!
//! An aggregator turns the per-alternative, per-alpha distance table of a
//! [`RorResult`] into one final rank. Each aggregator also decides which alpha
//! values the distance phase samples.
//!
//! - **Default**: rank reversal between the extreme alphas Q (0.0) and S (1.0)
//!   around the middle rank R (0.5)
//! - **Weighted**: distances divided by per-alpha weights and summed
//! - **Borda**: mean Borda points over evenly spaced alphas
//! - **Copeland**: normalized pairwise wins over evenly spaced alphas
//!
//! Aggregators hold no state. A [`TieResolver`] is passed in explicitly and
//! applied to the final rank.

mod borda;
mod copeland;
mod default;
mod weighted;

pub use borda::BordaResultAggregator;
pub use copeland::CopelandResultAggregator;
pub use default::DefaultResultAggregator;
pub use weighted::{WeightedResultAggregator, BIG_NUMBER};

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::domain::alpha::{AlphaValue, AlphaValues};
use crate::domain::rank::{Order, Rank, RankItem};
use crate::domain::result::RorResult;
use crate::error::{CalculationError, ConfigError, ModelError, Result};

/// Name of the rank every aggregator produces last.
pub const FINAL_RANK: &str = "final";

/// Aggregates a populated result into intermediate and final ranks.
pub trait ResultAggregator: Send + Sync {
    fn kind(&self) -> AggregatorKind;

    /// Registry name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn help(&self) -> &'static str;

    /// Alpha values the distance phase must sample for this aggregator.
    fn alpha_values(&self, parameters: &RorParameters) -> AlphaValues;

    /// Fill the intermediate ranks and the final rank of `result`.
    fn aggregate(
        &self,
        result: &mut RorResult,
        parameters: &RorParameters,
        tie_resolver: &dyn TieResolver,
    ) -> Result<()>;

    /// Describe why `alternative_1` and `alternative_2` are ordered the way
    /// they are. Call after [`aggregate`](Self::aggregate).
    fn explain(
        &self,
        result: &RorResult,
        parameters: &RorParameters,
        alternative_1: &str,
        alternative_2: &str,
    ) -> Result<String>;
}

/// Known aggregators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregatorKind {
    #[default]
    Default,
    Weighted,
    Borda,
    Copeland,
}

impl AggregatorKind {
    pub const ALL: [AggregatorKind; 4] =
        [Self::Default, Self::Weighted, Self::Borda, Self::Copeland];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "DefaultResultAggregator",
            Self::Weighted => "WeightedResultAggregator",
            Self::Borda => "BordaResultAggregator",
            Self::Copeland => "CopelandResultAggregator",
        }
    }

    pub fn build(self) -> Box<dyn ResultAggregator> {
        match self {
            Self::Default => Box::new(DefaultResultAggregator),
            Self::Weighted => Box::new(WeightedResultAggregator),
            Self::Borda => Box::new(BordaResultAggregator),
            Self::Copeland => Box::new(CopelandResultAggregator),
        }
    }
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownAggregator {
                name: name.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Scores of every alternative under one alpha, in result order.
fn column(result: &RorResult, alpha: &AlphaValue) -> Result<Vec<RankItem>> {
    let key = alpha.key();
    result
        .alternatives()
        .iter()
        .map(|alternative| {
            result
                .score(alternative, &key)
                .map(|value| RankItem::new(alternative.as_str(), value))
                .ok_or_else(|| {
                    CalculationError::MissingResult {
                        alternative: alternative.clone(),
                        alpha: key.clone(),
                    }
                    .into()
                })
        })
        .collect()
}

/// One ε-grouped ascending rank per alpha value, named after the alpha.
fn alpha_ranks(result: &RorResult, eps: f64) -> Result<Vec<Rank>> {
    result
        .alpha_values()
        .iter()
        .map(|alpha| {
            let items = column(result, alpha)?;
            Ok(Rank::grouped(alpha.name.as_str(), items, Order::Ascending, eps))
        })
        .collect()
}

/// Apply the tie resolver, then store the final rank and the names used.
fn finish(
    aggregator: &dyn ResultAggregator,
    result: &mut RorResult,
    mut rank: Rank,
    parameters: &RorParameters,
    tie_resolver: &dyn TieResolver,
) -> Result<()> {
    tie_resolver.resolve(&mut rank, result, parameters)?;
    info!(
        aggregator = aggregator.name(),
        tie_resolver = tie_resolver.name(),
        rank = %rank,
        "Aggregation complete"
    );
    result.set_final_rank(rank);
    result.set_aggregator(aggregator.name());
    result.set_tie_resolver(tie_resolver.name());
    Ok(())
}

fn final_rank(result: &RorResult) -> Result<&Rank> {
    result
        .final_rank()
        .ok_or_else(|| CalculationError::NotAggregated.into())
}

fn ensure_known(result: &RorResult, alternative: &str) -> Result<()> {
    if result.alternatives().iter().any(|a| a == alternative) {
        Ok(())
    } else {
        Err(ModelError::UnknownAlternative(alternative.to_string()).into())
    }
}

/// Wording for how position `position_1` compares to `position_2`.
fn relative(position_1: usize, position_2: usize) -> &'static str {
    match position_1.cmp(&position_2) {
        std::cmp::Ordering::Less => "better than",
        std::cmp::Ordering::Equal => "tied with",
        std::cmp::Ordering::Greater => "worse than",
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for kind in AggregatorKind::ALL {
            assert_eq!(kind.name().parse::<AggregatorKind>().unwrap(), kind);
            let aggregator = kind.build();
            assert_eq!(aggregator.kind(), kind);
            assert!(!aggregator.help().is_empty());
        }
    }

    #[test]
    fn test_unknown_aggregator_lists_available() {
        let err = "Majority".parse::<AggregatorKind>().unwrap_err();
        assert!(matches!(&err, ConfigError::UnknownAggregator { name, .. } if name == "Majority"));
        assert!(err.to_string().contains("BordaResultAggregator"));
    }

    #[test]
    fn test_relative_wording() {
        assert_eq!(relative(1, 2), "better than");
        assert_eq!(relative(2, 2), "tied with");
        assert_eq!(relative(3, 2), "worse than");
    }
}
