//! Tie resolvers reorder alternatives inside tied groups of a final rank.
//!
//! Group boundaries never move. A resolver only decides which member of a
//! tied group is listed first, using a voting score where higher is better.

use std::fmt;
use std::str::FromStr;

use crate::app::config::RorParameters;
use crate::app::voting::{BordaVoter, CopelandVoter};
use crate::domain::rank::Rank;
use crate::domain::result::RorResult;
use crate::error::{ConfigError, Result};

/// Reorders the members of each tied group in a rank.
pub trait TieResolver: Send + Sync {
    fn kind(&self) -> TieResolverKind;

    /// Registry name.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn help(&self) -> &'static str;

    /// Reorder `rank` in place. Scores come from `result`.
    fn resolve(&self, rank: &mut Rank, result: &RorResult, parameters: &RorParameters)
        -> Result<()>;
}

/// Known tie resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieResolverKind {
    #[default]
    NoTieResolver,
    Borda,
    Copeland,
}

impl TieResolverKind {
    pub const ALL: [TieResolverKind; 3] = [Self::NoTieResolver, Self::Borda, Self::Copeland];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoTieResolver => "NoTieResolver",
            Self::Borda => "BordaTieResolver",
            Self::Copeland => "CopelandTieResolver",
        }
    }

    pub fn build(self) -> Box<dyn TieResolver> {
        match self {
            Self::NoTieResolver => Box::new(NoTieResolver),
            Self::Borda => Box::new(BordaTieResolver),
            Self::Copeland => Box::new(CopelandTieResolver),
        }
    }
}

impl fmt::Display for TieResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TieResolverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownTieResolver {
                name: name.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Leaves the rank untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTieResolver;

impl TieResolver for NoTieResolver {
    fn kind(&self) -> TieResolverKind {
        TieResolverKind::NoTieResolver
    }

    fn help(&self) -> &'static str {
        "Keeps tied alternatives in the order the aggregator produced."
    }

    fn resolve(&self, _rank: &mut Rank, _result: &RorResult, _parameters: &RorParameters) -> Result<()> {
        Ok(())
    }
}

/// Orders tied alternatives by mean Borda points over all alpha columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct BordaTieResolver;

impl TieResolver for BordaTieResolver {
    fn kind(&self) -> TieResolverKind {
        TieResolverKind::Borda
    }

    fn help(&self) -> &'static str {
        "Orders tied alternatives by their mean Borda points over the alpha columns; \
         more points come first."
    }

    fn resolve(&self, rank: &mut Rank, result: &RorResult, _parameters: &RorParameters) -> Result<()> {
        let votes = BordaVoter.vote(&result.alternative_scores()?);
        sort_within_groups(rank, |alternative| votes.mean_of(alternative));
        Ok(())
    }
}

/// Orders tied alternatives by their normalized Copeland score.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopelandTieResolver;

impl TieResolver for CopelandTieResolver {
    fn kind(&self) -> TieResolverKind {
        TieResolverKind::Copeland
    }

    fn help(&self) -> &'static str {
        "Orders tied alternatives by their pairwise Copeland score over the alpha columns; \
         a higher score comes first."
    }

    fn resolve(&self, rank: &mut Rank, result: &RorResult, parameters: &RorParameters) -> Result<()> {
        let votes = CopelandVoter::new(parameters.eps()).vote(&result.alternative_scores()?);
        sort_within_groups(rank, |alternative| votes.mean_of(alternative));
        Ok(())
    }
}

/// Stable descending sort of every group by `score`. Alternatives without a
/// score sort last.
fn sort_within_groups(rank: &mut Rank, score: impl Fn(&str) -> Option<f64>) {
    for group in rank.groups_mut() {
        group.sort_by(|a, b| {
            let a = score(&a.alternative).unwrap_or(f64::NEG_INFINITY);
            let b = score(&b.alternative).unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alpha::AlphaValues;
    use crate::domain::rank::{Order, RankItem};

    fn result() -> RorResult {
        let mut result = RorResult::new(
            vec!["a1".into(), "a2".into(), "a3".into()],
            AlphaValues::from_values(&[0.0, 1.0]),
        );
        // a3 beats a2 on both columns, a1 is far behind
        for (alternative, values) in [("a1", [5.0, 5.0]), ("a2", [2.0, 3.0]), ("a3", [1.0, 2.0])] {
            result.add_result(alternative, "alpha_0.0", values[0]);
            result.add_result(alternative, "alpha_1.0", values[1]);
        }
        result
    }

    fn tied_rank() -> Rank {
        Rank::new(
            "final",
            Order::Ascending,
            vec![
                vec![RankItem::new("a2", 1.0), RankItem::new("a3", 1.0)],
                vec![RankItem::new("a1", 2.0)],
            ],
        )
    }

    #[test]
    fn test_registry_names() {
        assert_eq!("BordaTieResolver".parse::<TieResolverKind>().unwrap(), TieResolverKind::Borda);
        assert_eq!(
            "copelandtieresolver".parse::<TieResolverKind>().unwrap(),
            TieResolverKind::Copeland
        );
        let err = "Coin".parse::<TieResolverKind>().unwrap_err();
        assert!(err.to_string().contains("NoTieResolver, BordaTieResolver, CopelandTieResolver"));
        for kind in TieResolverKind::ALL {
            assert_eq!(kind.build().kind(), kind);
            assert!(!kind.build().help().is_empty());
        }
    }

    #[test]
    fn test_no_tie_resolver_is_identity() {
        let mut rank = tied_rank();
        NoTieResolver
            .resolve(&mut rank, &result(), &RorParameters::new())
            .unwrap();
        assert_eq!(rank, tied_rank());
    }

    #[test]
    fn test_borda_reorders_inside_groups_only() {
        let mut rank = tied_rank();
        BordaTieResolver
            .resolve(&mut rank, &result(), &RorParameters::new())
            .unwrap();
        assert_eq!(rank.alternatives(), vec![vec!["a3", "a2"], vec!["a1"]]);
    }

    #[test]
    fn test_copeland_reorders_inside_groups_only() {
        let mut rank = tied_rank();
        CopelandTieResolver
            .resolve(&mut rank, &result(), &RorParameters::new())
            .unwrap();
        assert_eq!(rank.alternatives(), vec![vec!["a3", "a2"], vec!["a1"]]);
    }

    #[test]
    fn test_equal_scores_keep_order() {
        let mut result = RorResult::new(
            vec!["x".into(), "y".into()],
            AlphaValues::from_values(&[0.5]),
        );
        result.add_result("x", "alpha_0.5", 1.0);
        result.add_result("y", "alpha_0.5", 1.0);
        let mut rank = Rank::new(
            "final",
            Order::Ascending,
            vec![vec![RankItem::new("y", 1.0), RankItem::new("x", 1.0)]],
        );
        CopelandTieResolver
            .resolve(&mut rank, &result, &RorParameters::new())
            .unwrap();
        assert_eq!(rank.alternatives(), vec![vec!["y", "x"]]);
    }
}
