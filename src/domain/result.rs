//! Per-alternative, per-alpha scores and the ranks derived from them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::alpha::AlphaValues;
use crate::domain::rank::Rank;
use crate::error::CalculationError;

/// Name of the row-sum column.
pub const SUM_COLUMN: &str = "sum";

/// Dense view of the scores: one row per alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    /// Alpha columns followed by [`SUM_COLUMN`].
    pub columns: Vec<String>,
    pub rows: Vec<ScoreRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub alternative: String,
    pub values: Vec<f64>,
    pub sum: f64,
}

impl ScoreTable {
    pub fn row(&self, alternative: &str) -> Option<&ScoreRow> {
        self.rows.iter().find(|row| row.alternative == alternative)
    }
}

/// Results of a run, filled during the distance phase and completed by the
/// aggregator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RorResult {
    alternatives: Vec<String>,
    scores: BTreeMap<String, BTreeMap<String, f64>>,
    alpha_values: AlphaValues,
    delta: Option<f64>,
    intermediate_ranks: Vec<Rank>,
    final_rank: Option<Rank>,
    aggregator: Option<String>,
    tie_resolver: Option<String>,
}

impl RorResult {
    pub fn new(alternatives: Vec<String>, alpha_values: AlphaValues) -> Self {
        Self {
            alternatives,
            alpha_values,
            ..Self::default()
        }
    }

    /// Record the score of `alternative` under the alpha column `alpha_key`.
    pub fn add_result(&mut self, alternative: &str, alpha_key: &str, value: f64) {
        if !self.alternatives.iter().any(|a| a == alternative) {
            self.alternatives.push(alternative.to_string());
        }
        self.scores
            .entry(alternative.to_string())
            .or_default()
            .insert(alpha_key.to_string(), value);
    }

    pub fn score(&self, alternative: &str, alpha_key: &str) -> Option<f64> {
        self.scores.get(alternative)?.get(alpha_key).copied()
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn alpha_values(&self) -> &AlphaValues {
        &self.alpha_values
    }

    pub fn set_delta(&mut self, delta: f64) {
        self.delta = Some(delta);
    }

    pub fn delta(&self) -> Option<f64> {
        self.delta
    }

    /// Scores of every alternative in canonical alpha order.
    pub fn alternative_scores(&self) -> Result<Vec<(String, Vec<f64>)>, CalculationError> {
        self.alternatives
            .iter()
            .map(|alternative| {
                let values = self
                    .alpha_values
                    .iter()
                    .map(|alpha| {
                        self.score(alternative, &alpha.key()).ok_or_else(|| {
                            CalculationError::MissingResult {
                                alternative: alternative.clone(),
                                alpha: alpha.key(),
                            }
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()?;
                Ok((alternative.clone(), values))
            })
            .collect()
    }

    /// Dense table with a row-sum column, rebuilt on every call.
    pub fn table(&self) -> Result<ScoreTable, CalculationError> {
        let mut columns = self.alpha_values.keys();
        columns.push(SUM_COLUMN.to_string());
        let rows = self
            .alternative_scores()?
            .into_iter()
            .map(|(alternative, values)| ScoreRow {
                sum: values.iter().sum(),
                alternative,
                values,
            })
            .collect();
        Ok(ScoreTable { columns, rows })
    }

    pub fn add_intermediate_rank(&mut self, rank: Rank) {
        match self.intermediate_ranks.iter_mut().find(|r| r.name == rank.name) {
            Some(existing) => *existing = rank,
            None => self.intermediate_ranks.push(rank),
        }
    }

    pub fn intermediate_ranks(&self) -> &[Rank] {
        &self.intermediate_ranks
    }

    pub fn intermediate_rank(&self, name: &str) -> Option<&Rank> {
        self.intermediate_ranks.iter().find(|rank| rank.name == name)
    }

    pub fn set_final_rank(&mut self, rank: Rank) {
        self.final_rank = Some(rank);
    }

    pub fn final_rank(&self) -> Option<&Rank> {
        self.final_rank.as_ref()
    }

    pub fn final_rank_mut(&mut self) -> Option<&mut Rank> {
        self.final_rank.as_mut()
    }

    pub fn set_aggregator(&mut self, name: &str) {
        self.aggregator = Some(name.to_string());
    }

    pub fn aggregator(&self) -> Option<&str> {
        self.aggregator.as_deref()
    }

    pub fn set_tie_resolver(&mut self, name: &str) {
        self.tie_resolver = Some(name.to_string());
    }

    pub fn tie_resolver(&self) -> Option<&str> {
        self.tie_resolver.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> RorResult {
        let mut result = RorResult::new(
            vec!["a1".into(), "a2".into()],
            AlphaValues::from_values(&[0.0, 1.0]),
        );
        result.add_result("a1", "alpha_0.0", 1.0);
        result.add_result("a1", "alpha_1.0", 2.0);
        result.add_result("a2", "alpha_0.0", 0.5);
        result.add_result("a2", "alpha_1.0", 0.25);
        result
    }

    #[test]
    fn test_table_has_sum_column() {
        let table = result().table().unwrap();
        assert_eq!(table.columns, vec!["alpha_0.0", "alpha_1.0", "sum"]);
        assert_eq!(table.row("a1").unwrap().sum, 3.0);
        assert_eq!(table.row("a2").unwrap().values, vec![0.5, 0.25]);
    }

    #[test]
    fn test_missing_result_is_reported() {
        let mut result = RorResult::new(vec!["a1".into()], AlphaValues::from_values(&[0.5]));
        result.add_result("a1", "alpha_0.0", 1.0);
        assert!(matches!(
            result.alternative_scores(),
            Err(CalculationError::MissingResult { .. })
        ));
    }

    #[test]
    fn test_add_result_overwrites() {
        let mut result = result();
        result.add_result("a1", "alpha_0.0", 7.0);
        assert_eq!(result.score("a1", "alpha_0.0"), Some(7.0));
        assert_eq!(result.alternatives().len(), 2);
    }
}
