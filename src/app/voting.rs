//! Voting schemes over per-alpha distance columns.
//!
//! Each alpha column acts as one voter. Lower distance is better in every
//! column; both voters produce a score where higher is better.

use serde::Serialize;

/// Per-alternative scores in column order, as produced by
/// [`RorResult::alternative_scores`](crate::domain::result::RorResult::alternative_scores).
pub type ScoreColumns = [(String, Vec<f64>)];

/// Borda points: in each column the best alternative gets `n` points and the
/// worst gets 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct BordaVoter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BordaVotes {
    /// Points per alternative, one entry per column.
    pub points: Vec<(String, Vec<f64>)>,
    /// Mean points per alternative.
    pub mean: Vec<(String, f64)>,
}

impl BordaVotes {
    pub fn mean_of(&self, alternative: &str) -> Option<f64> {
        self.mean
            .iter()
            .find(|(a, _)| a == alternative)
            .map(|(_, v)| *v)
    }

    pub fn points_of(&self, alternative: &str) -> Option<&[f64]> {
        self.points
            .iter()
            .find(|(a, _)| a == alternative)
            .map(|(_, p)| p.as_slice())
    }
}

impl BordaVoter {
    pub fn vote(&self, scores: &ScoreColumns) -> BordaVotes {
        let n = scores.len();
        let columns = scores.first().map_or(0, |(_, values)| values.len());
        let mut points: Vec<(String, Vec<f64>)> = scores
            .iter()
            .map(|(alternative, _)| (alternative.clone(), vec![0.0; columns]))
            .collect();

        for column in 0..columns {
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| scores[a].1[column].total_cmp(&scores[b].1[column]));
            for (position, &alternative) in order.iter().enumerate() {
                points[alternative].1[column] = (n - position) as f64;
            }
        }

        let mean = points
            .iter()
            .map(|(alternative, p)| {
                let total: f64 = p.iter().sum();
                let mean = if columns == 0 { 0.0 } else { total / columns as f64 };
                (alternative.clone(), mean)
            })
            .collect();

        BordaVotes { points, mean }
    }
}

/// Copeland pairwise voting: in each column the alternative with the lower
/// distance wins the pair (1 point), an `eps`-tie gives 0.5 to each.
#[derive(Debug, Clone, Copy)]
pub struct CopelandVoter {
    pub eps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopelandVotes {
    pub alternatives: Vec<String>,
    /// `matrix[i][j]`: points `i` collected against `j` over all columns.
    pub matrix: Vec<Vec<f64>>,
    /// Row sums normalized by `columns * (n - 1)`.
    pub mean: Vec<(String, f64)>,
}

impl CopelandVotes {
    pub fn mean_of(&self, alternative: &str) -> Option<f64> {
        self.mean
            .iter()
            .find(|(a, _)| a == alternative)
            .map(|(_, v)| *v)
    }

    pub fn against(&self, alternative_1: &str, alternative_2: &str) -> Option<f64> {
        let i = self.alternatives.iter().position(|a| a == alternative_1)?;
        let j = self.alternatives.iter().position(|a| a == alternative_2)?;
        Some(self.matrix[i][j])
    }
}

impl CopelandVoter {
    pub fn new(eps: f64) -> Self {
        Self { eps }
    }

    pub fn vote(&self, scores: &ScoreColumns) -> CopelandVotes {
        let n = scores.len();
        let columns = scores.first().map_or(0, |(_, values)| values.len());
        let mut matrix = vec![vec![0.0; n]; n];

        for column in 0..columns {
            for i in 0..n {
                for j in (i + 1)..n {
                    let (a, b) = (scores[i].1[column], scores[j].1[column]);
                    if a + self.eps < b {
                        matrix[i][j] += 1.0;
                    } else if b + self.eps < a {
                        matrix[j][i] += 1.0;
                    } else {
                        matrix[i][j] += 0.5;
                        matrix[j][i] += 0.5;
                    }
                }
            }
        }

        let normalizer = (columns * n.saturating_sub(1)) as f64;
        let mean = scores
            .iter()
            .zip(&matrix)
            .map(|((alternative, _), row)| {
                let total: f64 = row.iter().sum();
                let mean = if normalizer > 0.0 { total / normalizer } else { 0.0 };
                (alternative.clone(), mean)
            })
            .collect();

        CopelandVotes {
            alternatives: scores.iter().map(|(a, _)| a.clone()).collect(),
            matrix,
            mean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> Vec<(String, Vec<f64>)> {
        vec![
            ("a1".into(), vec![1.0, 2.0, 3.0]),
            ("a2".into(), vec![0.0, 1.0, 2.0]),
            ("a3".into(), vec![2.0, 1.0, 2.0]),
        ]
    }

    #[test]
    fn test_borda_points() {
        let votes = BordaVoter.vote(&scores());

        // column 0: a2 < a1 < a3
        assert_eq!(votes.points_of("a2").unwrap()[0], 3.0);
        assert_eq!(votes.points_of("a1").unwrap()[0], 2.0);
        assert_eq!(votes.points_of("a3").unwrap()[0], 1.0);
        // column 1: a2 and a3 tie at 1.0, input order keeps a2 first
        assert_eq!(votes.points_of("a2").unwrap()[1], 3.0);
        assert_eq!(votes.points_of("a3").unwrap()[1], 2.0);

        assert!((votes.mean_of("a2").unwrap() - 3.0).abs() < 1e-12);
        assert!((votes.mean_of("a1").unwrap() - 4.0 / 3.0).abs() < 1e-12);
        assert!((votes.mean_of("a3").unwrap() - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_copeland_matrix() {
        let votes = CopelandVoter::new(1e-9).vote(&scores());

        // a2 beats a1 in every column
        assert_eq!(votes.against("a2", "a1"), Some(3.0));
        assert_eq!(votes.against("a1", "a2"), Some(0.0));
        // a2 vs a3: win, tie, tie
        assert_eq!(votes.against("a2", "a3"), Some(2.0));
        assert_eq!(votes.against("a3", "a2"), Some(1.0));
        assert_eq!(votes.against("a1", "a1"), Some(0.0));

        // a2 row: 3 + 2 = 5 over 3 columns * 2 opponents
        assert!((votes.mean_of("a2").unwrap() - 5.0 / 6.0).abs() < 1e-12);
        let total: f64 = votes.mean.iter().map(|(_, m)| m).sum();
        // every pair hands out one point per column
        assert!((total * 6.0 - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_alternative() {
        let single = vec![("a".to_string(), vec![1.0, 2.0])];
        assert_eq!(CopelandVoter::new(1e-6).vote(&single).mean_of("a"), Some(0.0));
        assert_eq!(BordaVoter.vote(&single).mean_of("a"), Some(1.0));
    }
}
