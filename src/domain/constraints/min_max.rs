use crate::domain::dataset::Dataset;
use crate::domain::expr::{Constraint, VariablesSet};

use super::utility_variable;

/// Index of the extreme alternative on a criterion, the first one in input
/// order winning ties.
fn extreme(dataset: &Dataset, criterion: usize, better: fn(f64, f64) -> bool) -> usize {
    (1..dataset.alternatives().len()).fold(0, |best, i| {
        if better(dataset.value(i, criterion), dataset.value(best, criterion)) {
            i
        } else {
            best
        }
    })
}

/// `u_c(worst_c) = 0` for every criterion.
pub fn min_constraints(dataset: &Dataset) -> Vec<Constraint> {
    dataset
        .criteria()
        .iter()
        .enumerate()
        .map(|(c, criterion)| {
            let worst = &dataset.alternatives()[extreme(dataset, c, |a, b| a < b)];
            Constraint::eq(
                format!("min_{}_{worst}", criterion.name),
                VariablesSet::from_variables([utility_variable(&criterion.name, worst, 1.0)]),
                0.0,
            )
        })
        .collect()
}

/// `sum_c u_c(best_c) = 1`.
pub fn max_constraint(dataset: &Dataset) -> Constraint {
    let lhs = dataset
        .criteria()
        .iter()
        .enumerate()
        .map(|(c, criterion)| {
            let best = &dataset.alternatives()[extreme(dataset, c, |a, b| a > b)];
            utility_variable(&criterion.name, best, 1.0)
        })
        .collect();
    Constraint::eq("max", lhs, 1.0)
}
