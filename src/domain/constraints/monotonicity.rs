use crate::domain::dataset::Dataset;
use crate::domain::expr::{Constraint, VariablesSet};

use super::utility_variable;

/// Monotonicity constraints for one criterion.
///
/// Alternatives are sorted by descending value (input order breaks ties);
/// each consecutive pair `(better, worse)` yields
/// `u(worse) - u(better) <= 0`, or `= 0` when the values are equal.
pub fn monotonicity_constraints(dataset: &Dataset, criterion: usize) -> Vec<Constraint> {
    let name = &dataset.criteria()[criterion].name;
    let alternatives = dataset.alternatives();

    let mut order: Vec<usize> = (0..alternatives.len()).collect();
    order.sort_by(|&a, &b| {
        dataset
            .value(b, criterion)
            .total_cmp(&dataset.value(a, criterion))
    });

    order
        .windows(2)
        .map(|pair| {
            let (better, worse) = (pair[0], pair[1]);
            let better_alt = &alternatives[better];
            let worse_alt = &alternatives[worse];
            let lhs = VariablesSet::from_variables([
                utility_variable(name, worse_alt, 1.0),
                utility_variable(name, better_alt, -1.0),
            ]);
            let constraint_name = format!("monotonicity_{name}_{worse_alt}_{better_alt}");
            if dataset.value(better, criterion) == dataset.value(worse, criterion) {
                Constraint::eq(constraint_name, lhs, 0.0)
            } else {
                Constraint::leq(constraint_name, lhs, 0.0)
            }
        })
        .collect()
}
