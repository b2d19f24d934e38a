use tracing::debug;

use crate::domain::dataset::Dataset;
use crate::domain::expr::{Constraint, VariablesSet};

use super::{delta_variable, utility_variable};

/// Gaps smaller than this between consecutive characteristic points skip
/// the slope constraint at that index.
pub const SLOPE_DIFF_EPS: f64 = 1e-10;

/// How the slope bound enters the constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeltaTerm {
    /// `delta` is a decision variable (phase 1).
    Variable,
    /// `delta` is fixed to the phase-1 optimum (phase 2).
    Fixed(f64),
}

/// Bound the change of slope between consecutive characteristic points.
///
/// Points are the alternatives sorted by ascending value on each criterion.
/// For every index `l >= 2` with `a = 1 / (g_l - g_{l-1})` and
/// `b = 1 / (g_{l-1} - g_{l-2})`:
///
/// ```text
///  a (u_l - u_{l-1}) - b (u_{l-1} - u_{l-2}) - delta <= 0
/// -a (u_l - u_{l-1}) + b (u_{l-1} - u_{l-2}) - delta <= 0
/// ```
///
/// Fewer than three alternatives yield no constraints.
pub fn slope_constraints(dataset: &Dataset, delta: DeltaTerm) -> Vec<Constraint> {
    let alternatives = dataset.alternatives();
    if alternatives.len() < 3 {
        debug!(
            alternatives = alternatives.len(),
            "Fewer than 3 alternatives, skipping slope constraints"
        );
        return Vec::new();
    }

    let mut constraints = Vec::new();
    for (c, criterion) in dataset.criteria().iter().enumerate() {
        let name = &criterion.name;
        let mut order: Vec<usize> = (0..alternatives.len()).collect();
        order.sort_by(|&a, &b| dataset.value(a, c).total_cmp(&dataset.value(b, c)));

        for l in 2..order.len() {
            let (current, previous, before) = (order[l], order[l - 1], order[l - 2]);
            let first_diff = dataset.value(current, c) - dataset.value(previous, c);
            let second_diff = dataset.value(previous, c) - dataset.value(before, c);
            if first_diff.abs() < SLOPE_DIFF_EPS || second_diff.abs() < SLOPE_DIFF_EPS {
                debug!(
                    criterion = %name,
                    index = l,
                    alternative = %alternatives[current],
                    "Duplicate criterion values, skipping slope constraint"
                );
                continue;
            }
            let a = 1.0 / first_diff;
            let b = 1.0 / second_diff;

            let slope = |sign: f64| {
                VariablesSet::from_variables([
                    utility_variable(name, &alternatives[current], sign * a),
                    utility_variable(name, &alternatives[previous], -sign * a),
                    utility_variable(name, &alternatives[previous], -sign * b),
                    utility_variable(name, &alternatives[before], sign * b),
                ])
            };

            for (label, sign) in [("first", 1.0), ("second", -1.0)] {
                let mut lhs = slope(sign);
                let rhs = match delta {
                    DeltaTerm::Variable => {
                        lhs.add(delta_variable(-1.0));
                        0.0
                    }
                    DeltaTerm::Fixed(value) => value,
                };
                constraints.push(Constraint::leq(
                    format!("{label}_slope_{name}_{l}"),
                    lhs,
                    rhs,
                ));
            }
        }
    }
    constraints
}
