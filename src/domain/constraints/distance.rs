use crate::domain::dataset::Dataset;
use crate::domain::expr::{Variable, VariablesSet};
use crate::error::ModelError;

use super::{lambda_variable, utility_variable};

/// Distance of `alternative` from the ideal for the given alpha.
///
/// ```text
/// d(a, alpha) = sum_c (-alpha * g_c(a)) u_c(a) + n (1 - alpha) lambda(a) + alpha n
/// ```
///
/// The constant `alpha * n` is kept as the free term.
pub fn distance(dataset: &Dataset, alternative: &str, alpha: f64) -> Result<VariablesSet, ModelError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ModelError::AlphaOutOfRange(alpha));
    }
    let row = dataset.row(alternative)?;
    let n = dataset.criteria().len() as f64;

    let mut variables: VariablesSet = dataset
        .criteria()
        .iter()
        .zip(row)
        .map(|(criterion, value)| utility_variable(&criterion.name, alternative, -alpha * value))
        .collect();
    variables.extend(
        dataset
            .criteria()
            .iter()
            .map(|_| lambda_variable(alternative, 1.0 - alpha)),
    );
    variables.add(Variable::free(alpha * n));
    Ok(variables)
}
