//! Single solves of the two phases.

use tracing::debug;

use crate::domain::dataset::Dataset;
use crate::domain::model::SolveOutcome;
use crate::domain::ror_model::{Phase, RorModel};
use crate::error::{CalculationError, Result};
use crate::port::Solver;

/// Phase 1: the smallest `delta` admitted by the preference information.
pub(crate) fn solve_delta(solver: &dyn Solver, dataset: &Dataset, alpha: f64) -> Result<f64> {
    let model = RorModel::new(dataset, alpha, Phase::Delta)?;
    debug!(
        alpha,
        constraints = model.model().number_of_constraints(),
        "Delta model built"
    );
    let outcome = model.solve(solver)?;
    RorModel::delta_of(&outcome).ok_or_else(|| CalculationError::DeltaInfeasible.into())
}

/// Phase 2: the distance of `alternative` for `alpha` with `delta` fixed.
pub(crate) fn solve_distance(
    solver: &dyn Solver,
    dataset: &Dataset,
    alternative: &str,
    alpha: f64,
    delta: f64,
) -> Result<f64> {
    let phase = Phase::Distance {
        alternative: alternative.to_string(),
        delta,
    };
    let model = RorModel::new(dataset, alpha, phase)?;
    match model.solve(solver)? {
        SolveOutcome::Optimal(result) => {
            debug!(
                alternative,
                alpha,
                distance = result.objective_value,
                "Distance solved"
            );
            Ok(result.objective_value)
        }
        SolveOutcome::Infeasible => Err(CalculationError::DistanceInfeasible {
            alternative: alternative.to_string(),
            alpha,
        }
        .into()),
    }
}
