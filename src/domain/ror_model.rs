//! The UTA-GMS model for one alpha value.

use crate::domain::constraints::{
    self, delta_variable, group, DeltaTerm, DELTA_VARIABLE,
};
use crate::domain::dataset::Dataset;
use crate::domain::expr::{Constraint, VariablesSet};
use crate::domain::model::{Model, SolveOutcome};
use crate::error::{ModelError, Result};
use crate::port::Solver;

/// Which of the two solve phases the model is built for.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Minimize `delta` with `delta` as a decision variable.
    Delta,
    /// Minimize the distance of `alternative` with `delta` fixed.
    Distance { alternative: String, delta: f64 },
}

/// A [`Model`] populated with the full constraint battery at construction.
#[derive(Debug, Clone)]
pub struct RorModel {
    model: Model,
    alpha: f64,
    phase: Phase,
}

impl RorModel {
    pub fn new(dataset: &Dataset, alpha: f64, phase: Phase) -> std::result::Result<Self, ModelError> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(ModelError::AlphaOutOfRange(alpha));
        }
        let count = dataset.alternatives().len();
        if count < 2 {
            return Err(ModelError::NotEnoughAlternatives {
                required: 2,
                actual: count,
            });
        }

        let name = match &phase {
            Phase::Delta => format!("delta, alpha {alpha}"),
            Phase::Distance { alternative, .. } => format!("distance of {alternative}, alpha {alpha}"),
        };
        let mut model = Model::new(name);

        for relation in dataset.preferences() {
            model.add_constraint(
                constraints::preference_constraint(dataset, relation, alpha)?,
                group::PREFERENCE,
            );
        }
        for relation in dataset.intensities() {
            model.add_constraint(
                constraints::intensity_constraint(dataset, relation, alpha)?,
                group::INTENSITY,
            );
        }
        for (c, criterion) in dataset.criteria().iter().enumerate() {
            model.add_constraints(
                constraints::monotonicity_constraints(dataset, c),
                &group::monotonicity(&criterion.name),
            );
        }
        model.add_constraints(constraints::min_constraints(dataset), group::MIN);
        model.add_constraint(constraints::max_constraint(dataset), group::MAX);

        let mut reference = dataset.reference_alternatives();
        if let Phase::Distance { alternative, .. } = &phase {
            if dataset.alternative_index(alternative).is_none() {
                return Err(ModelError::UnknownAlternative(alternative.clone()));
            }
            if !reference.contains(&alternative.as_str()) {
                reference.push(alternative.as_str());
            }
        }
        model.add_constraints(
            constraints::inner_maximization_constraints(dataset, &reference),
            group::INNER_MAXIMIZATION,
        );

        let delta = match &phase {
            Phase::Delta => DeltaTerm::Variable,
            Phase::Distance { delta, .. } => DeltaTerm::Fixed(*delta),
        };
        model.add_constraints(constraints::slope_constraints(dataset, delta), group::SLOPE);

        let target = match &phase {
            Phase::Delta => {
                model.add_constraint(
                    Constraint::leq(
                        "delta_non_negative",
                        VariablesSet::from_variables([delta_variable(-1.0)]),
                        0.0,
                    ),
                    group::DELTA,
                );
                VariablesSet::from_variables([delta_variable(1.0)])
            }
            Phase::Distance { alternative, .. } => constraints::distance(dataset, alternative, alpha)?,
        };
        model.set_target(target)?;

        Ok(Self { model, alpha, phase })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn solve(&self, solver: &dyn Solver) -> Result<SolveOutcome> {
        self.model.solve(solver)
    }

    /// `delta` from an optimal phase-1 outcome.
    pub fn delta_of(outcome: &SolveOutcome) -> Option<f64> {
        match outcome {
            SolveOutcome::Optimal(result) => Some(result.value(DELTA_VARIABLE).unwrap_or(0.0)),
            SolveOutcome::Infeasible => None,
        }
    }
}
