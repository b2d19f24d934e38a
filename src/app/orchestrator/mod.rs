//! Two-phase solve pipeline.
//!
//! 1. **Delta**: minimize `delta` at `INITIAL_ALPHA`. Infeasible means the
//!    preference information contradicts itself and the run stops.
//! 2. **Distance**: for every alternative and every alpha value requested by
//!    the aggregator, minimize the distance with the phase 1 `delta` fixed.
//!    Any infeasible sub-solve stops the run; nothing partial is returned.
//! 3. **Aggregation**: the aggregator ranks the result and applies the tie
//!    resolver.
//!
//! Solves run one at a time. Progress is reported through an optional
//! callback after each unit of work.

mod builder;
mod execution;

use std::sync::Arc;

use tracing::info;

use crate::app::aggregator::ResultAggregator;
use crate::app::config::RorParameters;
use crate::app::tie_resolver::TieResolver;
use crate::domain::dataset::Dataset;
use crate::domain::result::RorResult;
use crate::error::Result;
use crate::port::Solver;

use builder::{build_aggregator, build_tie_resolver, prepare_dataset};
use execution::{solve_delta, solve_distance};

/// Progress callback: fraction complete in `[0, 1]` and a description.
pub type Progress<'a> = &'a mut dyn FnMut(f64, &str);

/// Runs the ROR pipeline with one solver and one parameter set.
pub struct Orchestrator {
    solver: Arc<dyn Solver>,
    parameters: RorParameters,
    aggregator: Box<dyn ResultAggregator>,
    tie_resolver: Box<dyn TieResolver>,
}

impl Orchestrator {
    /// Resolve the aggregator and tie resolver named in `parameters`.
    pub fn new(solver: Arc<dyn Solver>, parameters: RorParameters) -> Result<Self> {
        parameters.validate()?;
        let aggregator = build_aggregator(&parameters)?;
        let tie_resolver = build_tie_resolver(&parameters)?;
        Ok(Self {
            solver,
            parameters,
            aggregator,
            tie_resolver,
        })
    }

    pub fn parameters(&self) -> &RorParameters {
        &self.parameters
    }

    pub fn aggregator(&self) -> &dyn ResultAggregator {
        self.aggregator.as_ref()
    }

    pub fn tie_resolver(&self) -> &dyn TieResolver {
        self.tie_resolver.as_ref()
    }

    /// Phase 1 alone.
    pub fn delta(&self, dataset: &Dataset) -> Result<f64> {
        let dataset = prepare_dataset(dataset, &self.parameters);
        solve_delta(self.solver.as_ref(), &dataset, self.parameters.initial_alpha())
    }

    /// Run both phases and aggregate.
    pub fn run(&self, dataset: &Dataset, mut progress: Option<Progress<'_>>) -> Result<RorResult> {
        let dataset = prepare_dataset(dataset, &self.parameters);
        let alpha_values = self.aggregator.alpha_values(&self.parameters);
        let total = 2 + dataset.alternatives().len() * alpha_values.len();
        let mut done = 0usize;
        let mut report = |description: &str| {
            done += 1;
            if let Some(callback) = progress.as_deref_mut() {
                callback(done as f64 / total as f64, description);
            }
        };

        info!(
            alternatives = dataset.alternatives().len(),
            criteria = dataset.criteria().len(),
            preferences = dataset.preferences().len(),
            intensities = dataset.intensities().len(),
            alphas = alpha_values.len(),
            solver = self.solver.name(),
            "Starting ROR calculations"
        );

        let initial_alpha = self.parameters.initial_alpha();
        let delta = solve_delta(self.solver.as_ref(), &dataset, initial_alpha)?;
        info!(delta, initial_alpha, "Delta phase complete");
        report("delta");

        let mut result = RorResult::new(dataset.alternatives().to_vec(), alpha_values.clone());
        result.set_delta(delta);
        for alternative in dataset.alternatives() {
            for alpha in alpha_values.iter() {
                let distance =
                    solve_distance(self.solver.as_ref(), &dataset, alternative, alpha.value, delta)?;
                result.add_result(alternative, &alpha.key(), distance);
                report(&format!("{alternative}, {}", alpha.name));
            }
        }
        info!(solves = dataset.alternatives().len() * alpha_values.len(), "Distance phase complete");

        self.aggregator
            .aggregate(&mut result, &self.parameters, self.tie_resolver.as_ref())?;
        report("aggregation");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraints::fixtures;
    use crate::error::{CalculationError, Error};
    use crate::port::{IlpProblem, LpProblem, LpSolution, SolutionStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Optimal with every variable at zero, or always infeasible.
    struct StubSolver {
        infeasible: bool,
        calls: AtomicUsize,
    }

    impl StubSolver {
        fn new(infeasible: bool) -> Arc<Self> {
            Arc::new(Self {
                infeasible,
                calls: AtomicUsize::new(0),
            })
        }

        fn solution(&self, n: usize) -> LpSolution {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.infeasible {
                LpSolution::with_status(n, SolutionStatus::Infeasible)
            } else {
                LpSolution::with_status(n, SolutionStatus::Optimal)
            }
        }
    }

    impl Solver for StubSolver {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution> {
            Ok(self.solution(problem.num_vars()))
        }

        fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution> {
            Ok(self.solution(problem.lp.num_vars()))
        }
    }

    #[test]
    fn test_rejects_unknown_aggregator() {
        let parameters = RorParameters {
            results_aggregator: Some("Majority".into()),
            ..RorParameters::default()
        };
        assert!(matches!(
            Orchestrator::new(StubSolver::new(false), parameters),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_progress_steps() {
        let solver = StubSolver::new(false);
        let orchestrator = Orchestrator::new(solver.clone(), RorParameters::new()).unwrap();
        let dataset = fixtures::dataset_with_preferences();

        let mut steps = Vec::new();
        let mut record = |fraction: f64, description: &str| {
            steps.push((fraction, description.to_string()));
        };
        let result = orchestrator.run(&dataset, Some(&mut record)).unwrap();

        // 1 delta + 4 alternatives * 3 alphas + 1 aggregation
        assert_eq!(steps.len(), 14);
        assert_eq!(steps[0].1, "delta");
        assert_eq!(steps[1].1, "b1, Q");
        assert_eq!(steps.last().unwrap().1, "aggregation");
        assert!((steps.last().unwrap().0 - 1.0).abs() < 1e-12);
        assert!(steps.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(solver.calls.load(Ordering::SeqCst), 13);

        assert!(result.final_rank().is_some());
        assert_eq!(result.aggregator(), Some("DefaultResultAggregator"));
        assert_eq!(result.delta(), Some(0.0));
    }

    #[test]
    fn test_runs_without_progress() {
        let orchestrator = Orchestrator::new(StubSolver::new(false), RorParameters::new()).unwrap();
        let result = orchestrator.run(&fixtures::dataset(), None).unwrap();
        assert_eq!(result.table().unwrap().rows.len(), 4);
    }

    #[test]
    fn test_infeasible_delta_stops_the_run() {
        let solver = StubSolver::new(true);
        let orchestrator = Orchestrator::new(solver.clone(), RorParameters::new()).unwrap();
        let err = orchestrator
            .run(&fixtures::dataset_with_preferences(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculationError::DeltaInfeasible)
        ));
        assert_eq!(solver.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_aggregator_decides_alpha_count() {
        let parameters = RorParameters {
            results_aggregator: Some("BordaResultAggregator".into()),
            number_of_alpha_values: Some(5),
            ..RorParameters::default()
        };
        let orchestrator = Orchestrator::new(StubSolver::new(false), parameters).unwrap();
        let result = orchestrator.run(&fixtures::dataset(), None).unwrap();
        assert_eq!(result.alpha_values().len(), 5);
        assert_eq!(result.intermediate_ranks().len(), 5);
    }
}
