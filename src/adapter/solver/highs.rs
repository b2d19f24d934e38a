//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is an open-source linear/mixed-integer programming solver, wrapped
//! here with the good_lp crate.

use std::collections::HashSet;

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
};

use tracing::debug;

use crate::domain::expr::Relation;
use crate::error::Result;
use crate::port::{IlpProblem, LpProblem, LpSolution, SolutionStatus, Solver};

/// HiGHS-based LP/MILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution> {
        Ok(solve_with_good_lp(problem, &HashSet::new()))
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution> {
        let integers: HashSet<usize> = problem.integer_vars.iter().copied().collect();
        Ok(solve_with_good_lp(&problem.lp, &integers))
    }
}

fn solve_with_good_lp(problem: &LpProblem, integer_vars: &HashSet<usize>) -> LpSolution {
    let n = problem.num_vars();
    debug!(
        variables = n,
        rows = problem.rows.len(),
        integers = integer_vars.len(),
        "Solving with HiGHS"
    );

    if n == 0 {
        return LpSolution::with_status(0, SolutionStatus::Optimal);
    }

    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for (i, bounds) in problem.bounds.iter().enumerate() {
        let mut v = variable();
        if let Some(lb) = bounds.lower {
            v = v.min(lb);
        }
        if let Some(ub) = bounds.upper {
            v = v.max(ub);
        }
        if integer_vars.contains(&i) {
            v = v.integer();
        }
        var_list.push(vars.add(v));
    }

    let objective: Expression = var_list
        .iter()
        .zip(problem.objective.iter())
        .map(|(v, c)| *c * *v)
        .sum();

    let mut model = vars.minimise(&objective).using(highs);

    for row in &problem.rows {
        let lhs: Expression = var_list
            .iter()
            .zip(row.coefficients.iter())
            .filter(|(_, c)| **c != 0.0)
            .map(|(v, c)| *c * *v)
            .sum();
        let rhs = row.rhs;

        model = match row.relation {
            Relation::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            Relation::LessEqual => model.with(constraint!(lhs <= rhs)),
            Relation::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    let solution = match model.solve() {
        Ok(solution) => {
            let values: Vec<f64> = var_list.iter().map(|v| solution.value(*v)).collect();

            // Re-evaluate objective with the solved values
            let objective = values
                .iter()
                .zip(problem.objective.iter())
                .map(|(v, c)| v * c)
                .sum();

            LpSolution {
                values,
                objective,
                status: SolutionStatus::Optimal,
            }
        }
        Err(ResolutionError::Infeasible) => LpSolution::with_status(n, SolutionStatus::Infeasible),
        Err(ResolutionError::Unbounded) => LpSolution::with_status(n, SolutionStatus::Unbounded),
        Err(other) => LpSolution::with_status(n, SolutionStatus::Error(other.to_string())),
    };
    debug!(status = ?solution.status, objective = solution.objective, "HiGHS finished");
    solution
}
