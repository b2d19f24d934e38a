//! Solver port for linear and mixed-integer programming.
//!
//! The constraint model compiles itself into the index-based problem types
//! below; backends only ever see vectors of coefficients.
//!
//! # Overview
//!
//! - [`Solver`]: Core LP/ILP solver interface
//! - [`LpProblem`] / [`IlpProblem`]: Problem definitions
//! - [`LpSolution`]: Solution representation

use crate::domain::expr::Relation;
use crate::error::Result;

/// Linear and mixed-integer programming solver.
///
/// Implementations wrap specific solver backends and must report
/// infeasibility through [`SolutionStatus`] rather than as an error.
pub trait Solver: Send + Sync {
    /// Return the solver name for logging and configuration.
    fn name(&self) -> &'static str;

    /// Solve a linear programming problem.
    ///
    /// Minimizes `c * x` subject to the rows and bounds.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails.
    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution>;

    /// Solve a problem with integrality restrictions on some variables.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails.
    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution>;
}

/// A single row: `sum(coefficients[i] * x[i]) relation rhs`.
#[derive(Debug, Clone)]
pub struct Row {
    pub coefficients: Vec<f64>,
    pub relation: Relation,
    pub rhs: f64,
}

impl Row {
    /// Create a >= row.
    #[must_use]
    pub const fn geq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= row.
    #[must_use]
    pub const fn leq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::LessEqual,
            rhs,
        }
    }

    /// Create an = row.
    #[must_use]
    pub const fn eq(coefficients: Vec<f64>, rhs: f64) -> Self {
        Self {
            coefficients,
            relation: Relation::Equal,
            rhs,
        }
    }
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<f64>,
    /// Upper bound (None = +infinity).
    pub upper: Option<f64>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(0.0),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(1.0),
        }
    }

    /// Free variable (no bounds).
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    /// Non-negative variable [0, +inf).
    #[must_use]
    pub fn non_negative() -> Self {
        Self::default()
    }
}

/// Linear programming problem definition.
///
/// ```text
/// minimize    c^T * x
/// subject to  rows
///             bounds on x
/// ```
#[derive(Debug, Clone)]
pub struct LpProblem {
    /// Objective function coefficients.
    pub objective: Vec<f64>,

    pub rows: Vec<Row>,

    /// Lower and upper bounds for each variable.
    pub bounds: Vec<VariableBounds>,
}

impl LpProblem {
    /// Create an empty problem over `num_vars` non-negative variables.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            objective: vec![0.0; num_vars],
            rows: Vec::new(),
            bounds: vec![VariableBounds::default(); num_vars],
        }
    }

    /// Return the number of decision variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }
}

/// Problem with integer restrictions on some variables.
#[derive(Debug, Clone)]
pub struct IlpProblem {
    /// Underlying linear programming problem.
    pub lp: LpProblem,

    /// Indices of variables constrained to integer values.
    pub integer_vars: Vec<usize>,
}

impl IlpProblem {
    #[must_use]
    pub const fn new(lp: LpProblem, integer_vars: Vec<usize>) -> Self {
        Self { lp, integer_vars }
    }
}

/// Solution to a linear or integer programming problem.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Values for each decision variable.
    pub values: Vec<f64>,

    /// Objective function value (without any constant term).
    pub objective: f64,

    /// Termination status of the solver.
    pub status: SolutionStatus,
}

impl LpSolution {
    /// Solution carrying a non-optimal status.
    #[must_use]
    pub fn with_status(num_vars: usize, status: SolutionStatus) -> Self {
        Self {
            values: vec![0.0; num_vars],
            objective: 0.0,
            status,
        }
    }

    /// Return `true` if the solver found an optimal solution.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }
}

/// Termination status of an optimization solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionStatus {
    /// Solver found an optimal solution.
    Optimal,

    /// No feasible solution exists.
    Infeasible,

    /// Objective function is unbounded.
    Unbounded,

    /// Solver encountered an internal error.
    Error(String),
}
