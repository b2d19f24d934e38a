//! Named constraint groups plus an optimization target.
//!
//! Groups exist for explainability only; the model's constraint set is the
//! union of every group. The target is validated against the constraints
//! before it is accepted, and solving compiles the model into the index-based
//! problem of the [`Solver`] port.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::domain::expr::{Constraint, VariablesSet};
use crate::error::{CalculationError, ModelError, Result};
use crate::port::{IlpProblem, LpProblem, Row, SolutionStatus, Solver, VariableBounds};

/// Optimal objective value and variable assignment.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    pub objective_value: f64,
    pub values: BTreeMap<String, f64>,
}

impl OptimizationResult {
    pub fn value(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// Outcome of solving a model.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Optimal(OptimizationResult),
    Infeasible,
}

impl SolveOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    pub fn into_optimal(self) -> Option<OptimizationResult> {
        match self {
            Self::Optimal(result) => Some(result),
            Self::Infeasible => None,
        }
    }
}

/// Model compiled to solver indices.
#[derive(Debug, Clone)]
pub struct CompiledProblem {
    pub problem: IlpProblem,
    /// Variable name for every column.
    pub columns: Vec<String>,
    /// Constant term of the target.
    pub objective_constant: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    groups: Vec<(String, Vec<Constraint>)>,
    seen: HashSet<Constraint>,
    target: Option<VariablesSet>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a constraint to a group. Returns `false` for a structural
    /// duplicate of a constraint already in the model.
    pub fn add_constraint(&mut self, constraint: Constraint, group: &str) -> bool {
        if !self.seen.insert(constraint.clone()) {
            trace!(constraint = %constraint.name(), "Skipping duplicate constraint");
            return false;
        }
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, constraints)) => constraints.push(constraint),
            None => self.groups.push((group.to_string(), vec![constraint])),
        }
        true
    }

    pub fn add_constraints(&mut self, constraints: impl IntoIterator<Item = Constraint>, group: &str) {
        for constraint in constraints {
            self.add_constraint(constraint, group);
        }
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Constraint])> {
        self.groups
            .iter()
            .map(|(name, constraints)| (name.as_str(), constraints.as_slice()))
    }

    pub fn group(&self, name: &str) -> Option<&[Constraint]> {
        self.groups()
            .find(|(group, _)| *group == name)
            .map(|(_, constraints)| constraints)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.groups.iter().flat_map(|(_, constraints)| constraints)
    }

    pub fn number_of_constraints(&self) -> usize {
        self.seen.len()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.constraints().any(|c| c.variable(name).is_some())
    }

    /// Set the objective to minimize.
    ///
    /// Every variable except the free term must already be used by some
    /// constraint.
    pub fn set_target(&mut self, target: VariablesSet) -> std::result::Result<(), ModelError> {
        let used: HashSet<&str> = self.constraints().flat_map(Constraint::variable_names).collect();
        if let Some(unknown) = target
            .variables()
            .find(|v| !v.is_free() && !used.contains(v.name()))
        {
            return Err(ModelError::UnknownTargetVariable(unknown.name().to_string()));
        }
        self.target = Some(target);
        Ok(())
    }

    pub fn target(&self) -> Option<&VariablesSet> {
        self.target.as_ref()
    }

    /// Compile to an index-based problem. Columns are sorted by name.
    ///
    /// Binary variables become integers bounded to `[0, 1]`; every other
    /// variable is non-negative.
    pub fn to_problem(&self) -> std::result::Result<CompiledProblem, ModelError> {
        let target = self.target.as_ref().ok_or(ModelError::MissingTarget)?;

        let mut binary: BTreeMap<&str, bool> = BTreeMap::new();
        for variable in self.constraints().flat_map(Constraint::variables) {
            *binary.entry(variable.name()).or_default() |= variable.is_binary();
        }
        let columns: Vec<String> = binary.keys().map(|name| (*name).to_string()).collect();
        let index: BTreeMap<&str, usize> = binary
            .keys()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();

        let mut lp = LpProblem::new(columns.len());
        let mut integer_vars = Vec::new();
        for (i, is_binary) in binary.values().enumerate() {
            if *is_binary {
                lp.bounds[i] = VariableBounds::binary();
                integer_vars.push(i);
            }
        }
        for variable in target.variables().filter(|v| !v.is_free()) {
            if let Some(&i) = index.get(variable.name()) {
                lp.objective[i] += variable.coefficient();
            }
        }
        for constraint in self.constraints() {
            let mut coefficients = vec![0.0; columns.len()];
            for variable in constraint.variables() {
                if let Some(&i) = index.get(variable.name()) {
                    coefficients[i] += variable.coefficient();
                }
            }
            lp.rows.push(Row {
                coefficients,
                relation: constraint.relation(),
                rhs: constraint.rhs(),
            });
        }

        Ok(CompiledProblem {
            problem: IlpProblem::new(lp, integer_vars),
            columns,
            objective_constant: target.constant(),
        })
    }

    /// Minimize the target with `solver`.
    pub fn solve(&self, solver: &dyn Solver) -> Result<SolveOutcome> {
        let compiled = self.to_problem()?;
        debug!(
            model = %self.name,
            solver = solver.name(),
            variables = compiled.columns.len(),
            constraints = compiled.problem.lp.rows.len(),
            binaries = compiled.problem.integer_vars.len(),
            "Solving model"
        );

        let solution = if compiled.problem.integer_vars.is_empty() {
            solver.solve_lp(&compiled.problem.lp)?
        } else {
            solver.solve_ilp(&compiled.problem)?
        };

        match solution.status {
            SolutionStatus::Optimal => Ok(SolveOutcome::Optimal(OptimizationResult {
                objective_value: solution.objective + compiled.objective_constant,
                values: compiled.columns.into_iter().zip(solution.values).collect(),
            })),
            SolutionStatus::Infeasible => Ok(SolveOutcome::Infeasible),
            SolutionStatus::Unbounded => Err(CalculationError::Unbounded {
                stage: self.name.clone(),
            }
            .into()),
            SolutionStatus::Error(reason) => Err(CalculationError::Solver {
                solver: solver.name(),
                reason,
            }
            .into()),
        }
    }
}
