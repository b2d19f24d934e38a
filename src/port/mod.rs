//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams to external collaborators; adapters implement them.
//!
//! # Available Ports
//!
//! - [`Solver`] - LP/MILP optimization backend

mod solver;

pub use solver::{IlpProblem, LpProblem, LpSolution, Row, SolutionStatus, Solver, VariableBounds};
