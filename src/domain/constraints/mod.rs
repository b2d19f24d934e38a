//! Builders for the UTA-GMS constraint battery.
//!
//! Every builder is a pure function of the dataset (and alpha where the
//! distance function is involved) returning constraints in a deterministic
//! order.

mod distance;
mod inner_maximization;
mod min_max;
mod monotonicity;
mod preference;
mod slope;

pub use distance::distance;
pub use inner_maximization::inner_maximization_constraints;
pub use min_max::{max_constraint, min_constraints};
pub use monotonicity::monotonicity_constraints;
pub use preference::{intensity_constraint, preference_constraint};
pub use slope::{slope_constraints, DeltaTerm, SLOPE_DIFF_EPS};

use crate::domain::expr::Variable;

/// Name of the phase-1 robustness variable.
pub const DELTA_VARIABLE: &str = "delta";

/// Constraint group names, in the order the model lists them.
pub mod group {
    pub const PREFERENCE: &str = "preference information";
    pub const INTENSITY: &str = "preference intensity information";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const INNER_MAXIMIZATION: &str = "inner maximization";
    pub const SLOPE: &str = "slope";
    pub const DELTA: &str = "delta";

    pub fn monotonicity(criterion: &str) -> String {
        format!("monotonicity, criterion: {criterion}")
    }
}

/// Marginal utility `u_<criterion>_<alternative>`.
pub fn utility_variable(criterion: &str, alternative: &str, coefficient: f64) -> Variable {
    Variable::new(format!("u_{criterion}_{alternative}"), coefficient).for_alternative(alternative)
}

/// Min-utility proxy `lambda_all_<alternative>`.
pub fn lambda_variable(alternative: &str, coefficient: f64) -> Variable {
    Variable::new(format!("lambda_all_{alternative}"), coefficient).for_alternative(alternative)
}

/// Argmin indicator `c_<criterion>_<alternative>`.
pub fn indicator_variable(criterion: &str, alternative: &str, coefficient: f64) -> Variable {
    Variable::new(format!("c_{criterion}_{alternative}"), coefficient)
        .for_alternative(alternative)
        .binary()
}

pub fn delta_variable(coefficient: f64) -> Variable {
    Variable::new(DELTA_VARIABLE, coefficient)
}
