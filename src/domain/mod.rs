//! Solver-agnostic domain logic: datasets, linear expressions, the UTA-GMS
//! constraint battery, models and ranks.

pub mod alpha;
pub mod constraints;
pub mod dataset;
pub mod expr;
pub mod model;
pub mod rank;
pub mod result;
pub mod ror_model;

pub use alpha::{AlphaValue, AlphaValues};
pub use dataset::{
    Criterion, CriterionType, Dataset, IntensityRelation, PreferenceKind, PreferenceRelation,
};
pub use expr::{Constraint, Relation, Variable, VariablesSet};
pub use model::{Model, OptimizationResult, SolveOutcome};
pub use rank::{Order, Rank, RankItem};
pub use result::{RorResult, ScoreTable};
pub use ror_model::{Phase, RorModel};
