//! Linear expression types for the constraint model.
//!
//! These types are the algebraic substrate of every constraint builder:
//!
//! - [`Variable`] - A named variable with a coefficient
//! - [`VariablesSet`] - Name-keyed variables with summing merge semantics
//! - [`Relation`] - Constraint sense (<=, =, >=)
//! - [`Constraint`] - Left-hand variables, relation and a separate RHS
//!
//! The free term of an expression is stored under the [`FREE_VARIABLE`]
//! sentinel name. When an expression becomes a constraint, its free term
//! moves to the right-hand side.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Name of the free (constant) term inside a [`VariablesSet`].
pub const FREE_VARIABLE: &str = "free";

/// A single linear term: `coefficient * name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    coefficient: f64,
    /// Alternative this variable belongs to, if any.
    alternative: Option<String>,
    is_binary: bool,
}

impl Variable {
    /// Create a continuous variable.
    pub fn new(name: impl Into<String>, coefficient: f64) -> Self {
        Self {
            name: name.into(),
            coefficient,
            alternative: None,
            is_binary: false,
        }
    }

    /// Create the free term with the given value.
    pub fn free(value: f64) -> Self {
        Self::new(FREE_VARIABLE, value)
    }

    /// Tag the variable with its owning alternative.
    #[must_use]
    pub fn for_alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternative = Some(alternative.into());
        self
    }

    /// Mark the variable as binary.
    #[must_use]
    pub fn binary(mut self) -> Self {
        self.is_binary = true;
        self
    }

    /// Replace the coefficient.
    #[must_use]
    pub fn with_coefficient(mut self, coefficient: f64) -> Self {
        self.coefficient = coefficient;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn alternative(&self) -> Option<&str> {
        self.alternative.as_deref()
    }

    pub fn is_binary(&self) -> bool {
        self.is_binary
    }

    /// Return `true` if this is the free term sentinel.
    pub fn is_free(&self) -> bool {
        self.name == FREE_VARIABLE
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.coefficient.to_bits() == other.coefficient.to_bits()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.coefficient.to_bits().hash(state);
    }
}

/// Name-keyed set of variables.
///
/// Adding a variable whose name is already present sums the coefficients
/// instead of replacing the entry, so the set never holds more entries than
/// distinct names added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariablesSet {
    variables: BTreeMap<String, Variable>,
}

impl VariablesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from variables, merging duplicates.
    pub fn from_variables(variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut set = Self::new();
        set.extend(variables);
        set
    }

    /// Add a variable, summing coefficients on a name collision.
    pub fn add(&mut self, variable: Variable) {
        match self.variables.get_mut(variable.name()) {
            Some(existing) => {
                existing.coefficient += variable.coefficient;
                existing.is_binary |= variable.is_binary;
                if existing.alternative.is_none() {
                    existing.alternative = variable.alternative;
                }
            }
            None => {
                self.variables.insert(variable.name.clone(), variable);
            }
        }
    }

    /// Merge every variable of `other` into this set.
    pub fn merge(&mut self, other: VariablesSet) {
        self.extend(other.variables.into_values());
    }

    /// Scale every coefficient, the free term included.
    pub fn multiply_by_scalar(&mut self, scalar: f64) {
        for variable in self.variables.values_mut() {
            variable.coefficient *= scalar;
        }
    }

    /// Return a scaled copy.
    #[must_use]
    pub fn scaled(mut self, scalar: f64) -> Self {
        self.multiply_by_scalar(scalar);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Coefficient of the free term (0 when absent).
    pub fn constant(&self) -> f64 {
        self.variables
            .get(FREE_VARIABLE)
            .map_or(0.0, Variable::coefficient)
    }

    /// Remove and return the free term value.
    pub fn take_constant(&mut self) -> f64 {
        self.variables
            .remove(FREE_VARIABLE)
            .map_or(0.0, |v| v.coefficient)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Owning alternatives of the variables (untagged variables skipped).
    pub fn alternatives(&self) -> Vec<&str> {
        self.variables
            .values()
            .filter_map(Variable::alternative)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Extend<Variable> for VariablesSet {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        for variable in iter {
            self.add(variable);
        }
    }
}

impl FromIterator<Variable> for VariablesSet {
    fn from_iter<T: IntoIterator<Item = Variable>>(iter: T) -> Self {
        Self::from_variables(iter)
    }
}

impl fmt::Display for VariablesSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        let terms: Vec<String> = self
            .variables
            .values()
            .map(|v| {
                if v.is_free() {
                    format!("{}", v.coefficient)
                } else {
                    format!("{}*{}", v.coefficient, v.name)
                }
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
    /// Greater than or equal (>=).
    GreaterEqual,
}

impl Relation {
    /// Relation after multiplying both sides by a negative number.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::LessEqual => Self::GreaterEqual,
            Self::GreaterEqual => Self::LessEqual,
            Self::Equal => Self::Equal,
        }
    }

    pub const fn sign(self) -> &'static str {
        match self {
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sign())
    }
}

/// A named linear constraint: `sum(variables) relation rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    name: String,
    variables: VariablesSet,
    relation: Relation,
    rhs: FloatBits,
}

impl Constraint {
    /// Create a constraint `lhs relation rhs`.
    ///
    /// A free term inside `lhs` is moved to the right-hand side.
    pub fn new(name: impl Into<String>, mut lhs: VariablesSet, relation: Relation, rhs: f64) -> Self {
        let constant = lhs.take_constant();
        Self {
            name: name.into(),
            variables: lhs,
            relation,
            rhs: FloatBits(rhs - constant),
        }
    }

    /// Create a `<=` constraint.
    pub fn leq(name: impl Into<String>, lhs: VariablesSet, rhs: f64) -> Self {
        Self::new(name, lhs, Relation::LessEqual, rhs)
    }

    /// Create an `=` constraint.
    pub fn eq(name: impl Into<String>, lhs: VariablesSet, rhs: f64) -> Self {
        Self::new(name, lhs, Relation::Equal, rhs)
    }

    /// Add a term to the left-hand side. Free terms add to the RHS value.
    pub fn add_variable(&mut self, variable: Variable) {
        if variable.is_free() {
            self.rhs.0 += variable.coefficient;
        } else {
            self.variables.add(variable);
        }
    }

    /// Scale both sides by `scalar`, flipping the relation when negative.
    pub fn multiply_by_scalar(&mut self, scalar: f64) {
        self.variables.multiply_by_scalar(scalar);
        self.rhs.0 *= scalar;
        if scalar < 0.0 {
            self.relation = self.relation.flipped();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.variables()
    }

    pub fn variables_set(&self) -> &VariablesSet {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.names()
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    pub fn rhs(&self) -> f64 {
        self.rhs.0
    }

    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }

    /// Alternatives referenced by this constraint's variables.
    pub fn alternatives(&self) -> Vec<&str> {
        self.variables.alternatives()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {}",
            self.name, self.variables, self.relation, self.rhs.0
        )
    }
}

/// Sum constraints sharing one relation into a single constraint.
///
/// Returns `None` when fewer than two constraints are given or their
/// relations differ.
pub fn merge_constraints(constraints: &[Constraint]) -> Option<Constraint> {
    let first = constraints.first()?;
    if constraints.len() < 2 || constraints.iter().any(|c| c.relation != first.relation) {
        return None;
    }
    let name = format!(
        "merged_constraint_{}",
        constraints
            .iter()
            .map(Constraint::name)
            .collect::<Vec<_>>()
            .join("_")
    );
    let mut merged = Constraint::new(name, VariablesSet::new(), first.relation, 0.0);
    for constraint in constraints {
        for variable in constraint.variables() {
            merged.add_variable(variable.clone());
        }
        merged.rhs.0 += constraint.rhs();
    }
    Some(merged)
}

/// `f64` compared and hashed by bit pattern, for structural equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
struct FloatBits(f64);

impl PartialEq for FloatBits {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatBits {}

impl Hash for FloatBits {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_coefficients() {
        let mut set = VariablesSet::new();
        set.add(Variable::new("x", 1.5));
        set.add(Variable::new("y", 2.0));
        set.add(Variable::new("x", -0.5));

        assert_eq!(set.len(), 2);
        assert!((set.get("x").unwrap().coefficient() - 1.0).abs() < 1e-12);
        assert!((set.get("y").unwrap().coefficient() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_set_never_exceeds_distinct_names() {
        let set: VariablesSet = (0..20)
            .map(|i| Variable::new(format!("v{}", i % 4), 1.0))
            .collect();

        assert_eq!(set.len(), 4);
        assert!((set.get("v0").unwrap().coefficient() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_free_term_moves_to_rhs() {
        let lhs = VariablesSet::from_variables([Variable::new("x", 1.0), Variable::free(2.0)]);
        let constraint = Constraint::leq("c", lhs, 5.0);

        assert!((constraint.rhs() - 3.0).abs() < 1e-12);
        assert!(constraint.variable(FREE_VARIABLE).is_none());
        assert_eq!(constraint.number_of_variables(), 1);
    }

    #[test]
    fn test_add_free_variable_adds_to_rhs() {
        let mut constraint = Constraint::leq("c", VariablesSet::new(), 1.0);
        constraint.add_variable(Variable::free(0.5));
        constraint.add_variable(Variable::new("x", 2.0));

        assert!((constraint.rhs() - 1.5).abs() < 1e-12);
        assert_eq!(constraint.number_of_variables(), 1);
    }

    #[test]
    fn test_multiply_by_negative_scalar_flips_relation() {
        let lhs = VariablesSet::from_variables([Variable::new("x", 1.0), Variable::new("y", -2.0)]);
        let mut constraint = Constraint::leq("c", lhs, 4.0);

        constraint.multiply_by_scalar(-2.0);

        assert_eq!(constraint.relation(), Relation::GreaterEqual);
        assert!((constraint.variable("x").unwrap().coefficient() + 2.0).abs() < 1e-12);
        assert!((constraint.variable("y").unwrap().coefficient() - 4.0).abs() < 1e-12);
        assert!((constraint.rhs() + 8.0).abs() < 1e-12);

        constraint.multiply_by_scalar(-1.0);
        assert_eq!(constraint.relation(), Relation::LessEqual);
    }

    #[test]
    fn test_multiply_by_positive_scalar_keeps_relation() {
        let lhs = VariablesSet::from_variables([Variable::new("x", 1.0)]);
        let mut constraint = Constraint::eq("c", lhs, 1.0);

        constraint.multiply_by_scalar(3.0);

        assert_eq!(constraint.relation(), Relation::Equal);
        assert!((constraint.rhs() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_structural_equality() {
        let make = || {
            Constraint::leq(
                "c",
                VariablesSet::from_variables([Variable::new("y", 1.0), Variable::new("x", -1.0)]),
                0.0,
            )
        };
        assert_eq!(make(), make());

        let other = Constraint::leq(
            "c",
            VariablesSet::from_variables([Variable::new("y", 1.0), Variable::new("x", -1.0)]),
            0.1,
        );
        assert_ne!(make(), other);
    }

    #[test]
    fn test_merge_constraints() {
        let a = Constraint::leq(
            "a",
            VariablesSet::from_variables([Variable::new("x", 1.0)]),
            1.0,
        );
        let b = Constraint::leq(
            "b",
            VariablesSet::from_variables([Variable::new("x", 2.0), Variable::new("y", 1.0)]),
            2.0,
        );

        let merged = merge_constraints(&[a.clone(), b]).unwrap();
        assert_eq!(merged.name(), "merged_constraint_a_b");
        assert!((merged.variable("x").unwrap().coefficient() - 3.0).abs() < 1e-12);
        assert!((merged.rhs() - 3.0).abs() < 1e-12);

        assert!(merge_constraints(&[a]).is_none());
    }

    #[test]
    fn test_merge_constraints_rejects_mixed_relations() {
        let a = Constraint::leq("a", VariablesSet::from_variables([Variable::new("x", 1.0)]), 1.0);
        let b = Constraint::eq("b", VariablesSet::from_variables([Variable::new("x", 1.0)]), 1.0);
        assert!(merge_constraints(&[a, b]).is_none());
    }
}
