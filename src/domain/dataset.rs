//! Alternatives, criteria and preference information.
//!
//! A [`Dataset`] is built once from parsed input. Cost criteria are negated
//! at construction so every column is gain-oriented afterwards.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, ModelError};

/// Default indifference threshold.
pub const DEFAULT_EPS: f64 = 1e-6;

/// Default big-M constant for the inner maximization constraints.
pub const DEFAULT_BIG_M: f64 = 10.0;

/// Direction of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionType {
    /// Higher is better.
    Gain,
    /// Lower is better.
    Cost,
}

impl CriterionType {
    /// Single-letter marker used in dataset headers.
    pub const fn marker(self) -> char {
        match self {
            Self::Gain => 'g',
            Self::Cost => 'c',
        }
    }

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker.to_ascii_lowercase() {
            'g' => Some(Self::Gain),
            'c' => Some(Self::Cost),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub kind: CriterionType,
}

impl Criterion {
    pub fn new(name: impl Into<String>, kind: CriterionType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn gain(name: impl Into<String>) -> Self {
        Self::new(name, CriterionType::Gain)
    }

    pub fn cost(name: impl Into<String>) -> Self {
        Self::new(name, CriterionType::Cost)
    }
}

/// Kind of a preference statement between alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKind {
    /// Strict preference, separated by at least `eps`.
    Preference,
    WeakPreference,
    Indifference,
}

impl PreferenceKind {
    /// Name used in the dataset text format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preference => "preference",
            Self::WeakPreference => "weak preference",
            Self::Indifference => "indifference",
        }
    }
}

impl fmt::Display for PreferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preference" => Ok(Self::Preference),
            "weak preference" | "weak_preference" => Ok(Self::WeakPreference),
            "indifference" => Ok(Self::Indifference),
            other => Err(format!("relation '{other}' is not supported")),
        }
    }
}

/// `alternative_1 REL alternative_2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRelation {
    pub alternative_1: String,
    pub alternative_2: String,
    pub kind: PreferenceKind,
}

impl PreferenceRelation {
    pub fn new(
        alternative_1: impl Into<String>,
        alternative_2: impl Into<String>,
        kind: PreferenceKind,
    ) -> Self {
        Self {
            alternative_1: alternative_1.into(),
            alternative_2: alternative_2.into(),
            kind,
        }
    }

    pub fn alternatives(&self) -> [&str; 2] {
        [&self.alternative_1, &self.alternative_2]
    }
}

/// Compares the intensity of `a1 over a2` against `a3 over a4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityRelation {
    pub alternative_1: String,
    pub alternative_2: String,
    pub alternative_3: String,
    pub alternative_4: String,
    pub kind: PreferenceKind,
}

impl IntensityRelation {
    pub fn new(alternatives: [&str; 4], kind: PreferenceKind) -> Self {
        let [a1, a2, a3, a4] = alternatives;
        Self {
            alternative_1: a1.to_string(),
            alternative_2: a2.to_string(),
            alternative_3: a3.to_string(),
            alternative_4: a4.to_string(),
            kind,
        }
    }

    pub fn alternatives(&self) -> [&str; 4] {
        [
            &self.alternative_1,
            &self.alternative_2,
            &self.alternative_3,
            &self.alternative_4,
        ]
    }
}

/// Score matrix plus preference information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    alternatives: Vec<String>,
    criteria: Vec<Criterion>,
    /// Gain-oriented values, one row per alternative.
    values: Vec<Vec<f64>>,
    preferences: Vec<PreferenceRelation>,
    intensities: Vec<IntensityRelation>,
    eps: f64,
    big_m: f64,
}

impl Dataset {
    /// Build a dataset from raw (input-oriented) values.
    ///
    /// Cost columns are negated once here.
    pub fn new(
        alternatives: Vec<String>,
        criteria: Vec<Criterion>,
        raw_values: Vec<Vec<f64>>,
    ) -> Result<Self, DatasetError> {
        if alternatives.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut seen = HashSet::new();
        for alternative in &alternatives {
            if !seen.insert(alternative.as_str()) {
                return Err(DatasetError::DuplicateAlternative(alternative.clone()));
            }
        }
        let mut names = HashSet::new();
        for criterion in &criteria {
            if !names.insert(criterion.name.as_str()) {
                return Err(DatasetError::InvalidCriterion {
                    criterion: criterion.name.clone(),
                    reason: "criterion is defined more than once".into(),
                });
            }
        }
        if raw_values.len() != alternatives.len() {
            return Err(DatasetError::Malformed {
                line: 0,
                reason: format!(
                    "{} alternatives but {} rows of values",
                    alternatives.len(),
                    raw_values.len()
                ),
            });
        }

        let mut values = raw_values;
        for (alternative, row) in alternatives.iter().zip(values.iter_mut()) {
            if row.len() != criteria.len() {
                return Err(DatasetError::RowWidth {
                    alternative: alternative.clone(),
                    expected: criteria.len(),
                    actual: row.len(),
                });
            }
            for (value, criterion) in row.iter_mut().zip(&criteria) {
                if criterion.kind == CriterionType::Cost {
                    *value = -*value;
                }
            }
        }

        Ok(Self {
            alternatives,
            criteria,
            values,
            preferences: Vec::new(),
            intensities: Vec::new(),
            eps: DEFAULT_EPS,
            big_m: DEFAULT_BIG_M,
        })
    }

    /// Attach pairwise preference statements.
    pub fn with_preferences(
        mut self,
        preferences: Vec<PreferenceRelation>,
    ) -> Result<Self, DatasetError> {
        for relation in &preferences {
            self.check_alternatives(relation.alternatives())?;
        }
        self.preferences = preferences;
        Ok(self)
    }

    /// Attach intensity statements.
    pub fn with_intensities(
        mut self,
        intensities: Vec<IntensityRelation>,
    ) -> Result<Self, DatasetError> {
        for relation in &intensities {
            self.check_alternatives(relation.alternatives())?;
        }
        self.intensities = intensities;
        Ok(self)
    }

    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    #[must_use]
    pub fn with_big_m(mut self, big_m: f64) -> Self {
        self.big_m = big_m;
        self
    }

    fn check_alternatives<const N: usize>(&self, names: [&str; N]) -> Result<(), DatasetError> {
        match names.iter().find(|name| !self.alternatives.iter().any(|a| a == *name)) {
            Some(missing) => Err(DatasetError::UnknownAlternative((*missing).to_string())),
            None => Ok(()),
        }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn preferences(&self) -> &[PreferenceRelation] {
        &self.preferences
    }

    pub fn intensities(&self) -> &[IntensityRelation] {
        &self.intensities
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn big_m(&self) -> f64 {
        self.big_m
    }

    pub fn alternative_index(&self, alternative: &str) -> Option<usize> {
        self.alternatives.iter().position(|a| a == alternative)
    }

    pub fn criterion_index(&self, criterion: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.name == criterion)
    }

    /// Gain-oriented value by indices.
    pub fn value(&self, alternative: usize, criterion: usize) -> f64 {
        self.values[alternative][criterion]
    }

    /// Gain-oriented row of an alternative.
    pub fn row(&self, alternative: &str) -> Result<&[f64], ModelError> {
        self.alternative_index(alternative)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| ModelError::UnknownAlternative(alternative.to_string()))
    }

    /// Gain-oriented value by names.
    pub fn value_of(&self, alternative: &str, criterion: &str) -> Result<f64, ModelError> {
        let row = self.row(alternative)?;
        let column = self
            .criterion_index(criterion)
            .ok_or_else(|| ModelError::UnknownCriterion(criterion.to_string()))?;
        Ok(row[column])
    }

    /// Value in the input orientation (cost columns negated back).
    pub fn raw_value(&self, alternative: usize, criterion: usize) -> f64 {
        let value = self.value(alternative, criterion);
        match self.criteria[criterion].kind {
            CriterionType::Gain => value,
            CriterionType::Cost => -value,
        }
    }

    /// Alternatives referenced by any preference or intensity statement,
    /// in dataset order.
    pub fn reference_alternatives(&self) -> Vec<&str> {
        let mut referenced: HashSet<&str> = HashSet::new();
        for relation in &self.preferences {
            referenced.extend(relation.alternatives());
        }
        for relation in &self.intensities {
            referenced.extend(relation.alternatives());
        }
        self.alternatives
            .iter()
            .map(String::as_str)
            .filter(|a| referenced.contains(a))
            .collect()
    }
}
