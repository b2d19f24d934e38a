//! Alpha values sampled by the distance phase.

use serde::{Deserialize, Serialize};

/// One alpha sample with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaValue {
    pub value: f64,
    pub name: String,
}

impl AlphaValue {
    pub fn new(value: f64, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }

    /// Alpha named after its value, e.g. `alpha_0.5`.
    pub fn from_value(value: f64) -> Self {
        Self::new(value, Self::key_for(value))
    }

    /// Column key in the result table, e.g. `alpha_0.5`.
    pub fn key(&self) -> String {
        Self::key_for(self.value)
    }

    pub fn key_for(value: f64) -> String {
        format!("alpha_{value:?}")
    }
}

/// Alpha values in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlphaValues {
    values: Vec<AlphaValue>,
}

impl AlphaValues {
    pub fn new(values: Vec<AlphaValue>) -> Self {
        Self { values }
    }

    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(AlphaValue::from_value).collect())
    }

    /// `count` evenly spaced values over `[0, 1]`.
    pub fn linspace(count: usize) -> Self {
        Self::from_values(&linspace(0.0, 1.0, count))
    }

    pub fn values(&self) -> &[AlphaValue] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlphaValue> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.iter().map(AlphaValue::key).collect()
    }

    pub fn by_name(&self, name: &str) -> Option<&AlphaValue> {
        self.values.iter().find(|alpha| alpha.name == name)
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| start + (end - start) * i as f64 / last)
                .collect()
        }
    }
}
