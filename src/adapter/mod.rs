//! Implementations of ports and external formats.

pub mod dataset;
pub mod solver;
