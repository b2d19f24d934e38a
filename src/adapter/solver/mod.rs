//! Solver backends implementing [`crate::port::Solver`].

mod highs;

pub use highs::HiGHSSolver;
