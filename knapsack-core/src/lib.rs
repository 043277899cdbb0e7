//! Core domain types for the knapsack engine.
//!
//! These models validate their inputs on construction so the solvers can rely
//! on a well-formed item catalog: every weight is strictly positive and the
//! catalog totals fit in `u64`. Constructors return `Result` to surface invalid
//! input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod algorithm;
pub mod instance;
pub mod item;
pub mod solution;
pub mod solver;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use instance::{Evaluation, Instance, InstanceError};
pub use item::Item;
pub use solution::{Diagnostics, Optimality, Solution};
pub use solver::{SolveError, Solver};
