//! Facade crate for the knapsack engine.
//!
//! This crate re-exports the core domain types and exposes the solver
//! implementations behind the `solver-bnb` feature.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-bnb")]
//! # fn main() -> Result<(), knapsack_engine::SolveError> {
//! let solution = knapsack_engine::solve([(60, 10), (100, 20), (120, 30)], 50)?;
//! assert_eq!(solution.value, 220);
//! assert_eq!(solution.taken_bits(), vec![0, 1, 1]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "solver-bnb"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]

pub use knapsack_core::{
    Algorithm, Diagnostics, Evaluation, Instance, InstanceError, Item, Optimality, Solution,
    SolveError, Solver,
};

#[cfg(feature = "solver-bnb")]
pub use knapsack_solver::{
    AutoSolver, BestFirstSolver, DepthFirstSolver, DynamicProgrammingSolver, GreedySolver,
    SearchLimits, SelectorConfig, select, solve, solver_for,
};
