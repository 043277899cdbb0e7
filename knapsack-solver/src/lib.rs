//! Exact and heuristic solvers for the 0/1 knapsack problem.
//!
//! Every solver implements [`Solver`](knapsack_core::Solver) and reports its
//! packing against the caller's original item order.
//!
//! - [`DepthFirstSolver`] and [`BestFirstSolver`] run branch-and-bound over the
//!   include/exclude decision tree, visiting items in descending value
//!   density and pruning with the fractional relaxation bound from
//!   [`relaxation_bound`].
//! - [`DynamicProgrammingSolver`] tabulates optimal values over capacity and
//!   item count; its memory grows with the capacity, up to a cell ceiling.
//! - [`GreedySolver`] offers two fast, non-optimal baselines.
//! - [`AutoSolver`] picks an exact solver from the instance size, and
//!   [`solve`] wraps it for callers holding raw `(value, weight)` pairs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod best_first;
mod bound;
mod depth_first;
mod dynamic;
mod greedy;
mod order;
mod outcome;
mod selector;
mod tree;

pub use best_first::BestFirstSolver;
pub use bound::{Decision, DecisionFilter, RelaxationBound, relaxation_bound};
pub use depth_first::DepthFirstSolver;
pub use dynamic::{DEFAULT_MAX_TABLE_CELLS, DynamicProgrammingSolver};
pub use greedy::{GreedyOrder, GreedySolver};
pub use order::{DensityOrder, WeightedItem};
pub use selector::{
    AutoSolver, DEFAULT_MAX_CAPACITY_FOR_TABLE, DEFAULT_MAX_ITEMS_FOR_SEARCH, Dispatch,
    DispatchReason, SelectorConfig, select, solve, solver_for,
};
pub use tree::SearchLimits;
