//! The solver boundary.

use thiserror::Error;

use crate::{Instance, InstanceError, Solution};

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The problem data was rejected before solving.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InstanceError),
    /// A branch-and-bound search hit its configured node ceiling before it
    /// could prove optimality.
    #[error("search created {limit} nodes without proving optimality")]
    NodeLimitReached {
        /// The configured ceiling.
        limit: usize,
    },
    /// The dynamic-programming table cannot be addressed on this platform.
    #[error("tabulation needs {rows} rows of {columns} cells, which exceeds addressable memory")]
    TableTooLarge {
        /// Rows required (`capacity + 1`).
        rows: u64,
        /// Cells per row (`items + 1`).
        columns: usize,
    },
    /// The search violated one of its own invariants. The result would have
    /// been untrustworthy, so it was discarded.
    #[error("internal consistency fault: {detail}")]
    InternalFault {
        /// Description of the violated invariant.
        detail: String,
    },
}

/// Pack a knapsack instance.
///
/// Implementations hold configuration only; each call is a pure function of
/// the instance, so solvers are `Send + Sync` and may be shared across
/// threads.
pub trait Solver: Send + Sync {
    /// Solve an instance, producing a packing or an error.
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError>;
}
