//! Size-based dispatch among the exact solvers.
//!
//! [`select`] is a pure function of the item count, the capacity and a
//! [`SelectorConfig`]. Every path it can choose returns the true optimum; the
//! thresholds only trade runtime against memory. Greedy heuristics are never
//! dispatched.

use knapsack_core::{Algorithm, Instance, Solution, SolveError, Solver};

use crate::{
    BestFirstSolver, DepthFirstSolver, DynamicProgrammingSolver, GreedySolver, SearchLimits,
};

/// Largest catalog dispatched straight to depth-first branch-and-bound.
///
/// The decision tree has up to `2^(n+1)` nodes; at 50 items pruning keeps the
/// explored part small on realistic data while the worst case stays within
/// reach of a node ceiling.
pub const DEFAULT_MAX_ITEMS_FOR_SEARCH: usize = 50;

/// Largest capacity tabulated by dynamic programming.
///
/// The table holds `(capacity + 1) * (n + 1)` values of 8 bytes each, so at
/// 100 000 every thousand items cost roughly 800 MB.
pub const DEFAULT_MAX_CAPACITY_FOR_TABLE: u64 = 100_000;

/// Thresholds steering [`select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Catalogs with at most this many items use depth-first search.
    pub max_items_for_search: usize,
    /// Larger catalogs are tabulated when the capacity is at most this.
    pub max_capacity_for_table: u64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_items_for_search: DEFAULT_MAX_ITEMS_FOR_SEARCH,
            max_capacity_for_table: DEFAULT_MAX_CAPACITY_FOR_TABLE,
        }
    }
}

/// Why [`select`] chose an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchReason {
    /// Few enough items for tree search.
    SmallCatalog,
    /// Capacity small enough to tabulate.
    BoundedCapacity,
    /// Neither threshold holds; tree search runs without a size guarantee.
    Fallback,
}

/// The outcome of [`select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Chosen exact algorithm.
    pub algorithm: Algorithm,
    /// Which rule fired.
    pub reason: DispatchReason,
}

/// Choose an exact algorithm for a catalog of `len` items and `capacity`.
///
/// # Examples
/// ```
/// use knapsack_core::Algorithm;
/// use knapsack_solver::{DispatchReason, SelectorConfig, select};
///
/// let config = SelectorConfig::default();
/// assert_eq!(select(10, 1_000_000, &config).algorithm, Algorithm::DepthFirst);
/// assert_eq!(select(500, 1_000, &config).algorithm, Algorithm::DynamicProgramming);
/// assert_eq!(select(500, 1_000_000, &config).reason, DispatchReason::Fallback);
/// ```
#[must_use]
pub const fn select(len: usize, capacity: u64, config: &SelectorConfig) -> Dispatch {
    if len <= config.max_items_for_search {
        Dispatch {
            algorithm: Algorithm::DepthFirst,
            reason: DispatchReason::SmallCatalog,
        }
    } else if capacity <= config.max_capacity_for_table {
        Dispatch {
            algorithm: Algorithm::DynamicProgramming,
            reason: DispatchReason::BoundedCapacity,
        }
    } else {
        Dispatch {
            algorithm: Algorithm::DepthFirst,
            reason: DispatchReason::Fallback,
        }
    }
}

/// Construct the solver implementing `algorithm`.
///
/// `limits` applies to the branch-and-bound solvers and is ignored by the
/// others.
#[must_use]
pub fn solver_for(algorithm: Algorithm, limits: SearchLimits) -> Box<dyn Solver> {
    match algorithm {
        Algorithm::DepthFirst => Box::new(DepthFirstSolver::with_limits(limits)),
        Algorithm::BestFirst => Box::new(BestFirstSolver::with_limits(limits)),
        Algorithm::DynamicProgramming => Box::new(DynamicProgrammingSolver::new()),
        Algorithm::GreedyInputOrder => Box::new(GreedySolver::input_order()),
        Algorithm::GreedyDensity => Box::new(GreedySolver::density_order()),
    }
}

/// Solver that picks an exact algorithm per instance with [`select`].
///
/// # Examples
/// ```
/// use knapsack_core::{Instance, Solver};
/// use knapsack_solver::AutoSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let solution = AutoSolver::default().solve(&instance)?;
/// assert_eq!(solution.value, 220);
/// assert!(solution.optimality.is_proven());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoSolver {
    config: SelectorConfig,
    limits: SearchLimits,
}

impl AutoSolver {
    /// Construct a solver with explicit thresholds and search limits.
    #[must_use]
    pub const fn new(config: SelectorConfig, limits: SearchLimits) -> Self {
        Self { config, limits }
    }

    /// The dispatch thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }
}

impl Solver for AutoSolver {
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError> {
        let dispatch = select(instance.len(), instance.capacity(), &self.config);
        match dispatch.reason {
            DispatchReason::Fallback => log::warn!(
                "{} items and capacity {} exceed both dispatch thresholds; \
                 falling back to {} with no size guarantee",
                instance.len(),
                instance.capacity(),
                dispatch.algorithm
            ),
            DispatchReason::SmallCatalog | DispatchReason::BoundedCapacity => log::debug!(
                "dispatching {} items, capacity {} to {} ({:?})",
                instance.len(),
                instance.capacity(),
                dispatch.algorithm,
                dispatch.reason
            ),
        }
        solver_for(dispatch.algorithm, self.limits).solve(instance)
    }
}

/// Validate raw `(value, weight)` pairs and solve them with the default
/// [`AutoSolver`].
///
/// # Errors
/// Returns [`SolveError::InvalidInput`] for a negative capacity or value, or a
/// weight that is not positive. Solver failures propagate unchanged.
///
/// # Examples
/// ```
/// use knapsack_solver::solve;
///
/// # fn main() -> Result<(), knapsack_core::SolveError> {
/// let solution = solve([(60, 10), (100, 20), (120, 30)], 50)?;
/// assert_eq!((solution.value, solution.taken_bits()), (220, vec![0, 1, 1]));
/// assert!(solve([(5, 0)], 10).is_err());
/// # Ok(())
/// # }
/// ```
pub fn solve<I>(pairs: I, capacity: i64) -> Result<Solution, SolveError>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let instance = Instance::from_signed(pairs, capacity)?;
    AutoSolver::default().solve(&instance)
}
