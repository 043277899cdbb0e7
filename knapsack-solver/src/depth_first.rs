//! Depth-first branch-and-bound.
//!
//! Items are decided in density order. The walk keeps its own stack of
//! frames rather than recursing. At every node the include branch is
//! explored to completion before the exclude branch, so the first pass under
//! the root builds a strong incumbent and the second pass prunes against it.
//! An include child inherits its parent's bound unchanged; an exclude child
//! recomputes the bound and is dropped when it cannot beat the incumbent.

use std::time::Instant;

use knapsack_core::{Algorithm, Instance, Optimality, Solution, SolveError, Solver};

use crate::bound::{check_child_bound, may_improve};
use crate::outcome::{RunSummary, assemble};
use crate::tree::{Branch, DecisionNode, NodeArena, NodeId, SearchLimits};
use crate::{Decision, DecisionFilter, DensityOrder, relaxation_bound};

/// Exact solver exploring the decision tree depth first.
///
/// The pending-frame stack grows with the item count on the heap, not the
/// call stack.
///
/// # Examples
/// ```
/// use knapsack_core::{Instance, Solver};
/// use knapsack_solver::DepthFirstSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let solution = DepthFirstSolver::new().solve(&instance)?;
/// assert_eq!(solution.value, 220);
/// assert_eq!(solution.taken, vec![false, true, true]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSolver {
    limits: SearchLimits,
}

impl DepthFirstSolver {
    /// Construct a solver without a node ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limits(SearchLimits::unlimited())
    }

    /// Construct a solver with explicit search limits.
    #[must_use]
    pub const fn with_limits(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl Solver for DepthFirstSolver {
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let order = DensityOrder::new(instance);
        let mut search = DepthFirstSearch::new(&order, instance.capacity(), self.limits);
        let root_bound = relaxation_bound(&order, instance.capacity(), &search.filter, None);
        let root = search
            .arena
            .insert_root(DecisionNode::new(0, instance.capacity(), root_bound), ())?;

        search.explore(root)?;

        let (leaf, value) = search.incumbent.ok_or_else(|| SolveError::InternalFault {
            detail: "depth-first search finished without a complete assignment".to_owned(),
        })?;
        let decisions = search.arena.trace(leaf, order.len())?;
        assemble(
            instance,
            order.to_input_order(&decisions),
            value,
            RunSummary {
                algorithm: Algorithm::DepthFirst,
                optimality: Optimality::Proven,
                nodes_expanded: search.arena.created(),
                started_at,
            },
        )
    }
}

/// What remains to be done at a node on the explicit stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Try the include branch, then come back for the exclude branch.
    Enter,
    /// The include subtree is finished; try the exclude branch.
    Exclude,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    depth: usize,
    phase: Phase,
}

struct DepthFirstSearch<'a> {
    order: &'a DensityOrder,
    capacity: u64,
    arena: NodeArena<()>,
    /// Decisions along the current path. Entries past the current depth are
    /// stale and never read as fixed.
    filter: DecisionFilter,
    incumbent: Option<(NodeId, u64)>,
}

impl<'a> DepthFirstSearch<'a> {
    fn new(order: &'a DensityOrder, capacity: u64, limits: SearchLimits) -> Self {
        Self {
            order,
            capacity,
            arena: NodeArena::new(limits),
            filter: DecisionFilter::open(order.len()),
            incumbent: None,
        }
    }

    fn incumbent_value(&self) -> Option<u64> {
        self.incumbent.map(|(_, value)| value)
    }

    /// Visit the tree under `root` with an explicit stack, include branch
    /// first, so catalog size never bounds the call depth.
    fn explore(&mut self, root: NodeId) -> Result<(), SolveError> {
        let mut stack = vec![Frame {
            node: root,
            depth: 0,
            phase: Phase::Enter,
        }];
        while let Some(frame) = stack.pop() {
            let Some(weighted) = self.order.get(frame.depth) else {
                self.consider_leaf(frame.node)?;
                continue;
            };
            let item = weighted.item;
            let (value, room, bound) = {
                let core = &self.arena.get(frame.node)?.core;
                (core.value, core.room, core.bound)
            };

            match frame.phase {
                Phase::Enter => {
                    self.filter.set(frame.depth, Decision::Included);
                    stack.push(Frame {
                        phase: Phase::Exclude,
                        ..frame
                    });
                    if item.weight() <= room {
                        let child = self.arena.insert_child(
                            frame.node,
                            Branch::Include,
                            DecisionNode::new(
                                value.saturating_add(item.value()),
                                room - item.weight(),
                                bound,
                            ),
                            (),
                        )?;
                        stack.push(Frame {
                            node: child,
                            depth: frame.depth + 1,
                            phase: Phase::Enter,
                        });
                    }
                }
                Phase::Exclude => {
                    // An exclude child never out-bounds its parent.
                    if !may_improve(bound, self.incumbent_value()) {
                        continue;
                    }
                    self.filter.set(frame.depth, Decision::Excluded);
                    let exclude_bound = relaxation_bound(
                        self.order,
                        self.capacity,
                        &self.filter,
                        Some(frame.depth),
                    );
                    check_child_bound(bound, exclude_bound)?;
                    if may_improve(exclude_bound, self.incumbent_value()) {
                        let child = self.arena.insert_child(
                            frame.node,
                            Branch::Exclude,
                            DecisionNode::new(value, room, exclude_bound),
                            (),
                        )?;
                        stack.push(Frame {
                            node: child,
                            depth: frame.depth + 1,
                            phase: Phase::Enter,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn consider_leaf(&mut self, leaf: NodeId) -> Result<(), SolveError> {
        let value = self.arena.get(leaf)?.core.value;
        if self.incumbent_value().is_none_or(|best| value > best) {
            log::trace!("depth-first incumbent improved to {value}");
            self.incumbent = Some((leaf, value));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_core::test_support::{brute_force_optimum, classic_instance, instance};
    use rstest::rstest;

    #[rstest]
    fn classic_instance_takes_the_two_heavier_items() {
        let solution = DepthFirstSolver::new()
            .solve(&classic_instance())
            .expect("solve should succeed");
        assert_eq!(solution.value, 220);
        assert_eq!(solution.taken_bits(), vec![0, 1, 1]);
        assert_eq!(solution.optimality, Optimality::Proven);
        assert_eq!(solution.diagnostics.algorithm, Algorithm::DepthFirst);
        assert!(solution.diagnostics.nodes_expanded > 0);
    }

    #[rstest]
    #[case(&[(5, 10)], 4, 0, vec![false])]
    #[case(&[(5, 1), (6, 2), (7, 3)], 0, 0, vec![false, false, false])]
    #[case(&[(5, 1), (6, 2), (7, 3)], 6, 18, vec![true, true, true])]
    #[case(&[], 10, 0, vec![])]
    fn edge_cases(
        #[case] pairs: &[(u64, u64)],
        #[case] capacity: u64,
        #[case] expected_value: u64,
        #[case] expected_taken: Vec<bool>,
    ) {
        let solution = DepthFirstSolver::new()
            .solve(&instance(pairs, capacity))
            .expect("solve should succeed");
        assert_eq!(solution.value, expected_value);
        assert_eq!(solution.taken, expected_taken);
    }

    #[rstest]
    fn matches_brute_force_when_density_order_misleads() {
        // The densest item blocks the best pair.
        let source = instance(&[(10, 5), (7, 4), (7, 4), (1, 1)], 8);
        let solution = DepthFirstSolver::new()
            .solve(&source)
            .expect("solve should succeed");
        let best = brute_force_optimum(&source).expect("small instance");
        assert_eq!(solution.value, best.value);
        assert_eq!(solution.value, 14);
        assert_eq!(solution.taken, vec![false, true, true, false]);
    }

    #[rstest]
    fn values_beyond_float_precision_are_compared_exactly() {
        let big = 1_u64 << 60;
        let solution = DepthFirstSolver::new()
            .solve(&instance(&[(big, 1), (big + 2, 2)], 2))
            .expect("solve should succeed");
        assert_eq!(solution.value, big + 2);
        assert_eq!(solution.taken, vec![false, true]);
    }

    #[rstest]
    fn node_ceiling_aborts_the_search() {
        let source = instance(&[(10, 5), (7, 4), (7, 4), (1, 1), (3, 2), (4, 3)], 9);
        let err = DepthFirstSolver::with_limits(SearchLimits::with_max_nodes(3))
            .solve(&source)
            .expect_err("ceiling should stop the search");
        assert_eq!(err, SolveError::NodeLimitReached { limit: 3 });
    }
}
