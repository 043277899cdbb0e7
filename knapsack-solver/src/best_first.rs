//! Best-first branch-and-bound.
//!
//! The frontier is a max-heap on the relaxation bound. Each pop expands the
//! most promising node; a popped node that has decided every item becomes the
//! incumbent if it is strictly better. The search stops as soon as a popped
//! bound cannot beat the incumbent: the heap exposes the best remaining bound,
//! so nothing left on the frontier can do better.
//!
//! Every frontier node carries its own copy of the decision filter, so heap
//! entries are self-contained.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use knapsack_core::{Algorithm, Instance, Optimality, Solution, SolveError, Solver};

use crate::bound::{check_child_bound, may_improve};
use crate::outcome::{RunSummary, assemble};
use crate::tree::{Branch, DecisionNode, NodeArena, NodeId, SearchLimits};
use crate::{Decision, DecisionFilter, DensityOrder, RelaxationBound, relaxation_bound};

/// Exact solver expanding the frontier node with the highest bound first.
///
/// Typically creates fewer nodes than [`DepthFirstSolver`](crate::DepthFirstSolver),
/// at the cost of an `O(n)` filter copy per node.
///
/// # Examples
/// ```
/// use knapsack_core::{Instance, Solver};
/// use knapsack_solver::BestFirstSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let solution = BestFirstSolver::new().solve(&instance)?;
/// assert_eq!(solution.value, 220);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirstSolver {
    limits: SearchLimits,
}

impl BestFirstSolver {
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

/// Best-first payload: how far the node has decided, and its own filter.
#[derive(Debug)]
struct FrontierExtension {
    /// Density position of the last decision; `None` at the root.
    depth: Option<usize>,
    filter: DecisionFilter,
}

impl FrontierExtension {
    /// Number of items decided on the path to this node.
    fn decided(&self) -> usize {
        self.depth.map_or(0, |depth| depth + 1)
    }
}

/// Heap entry ordered by bound, then by insertion sequence.
///
/// Among equal bounds the most recently inserted node wins, which makes ties
/// deterministic and dives towards complete assignments.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    bound: RelaxationBound,
    sequence: u64,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bound
            .cmp(&other.bound)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Solver for BestFirstSolver {
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let order = DensityOrder::new(instance);
        let mut search = BestFirstSearch::new(&order, instance.capacity(), self.limits);
        let (leaf, value) = search.run()?;
        let decisions = search.arena.trace(leaf, order.len())?;
        assemble(
            instance,
            order.to_input_order(&decisions),
            value,
            RunSummary {
                algorithm: Algorithm::BestFirst,
                optimality: Optimality::Proven,
                nodes_expanded: search.arena.created(),
                started_at,
            },
        )
    }
}

struct BestFirstSearch<'a> {
    order: &'a DensityOrder,
    capacity: u64,
    arena: NodeArena<FrontierExtension>,
    frontier: BinaryHeap<FrontierEntry>,
    sequence: u64,
}

impl<'a> BestFirstSearch<'a> {
    fn new(order: &'a DensityOrder, capacity: u64, limits: SearchLimits) -> Self {
        Self {
            order,
            capacity,
            arena: NodeArena::new(limits),
            frontier: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// Run to proven optimality and return the winning leaf and its value.
    fn run(&mut self) -> Result<(NodeId, u64), SolveError> {
        let filter = DecisionFilter::open(self.order.len());
        let root_bound = relaxation_bound(self.order, self.capacity, &filter, None);
        let root = self.arena.insert_root(
            DecisionNode::new(0, self.capacity, root_bound),
            FrontierExtension {
                depth: None,
                filter,
            },
        )?;
        self.push(root, root_bound);

        let mut incumbent: Option<(NodeId, u64)> = None;
        let mut last_bound = root_bound;
        while let Some(entry) = self.frontier.pop() {
            // Children never out-bound their parents, so pops never increase.
            check_child_bound(last_bound, entry.bound)?;
            last_bound = entry.bound;

            let node = self.arena.get(entry.node)?;
            let value = node.core.value;
            let decided = node.extension.decided();
            if decided == self.order.len() && incumbent.is_none_or(|(_, best)| value > best) {
                log::trace!("best-first incumbent improved to {value}");
                incumbent = Some((entry.node, value));
            }
            if !may_improve(entry.bound, incumbent.map(|(_, best)| best)) {
                break;
            }
            if decided < self.order.len() {
                self.expand(entry.node, decided)?;
            }
        }

        incumbent.ok_or_else(|| SolveError::InternalFault {
            detail: "best-first frontier emptied without a complete assignment".to_owned(),
        })
    }

    /// Create the include and exclude children deciding density position
    /// `position`.
    fn expand(&mut self, parent: NodeId, position: usize) -> Result<(), SolveError> {
        let item = self
            .order
            .get(position)
            .ok_or_else(|| SolveError::InternalFault {
                detail: format!("no item at density position {position}"),
            })?
            .item;
        let node = self.arena.get(parent)?;
        let (value, room, bound) = (node.core.value, node.core.room, node.core.bound);
        let include_filter = node.extension.filter.with(position, Decision::Included);
        let exclude_filter = node.extension.filter.with(position, Decision::Excluded);

        if item.weight() <= room {
            let child = self.arena.insert_child(
                parent,
                Branch::Include,
                DecisionNode::new(value.saturating_add(item.value()), room - item.weight(), bound),
                FrontierExtension {
                    depth: Some(position),
                    filter: include_filter,
                },
            )?;
            self.push(child, bound);
        }

        let exclude_bound =
            relaxation_bound(self.order, self.capacity, &exclude_filter, Some(position));
        check_child_bound(bound, exclude_bound)?;
        let child = self.arena.insert_child(
            parent,
            Branch::Exclude,
            DecisionNode::new(value, room, exclude_bound),
            FrontierExtension {
                depth: Some(position),
                filter: exclude_filter,
            },
        )?;
        self.push(child, exclude_bound);
        Ok(())
    }

    fn push(&mut self, node: NodeId, bound: RelaxationBound) {
        self.frontier.push(FrontierEntry {
            bound,
            sequence: self.sequence,
            node,
        });
        self.sequence += 1;
    }
}
