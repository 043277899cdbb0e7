//! Arena-backed decision tree shared by both branch-and-bound searches.
//!
//! Nodes are addressed by [`NodeId`]. A node records its parent as an index
//! and its two children as optional indices, so the tree has no ownership
//! cycles and traceback is a plain walk up the parent links. The per-search
//! payload is the extension type `E`: the depth-first search carries nothing
//! extra, the best-first search carries a depth and a filter snapshot.

use knapsack_core::SolveError;

use crate::RelaxationBound;

/// Caps applied to a branch-and-bound search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Maximum number of tree nodes the search may create. `None` is
    /// unlimited. Exceeding the ceiling fails the solve with
    /// [`SolveError::NodeLimitReached`].
    pub max_nodes: Option<usize>,
}

impl SearchLimits {
    /// No ceiling.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self { max_nodes: None }
    }

    /// Stop after creating `max_nodes` nodes.
    #[must_use]
    pub const fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub(crate) struct NodeId(usize);

/// Which child of its parent a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Branch {
    Include,
    Exclude,
}

/// Fields common to every search node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecisionNode {
    /// Value packed along the path from the root.
    pub(crate) value: u64,
    /// Capacity left along the path from the root.
    pub(crate) room: u64,
    /// Relaxation bound for every completion of this path.
    pub(crate) bound: RelaxationBound,
    pub(crate) parent: Option<NodeId>,
    pub(crate) include_child: Option<NodeId>,
    pub(crate) exclude_child: Option<NodeId>,
}

impl DecisionNode {
    pub(crate) const fn new(value: u64, room: u64, bound: RelaxationBound) -> Self {
        Self {
            value,
            room,
            bound,
            parent: None,
            include_child: None,
            exclude_child: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct TreeNode<E> {
    pub(crate) core: DecisionNode,
    pub(crate) extension: E,
}

/// Owns every node a search creates until the search returns.
///
/// Nothing is reclaimed mid-search: the winning leaf's ancestors must survive
/// for traceback, and tracking which subtrees are fully resolved costs more
/// than the memory it would save on the instance sizes dispatched here.
#[derive(Debug)]
pub(crate) struct NodeArena<E> {
    nodes: Vec<TreeNode<E>>,
    limits: SearchLimits,
}

impl<E> NodeArena<E> {
    pub(crate) const fn new(limits: SearchLimits) -> Self {
        Self {
            nodes: Vec::new(),
            limits,
        }
    }

    /// Number of nodes created, as reported in diagnostics.
    pub(crate) fn created(&self) -> u64 {
        u64::try_from(self.nodes.len()).unwrap_or(u64::MAX)
    }

    pub(crate) fn get(&self, id: NodeId) -> Result<&TreeNode<E>, SolveError> {
        self.nodes.get(id.0).ok_or_else(|| missing_node(id))
    }

    pub(crate) fn insert_root(
        &mut self,
        core: DecisionNode,
        extension: E,
    ) -> Result<NodeId, SolveError> {
        self.push(TreeNode { core, extension })
    }

    /// Add a child under `parent` and record it in the parent's slot for
    /// `branch`.
    pub(crate) fn insert_child(
        &mut self,
        parent: NodeId,
        branch: Branch,
        mut core: DecisionNode,
        extension: E,
    ) -> Result<NodeId, SolveError> {
        core.parent = Some(parent);
        let child = self.push(TreeNode { core, extension })?;
        let slot = self
            .nodes
            .get_mut(parent.0)
            .ok_or_else(|| missing_node(parent))?;
        match branch {
            Branch::Include => slot.core.include_child = Some(child),
            Branch::Exclude => slot.core.exclude_child = Some(child),
        }
        Ok(child)
    }

    fn push(&mut self, node: TreeNode<E>) -> Result<NodeId, SolveError> {
        if let Some(limit) = self.limits.max_nodes
            && self.nodes.len() >= limit
        {
            return Err(SolveError::NodeLimitReached { limit });
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Reconstruct the include/exclude decisions on the path from the root to
    /// `leaf`, indexed by depth.
    ///
    /// A node was packed exactly when it is its parent's include child. The
    /// path must contain exactly `decisions` edges.
    pub(crate) fn trace(&self, leaf: NodeId, decisions: usize) -> Result<Vec<bool>, SolveError> {
        let mut flags = vec![false; decisions];
        let mut position = decisions;
        let mut current = leaf;
        while let Some(parent) = self.get(current)?.core.parent {
            position = position.checked_sub(1).ok_or_else(|| SolveError::InternalFault {
                detail: format!("path to leaf is longer than {decisions} decisions"),
            })?;
            let parent_core = &self.get(parent)?.core;
            let included = if parent_core.include_child == Some(current) {
                true
            } else if parent_core.exclude_child == Some(current) {
                false
            } else {
                return Err(SolveError::InternalFault {
                    detail: format!("node {} is not a child of its parent", current.0),
                });
            };
            if let Some(flag) = flags.get_mut(position) {
                *flag = included;
            }
            current = parent;
        }
        if position != 0 {
            return Err(SolveError::InternalFault {
                detail: format!(
                    "path to leaf covers {} of {decisions} decisions",
                    decisions - position
                ),
            });
        }
        Ok(flags)
    }
}

fn missing_node(id: NodeId) -> SolveError {
    SolveError::InternalFault {
        detail: format!("node {} is not in the arena", id.0),
    }
}
