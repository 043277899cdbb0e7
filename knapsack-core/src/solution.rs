//! Solver results.
//!
//! A [`Solution`] reports the packed value, the inclusion flag for every item in
//! input order, whether the value is a proven optimum, and per-run
//! [`Diagnostics`].

use std::time::Duration;

use crate::Algorithm;

/// Whether a solution's value is known to be optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Optimality {
    /// Produced by an exact algorithm that ran to completion.
    Proven,
    /// Produced by a heuristic; better selections may exist.
    Heuristic,
}

impl Optimality {
    /// Return `true` for [`Optimality::Proven`].
    #[must_use]
    pub const fn is_proven(self) -> bool {
        matches!(self, Self::Proven)
    }
}

/// Diagnostic information describing a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Algorithm that produced the solution.
    pub algorithm: Algorithm,
    /// Search nodes created (branch-and-bound) or table cells filled (tabulation).
    pub nodes_expanded: u64,
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
}

/// A packing of the knapsack.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use knapsack_core::{Algorithm, Diagnostics, Optimality, Solution};
///
/// let solution = Solution {
///     value: 220,
///     taken: vec![false, true, true],
///     optimality: Optimality::Proven,
///     diagnostics: Diagnostics {
///         algorithm: Algorithm::DepthFirst,
///         nodes_expanded: 5,
///         solve_time: Duration::ZERO,
///     },
/// };
/// assert_eq!(solution.taken_bits(), vec![0, 1, 1]);
/// assert_eq!(solution.selected().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Total value of the packed items.
    pub value: u64,
    /// Inclusion flag per item, indexed by input position.
    pub taken: Vec<bool>,
    /// Whether `value` is proven optimal.
    pub optimality: Optimality,
    /// How the solution was obtained.
    pub diagnostics: Diagnostics,
}

impl Solution {
    /// Inclusion flags rendered as `0`/`1`.
    #[must_use]
    pub fn taken_bits(&self) -> Vec<u8> {
        self.taken.iter().map(|&selected| u8::from(selected)).collect()
    }

    /// Input indices of the packed items in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.taken
            .iter()
            .enumerate()
            .filter_map(|(index, &selected)| selected.then_some(index))
    }
}
