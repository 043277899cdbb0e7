//! Greedy baselines.
//!
//! Both heuristics walk the items once and pack each one that still fits.
//! They are fast and always feasible but make no optimality claim, and the
//! automatic dispatch never picks them.

use std::time::Instant;

use knapsack_core::{Algorithm, Instance, Item, Optimality, Solution, SolveError, Solver};

use crate::DensityOrder;
use crate::outcome::{RunSummary, assemble};

/// The order in which a [`GreedySolver`] offers items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreedyOrder {
    /// Input order.
    #[default]
    Input,
    /// Descending value density.
    Density,
}

/// Heuristic solver packing items in a fixed order while they fit.
///
/// # Examples
/// ```
/// use knapsack_core::{Instance, Optimality, Solver};
/// use knapsack_solver::GreedySolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let solution = GreedySolver::density_order().solve(&instance)?;
/// assert_eq!(solution.value, 160);
/// assert_eq!(solution.optimality, Optimality::Heuristic);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver {
    order: GreedyOrder,
}

impl GreedySolver {
    /// Construct a solver visiting items in `order`.
    #[must_use]
    pub const fn new(order: GreedyOrder) -> Self {
        Self { order }
    }

    /// Pack items in input order.
    #[must_use]
    pub const fn input_order() -> Self {
        Self::new(GreedyOrder::Input)
    }

    /// Pack items by descending value density.
    #[must_use]
    pub const fn density_order() -> Self {
        Self::new(GreedyOrder::Density)
    }

    /// The visiting order.
    #[must_use]
    pub const fn order(&self) -> GreedyOrder {
        self.order
    }

    const fn algorithm(&self) -> Algorithm {
        match self.order {
            GreedyOrder::Input => Algorithm::GreedyInputOrder,
            GreedyOrder::Density => Algorithm::GreedyDensity,
        }
    }
}

impl Solver for GreedySolver {
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let items: Vec<Item> = match self.order {
            GreedyOrder::Input => instance.items().to_vec(),
            GreedyOrder::Density => DensityOrder::new(instance)
                .items()
                .iter()
                .map(|weighted| weighted.item)
                .collect(),
        };

        let mut taken = vec![false; instance.len()];
        let mut room = instance.capacity();
        let mut value = 0_u64;
        let mut visited = 0_u64;
        for item in items {
            visited += 1;
            if item.weight() > room {
                continue;
            }
            if let Some(flag) = taken.get_mut(item.index()) {
                *flag = true;
                room -= item.weight();
                value = value.saturating_add(item.value());
            }
        }

        assemble(
            instance,
            taken,
            value,
            RunSummary {
                algorithm: self.algorithm(),
                optimality: Optimality::Heuristic,
                nodes_expanded: visited,
                started_at,
            },
        )
    }
}
