//! Density ordering shared by the bound estimator and both tree searches.
//!
//! Position `p` in a [`DensityOrder`] is the item decided at tree depth `p`,
//! so this ordering is also the map from a root-to-leaf path back to input
//! indices.

use std::cmp::Ordering;

use knapsack_core::{Instance, Item};

/// An item paired with its value density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedItem {
    /// The underlying item.
    pub item: Item,
    /// `value / weight`.
    pub density: f64,
}

/// Items sorted by descending value density.
///
/// Ties are broken by ascending input index so the order, and with it every
/// search that depends on it, is deterministic.
///
/// # Examples
/// ```
/// use knapsack_core::Instance;
/// use knapsack_solver::DensityOrder;
///
/// # fn main() -> Result<(), knapsack_core::InstanceError> {
/// let instance = Instance::new([(10, 10), (30, 10), (20, 10)], 15)?;
/// let order = DensityOrder::new(&instance);
/// let indices: Vec<usize> = order.items().iter().map(|w| w.item.index()).collect();
/// assert_eq!(indices, vec![1, 2, 0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DensityOrder {
    items: Vec<WeightedItem>,
}

impl DensityOrder {
    /// Sort an instance's items by descending density.
    #[must_use]
    pub fn new(instance: &Instance) -> Self {
        let mut items: Vec<WeightedItem> = instance
            .items()
            .iter()
            .map(|item| WeightedItem {
                item: *item,
                density: item.density(),
            })
            .collect();
        items.sort_by(|lhs, rhs| {
            compare_density(&rhs.item, &lhs.item)
                .then_with(|| lhs.item.index().cmp(&rhs.item.index()))
        });
        Self { items }
    }

    /// Items in density order.
    #[must_use]
    pub fn items(&self) -> &[WeightedItem] {
        &self.items
    }

    /// Item decided at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&WeightedItem> {
        self.items.get(position)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Translate flags indexed by density position into flags indexed by
    /// input position.
    ///
    /// Positions without a flag are reported as not taken.
    #[must_use]
    pub fn to_input_order(&self, decisions: &[bool]) -> Vec<bool> {
        let mut taken = vec![false; self.items.len()];
        for (weighted, &selected) in self.items.iter().zip(decisions) {
            if let Some(slot) = taken.get_mut(weighted.item.index()) {
                *slot = selected;
            }
        }
        taken
    }
}

/// Compare `lhs.value / lhs.weight` with `rhs.value / rhs.weight` exactly by
/// cross-multiplying in 128 bits.
fn compare_density(lhs: &Item, rhs: &Item) -> Ordering {
    let left = u128::from(lhs.value()) * u128::from(rhs.weight());
    let right = u128::from(rhs.value()) * u128::from(lhs.weight());
    left.cmp(&right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_core::test_support::{classic_instance, instance};
    use rstest::rstest;

    fn indices(order: &DensityOrder) -> Vec<usize> {
        order.items().iter().map(|w| w.item.index()).collect()
    }

    #[rstest]
    fn classic_items_are_already_in_density_order() {
        let order = DensityOrder::new(&classic_instance());
        assert_eq!(indices(&order), vec![0, 1, 2]);
        let densities: Vec<f64> = order.items().iter().map(|w| w.density).collect();
        assert_eq!(densities, vec![6.0, 5.0, 4.0]);
    }

    #[rstest]
    fn equal_densities_keep_input_order() {
        let order = DensityOrder::new(&instance(&[(2, 1), (4, 2), (9, 3), (6, 3)], 5));
        assert_eq!(indices(&order), vec![2, 0, 1, 3]);
    }

    #[rstest]
    fn ordering_is_exact_for_nearly_equal_ratios() {
        // 1e15+1 / 1e15 is larger than 1 / 1 but the two densities round to the
        // same f64 neighbourhood.
        let big = 1_000_000_000_000_000;
        let order = DensityOrder::new(&instance(&[(1, 1), (big + 1, big)], 5));
        assert_eq!(indices(&order), vec![1, 0]);
    }

    #[rstest]
    fn decisions_map_back_to_input_positions() {
        let order = DensityOrder::new(&instance(&[(1, 1), (30, 10), (20, 5)], 20));
        assert_eq!(indices(&order), vec![2, 1, 0]);
        assert_eq!(order.to_input_order(&[true, false, true]), vec![true, false, true]);
        assert_eq!(order.to_input_order(&[true, true, false]), vec![false, true, true]);
    }
}
