//! The validated item catalog handed to every solver.
//!
//! An [`Instance`] owns the items in input order together with the knapsack
//! capacity. Construction rejects anything the solvers cannot reason about:
//! zero or negative weights (bounding divides by weight), negative values or
//! capacities, and catalogs whose totals would overflow `u64`.

use std::num::NonZeroU64;

use thiserror::Error;

use crate::Item;

/// Errors returned while building an [`Instance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// The capacity was negative.
    #[error("capacity must be non-negative, got {capacity}")]
    NegativeCapacity {
        /// Capacity supplied by the caller.
        capacity: i64,
    },
    /// An item had a negative value.
    #[error("item {index} has negative value {value}")]
    NegativeValue {
        /// Input position of the offending item.
        index: usize,
        /// Value supplied by the caller.
        value: i64,
    },
    /// An item had a zero or negative weight.
    #[error("item {index} has non-positive weight {weight}")]
    NonPositiveWeight {
        /// Input position of the offending item.
        index: usize,
        /// Weight supplied by the caller.
        weight: i64,
    },
    /// Summing every value or every weight overflowed `u64`.
    #[error("total {quantity} of the catalog overflows u64")]
    TotalOverflow {
        /// Which total overflowed (`"value"` or `"weight"`).
        quantity: &'static str,
    },
}

/// Aggregate value and weight of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of the selected values.
    pub value: u64,
    /// Sum of the selected weights.
    pub weight: u64,
}

/// A 0/1 knapsack problem: items in input order plus a capacity.
///
/// # Examples
/// ```
/// use knapsack_core::Instance;
///
/// # fn main() -> Result<(), knapsack_core::InstanceError> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// assert_eq!(instance.len(), 3);
/// assert_eq!(instance.capacity(), 50);
/// assert_eq!(instance.total_weight(), 60);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance {
    items: Vec<Item>,
    capacity: u64,
    total_value: u64,
    total_weight: u64,
}

impl Instance {
    /// Build an instance from unsigned `(value, weight)` pairs.
    ///
    /// Items are indexed by their position in `pairs`.
    ///
    /// # Errors
    /// Returns [`InstanceError::NonPositiveWeight`] for a zero weight and
    /// [`InstanceError::TotalOverflow`] when the totals overflow `u64`.
    pub fn new<I>(pairs: I, capacity: u64) -> Result<Self, InstanceError>
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let items = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (value, weight))| {
                let non_zero = NonZeroU64::new(weight).ok_or(InstanceError::NonPositiveWeight {
                    index,
                    weight: 0,
                })?;
                Ok(Item::new(index, value, non_zero))
            })
            .collect::<Result<Vec<_>, InstanceError>>()?;
        Self::from_items(items, capacity)
    }

    /// Build an instance from signed `(value, weight)` pairs, as read from
    /// untrusted text.
    ///
    /// # Errors
    /// Returns an [`InstanceError`] for a negative capacity or value, a
    /// non-positive weight, or totals that overflow `u64`.
    ///
    /// # Examples
    /// ```
    /// use knapsack_core::{Instance, InstanceError};
    ///
    /// let err = Instance::from_signed([(5, 0)], 10).expect_err("zero weight");
    /// assert_eq!(err, InstanceError::NonPositiveWeight { index: 0, weight: 0 });
    ///
    /// let err = Instance::from_signed([(5, 1)], -1).expect_err("negative capacity");
    /// assert_eq!(err, InstanceError::NegativeCapacity { capacity: -1 });
    /// ```
    pub fn from_signed<I>(pairs: I, capacity: i64) -> Result<Self, InstanceError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let unsigned_capacity =
            u64::try_from(capacity).map_err(|_| InstanceError::NegativeCapacity { capacity })?;
        let items = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (value, weight))| {
                let unsigned_value = u64::try_from(value)
                    .map_err(|_| InstanceError::NegativeValue { index, value })?;
                let unsigned_weight = u64::try_from(weight)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .ok_or(InstanceError::NonPositiveWeight { index, weight })?;
                Ok(Item::new(index, unsigned_value, unsigned_weight))
            })
            .collect::<Result<Vec<_>, InstanceError>>()?;
        Self::from_items(items, unsigned_capacity)
    }

    fn from_items(items: Vec<Item>, capacity: u64) -> Result<Self, InstanceError> {
        let total_value = items
            .iter()
            .try_fold(0_u64, |acc, item| acc.checked_add(item.value()))
            .ok_or(InstanceError::TotalOverflow { quantity: "value" })?;
        let total_weight = items
            .iter()
            .try_fold(0_u64, |acc, item| acc.checked_add(item.weight()))
            .ok_or(InstanceError::TotalOverflow { quantity: "weight" })?;
        Ok(Self {
            items,
            capacity,
            total_value,
            total_weight,
        })
    }

    /// Items in input order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Knapsack capacity.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every item's value.
    #[must_use]
    pub const fn total_value(&self) -> u64 {
        self.total_value
    }

    /// Sum of every item's weight.
    #[must_use]
    pub const fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Total value and weight of a selection given in input order.
    ///
    /// Returns `None` when `taken` does not have one entry per item.
    ///
    /// # Examples
    /// ```
    /// use knapsack_core::{Evaluation, Instance};
    ///
    /// # fn main() -> Result<(), knapsack_core::InstanceError> {
    /// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
    /// let evaluation = instance.evaluate(&[false, true, true]);
    /// assert_eq!(evaluation, Some(Evaluation { value: 220, weight: 50 }));
    /// assert_eq!(instance.evaluate(&[true]), None);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn evaluate(&self, taken: &[bool]) -> Option<Evaluation> {
        if taken.len() != self.items.len() {
            return None;
        }
        // Totals were checked at construction, so partial sums cannot overflow.
        let (value, weight) = self
            .items
            .iter()
            .zip(taken)
            .filter(|(_, selected)| **selected)
            .fold((0_u64, 0_u64), |(value, weight), (item, _)| {
                (
                    value.saturating_add(item.value()),
                    weight.saturating_add(item.weight()),
                )
            });
        Some(Evaluation { value, weight })
    }

    /// Whether a selection respects the capacity.
    #[must_use]
    pub fn is_feasible(&self, taken: &[bool]) -> bool {
        self.evaluate(taken)
            .is_some_and(|evaluation| evaluation.weight <= self.capacity)
    }
}
