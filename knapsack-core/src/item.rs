//! Items offered to the knapsack.

use std::num::NonZeroU64;

/// A single candidate for inclusion in the knapsack.
///
/// The `index` is the item's position in the caller's input order. Solutions
/// are always reported against this index, whatever order a solver visits the
/// items in.
///
/// # Examples
/// ```
/// use std::num::NonZeroU64;
/// use knapsack_core::Item;
///
/// let weight = NonZeroU64::new(10).expect("non-zero weight");
/// let item = Item::new(0, 60, weight);
/// assert_eq!(item.value(), 60);
/// assert_eq!(item.weight(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    index: usize,
    value: u64,
    weight: NonZeroU64,
}

impl Item {
    /// Construct an item. The weight is non-zero by construction.
    #[must_use]
    pub const fn new(index: usize, value: u64, weight: NonZeroU64) -> Self {
        Self {
            index,
            value,
            weight,
        }
    }

    /// Position of the item in input order.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Value gained by packing the item.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Capacity consumed by packing the item; always at least one.
    #[must_use]
    pub const fn weight(&self) -> u64 {
        self.weight.get()
    }

    /// Value per unit of weight.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU64;
    /// use knapsack_core::Item;
    ///
    /// let item = Item::new(0, 100, NonZeroU64::new(20).expect("non-zero"));
    /// assert!((item.density() - 5.0).abs() < f64::EPSILON);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "density is a real-valued ratio used for ordering and bounding"
    )]
    pub fn density(&self) -> f64 {
        self.value as f64 / self.weight.get() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item(value: u64, weight: u64) -> Item {
        Item::new(0, value, NonZeroU64::new(weight).expect("non-zero weight"))
    }

    #[rstest]
    #[case(60, 10, 6.0)]
    #[case(0, 7, 0.0)]
    #[case(3, 4, 0.75)]
    #[expect(
        clippy::float_arithmetic,
        reason = "test uses float maths for assertions"
    )]
    fn density_is_value_over_weight(#[case] value: u64, #[case] weight: u64, #[case] expected: f64) {
        assert!((item(value, weight).density() - expected).abs() < 1e-12);
    }

    #[rstest]
    fn accessors_round_trip_fields() {
        let item = Item::new(3, 42, NonZeroU64::new(7).expect("non-zero weight"));
        assert_eq!(item.index(), 3);
        assert_eq!(item.value(), 42);
        assert_eq!(item.weight(), 7);
    }
}
