//! Test-only reference helpers shared by unit, property and behaviour tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use crate::{Evaluation, Instance};

/// Largest catalog [`brute_force_optimum`] will enumerate.
pub const BRUTE_FORCE_MAX_ITEMS: usize = 20;

/// The three-item textbook instance: optimum 220 by taking items 1 and 2.
///
/// # Examples
/// ```rust
/// use knapsack_core::test_support::classic_instance;
///
/// let instance = classic_instance();
/// assert_eq!(instance.capacity(), 50);
/// ```
#[must_use]
#[expect(clippy::expect_used, reason = "fixture data is statically valid")]
pub fn classic_instance() -> Instance {
    Instance::new([(60, 10), (100, 20), (120, 30)], 50).expect("classic instance is valid")
}

/// Build an instance from literal pairs, panicking on invalid data.
#[must_use]
#[expect(clippy::expect_used, reason = "test fixtures fail loudly on bad data")]
pub fn instance(pairs: &[(u64, u64)], capacity: u64) -> Instance {
    Instance::new(pairs.iter().copied(), capacity).expect("fixture instance should be valid")
}

/// Best feasible value and weight found by enumerating every subset.
///
/// Returns `None` for catalogs larger than [`BRUTE_FORCE_MAX_ITEMS`].
///
/// # Examples
/// ```rust
/// use knapsack_core::test_support::{brute_force_optimum, classic_instance};
///
/// let best = brute_force_optimum(&classic_instance()).expect("small instance");
/// assert_eq!(best.value, 220);
/// ```
#[must_use]
pub fn brute_force_optimum(instance: &Instance) -> Option<Evaluation> {
    let n = instance.len();
    if n > BRUTE_FORCE_MAX_ITEMS {
        return None;
    }
    let mut best = Evaluation {
        value: 0,
        weight: 0,
    };
    let mut taken = vec![false; n];
    for mask in 0_u32..(1_u32 << n) {
        for (position, slot) in taken.iter_mut().enumerate() {
            *slot = mask & (1_u32 << position) != 0;
        }
        if let Some(evaluation) = instance.evaluate(&taken)
            && evaluation.weight <= instance.capacity()
            && evaluation.value > best.value
        {
            best = evaluation;
        }
    }
    Some(best)
}
