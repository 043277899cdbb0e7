//! Fractional relaxation bound.
//!
//! The bound walks the density order, packs every item it is allowed to pack,
//! and fills the leftover room with a fraction of the first item that does not
//! fit. Because the relaxation may take anything an integral packing can, the
//! result never falls below the best integral value consistent with the fixed
//! decisions, which is what makes pruning on it safe.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU64;

use knapsack_core::SolveError;

use crate::DensityOrder;

/// A fixed or open decision about one item, addressed by density position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decision {
    /// Not decided yet; the bound may pack it.
    #[default]
    Open,
    /// Fixed as packed.
    Included,
    /// Fixed as left out.
    Excluded,
}

/// One decision per item in density order.
///
/// # Examples
/// ```
/// use knapsack_solver::{Decision, DecisionFilter};
///
/// let filter = DecisionFilter::open(3).with(1, Decision::Excluded);
/// assert_eq!(filter.get(0), Decision::Open);
/// assert_eq!(filter.get(1), Decision::Excluded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionFilter {
    decisions: Vec<Decision>,
}

impl DecisionFilter {
    /// A filter of `len` open decisions.
    #[must_use]
    pub fn open(len: usize) -> Self {
        Self {
            decisions: vec![Decision::Open; len],
        }
    }

    /// Decision at `position`; out-of-range positions read as open.
    #[must_use]
    pub fn get(&self, position: usize) -> Decision {
        self.decisions.get(position).copied().unwrap_or_default()
    }

    /// Record a decision in place. Out-of-range positions are ignored.
    pub fn set(&mut self, position: usize, decision: Decision) {
        if let Some(slot) = self.decisions.get_mut(position) {
            *slot = decision;
        }
    }

    /// Copy of the filter with one more decision recorded.
    #[must_use]
    pub fn with(&self, position: usize, decision: Decision) -> Self {
        let mut snapshot = self.clone();
        snapshot.set(position, decision);
        snapshot
    }

    /// Number of items covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether the filter covers no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

/// An exact relaxation value: `whole + remainder / divisor`.
///
/// The fractional item contributes `room * value / weight`, which is kept as
/// a quotient and remainder so that bounds compare exactly for any `u64`
/// values. The remainder is always below the divisor.
///
/// # Examples
/// ```
/// use knapsack_solver::RelaxationBound;
///
/// let half_past_ten = RelaxationBound::new(10, 1, 2);
/// assert!(half_past_ten > RelaxationBound::integral(10));
/// assert!(half_past_ten < RelaxationBound::integral(11));
/// assert!(half_past_ten.exceeds(10));
/// assert!(!RelaxationBound::integral(10).exceeds(10));
/// assert_eq!(RelaxationBound::new(3, 2, 4), RelaxationBound::new(3, 1, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelaxationBound {
    whole: u64,
    remainder: u64,
    divisor: NonZeroU64,
}

impl RelaxationBound {
    /// A bound with no fractional part.
    #[must_use]
    pub const fn integral(whole: u64) -> Self {
        Self {
            whole,
            remainder: 0,
            divisor: NonZeroU64::MIN,
        }
    }

    /// `whole + remainder / divisor`. A remainder of at least `divisor`, or a
    /// zero divisor, is carried into the whole part.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "splits an exact fraction into quotient and remainder"
    )]
    pub const fn new(whole: u64, remainder: u64, divisor: u64) -> Self {
        let Some(nonzero) = NonZeroU64::new(divisor) else {
            return Self::integral(whole.saturating_add(remainder));
        };
        Self {
            whole: whole.saturating_add(remainder / divisor),
            remainder: remainder % divisor,
            divisor: nonzero,
        }
    }

    /// Integral part of the bound.
    #[must_use]
    pub const fn whole(&self) -> u64 {
        self.whole
    }

    /// Whether the bound has a fractional part.
    #[must_use]
    pub const fn is_integral(&self) -> bool {
        self.remainder == 0
    }

    /// Whether the bound is strictly greater than `value`.
    #[must_use]
    pub const fn exceeds(&self, value: u64) -> bool {
        self.whole > value || (self.whole == value && self.remainder > 0)
    }
}

impl Ord for RelaxationBound {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both remainders are below 2^64, so the cross products fit in u128.
        self.whole.cmp(&other.whole).then_with(|| {
            let left = u128::from(self.remainder) * u128::from(other.divisor.get());
            let right = u128::from(other.remainder) * u128::from(self.divisor.get());
            left.cmp(&right)
        })
    }
}

impl PartialOrd for RelaxationBound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RelaxationBound {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RelaxationBound {}

impl fmt::Display for RelaxationBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            write!(f, "{}", self.whole)
        } else {
            write!(f, "{} {}/{}", self.whole, self.remainder, self.divisor)
        }
    }
}

/// Upper bound on the value reachable under `filter`.
///
/// Decisions at positions up to and including `frontier` are fixed; an item
/// there is skipped only when it is [`Decision::Excluded`]. Every later item
/// is treated as packable. `None` means nothing is fixed yet.
///
/// # Examples
/// ```
/// use knapsack_core::Instance;
/// use knapsack_solver::{
///     Decision, DecisionFilter, DensityOrder, RelaxationBound, relaxation_bound,
/// };
///
/// # fn main() -> Result<(), knapsack_core::InstanceError> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let order = DensityOrder::new(&instance);
///
/// // 60 + 100 + 20/30 * 120
/// let root = relaxation_bound(&order, 50, &DecisionFilter::open(3), None);
/// assert_eq!(root, RelaxationBound::integral(240));
///
/// // Without the densest item: 100 + 120
/// let filter = DecisionFilter::open(3).with(0, Decision::Excluded);
/// let bound = relaxation_bound(&order, 50, &filter, Some(0));
/// assert_eq!(bound, RelaxationBound::integral(220));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn relaxation_bound(
    order: &DensityOrder,
    capacity: u64,
    filter: &DecisionFilter,
    frontier: Option<usize>,
) -> RelaxationBound {
    let mut packed_value = 0_u64;
    let mut room = capacity;
    for (position, weighted) in order.items().iter().enumerate() {
        let fixed = frontier.is_some_and(|last| position <= last);
        if fixed && filter.get(position) == Decision::Excluded {
            continue;
        }
        let item = weighted.item;
        if item.weight() <= room {
            // Instance totals fit in u64, so this sum cannot overflow.
            packed_value = packed_value.saturating_add(item.value());
            room -= item.weight();
        } else {
            return fractional_fill(packed_value, room, item.value(), item.weight());
        }
    }
    RelaxationBound::integral(packed_value)
}

/// `packed + room * value / weight` for an item that does not fit in `room`.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splits an exact fraction into quotient and remainder"
)]
fn fractional_fill(packed: u64, room: u64, value: u64, weight: u64) -> RelaxationBound {
    let share = u128::from(room) * u128::from(value);
    let divisor = u128::from(weight);
    // `room < weight`, so the quotient is below `value` and fits in u64.
    let quotient = u64::try_from(share / divisor).unwrap_or(u64::MAX);
    let remainder = u64::try_from(share % divisor).unwrap_or_default();
    RelaxationBound::new(packed.saturating_add(quotient), remainder, weight)
}

/// Reject a child whose bound exceeds its parent's.
///
/// Fixing a decision can only shrink the relaxation, so a growing bound means
/// the estimator or the bookkeeping around it is broken. The check only runs
/// in debug builds.
pub(crate) fn check_child_bound(
    parent: RelaxationBound,
    child: RelaxationBound,
) -> Result<(), SolveError> {
    if cfg!(debug_assertions) && child > parent {
        return Err(SolveError::InternalFault {
            detail: format!("child bound {child} exceeds parent bound {parent}"),
        });
    }
    Ok(())
}

/// Whether a subtree bounded by `bound` can still beat `incumbent`.
pub(crate) fn may_improve(bound: RelaxationBound, incumbent: Option<u64>) -> bool {
    incumbent.is_none_or(|best| bound.exceeds(best))
}
