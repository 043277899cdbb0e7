//! Exact tabulation over capacity and item count.
//!
//! Cell `(k, i)` holds the best value reachable with the first `i` items and
//! capacity `k`. The table is a single flat allocation of
//! `(capacity + 1) * (n + 1)` cells laid out row by capacity, so memory grows
//! with the capacity no matter how few items there are.

use std::time::Instant;

use knapsack_core::{Algorithm, Instance, Optimality, Solution, SolveError, Solver};

use crate::outcome::{RunSummary, assemble};

/// Default ceiling on the number of table cells.
///
/// Each cell is a `u64`, so 2^32 cells is 32 GiB. Larger tables fail with
/// [`SolveError::TableTooLarge`] before anything is allocated, since an
/// overcommitting allocator accepts the reservation and the process is then
/// killed while the table is zeroed.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 1 << 32;

/// Exact solver filling an `O(n × capacity)` table.
///
/// Tables above the cell ceiling, and tables the allocator refuses, are
/// reported as [`SolveError::TableTooLarge`] instead of aborting the process.
///
/// # Examples
/// ```
/// use knapsack_core::{Instance, Solver};
/// use knapsack_solver::DynamicProgrammingSolver;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50)?;
/// let solution = DynamicProgrammingSolver::new().solve(&instance)?;
/// assert_eq!(solution.value, 220);
/// assert_eq!(solution.taken, vec![false, true, true]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DynamicProgrammingSolver {
    max_cells: u64,
}

impl DynamicProgrammingSolver {
    /// Construct a solver with the [`DEFAULT_MAX_TABLE_CELLS`] ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_cells(DEFAULT_MAX_TABLE_CELLS)
    }

    /// Construct a solver refusing tables of more than `max_cells` cells.
    #[must_use]
    pub const fn with_max_cells(max_cells: u64) -> Self {
        Self { max_cells }
    }

    /// The cell ceiling in use.
    #[must_use]
    pub const fn max_cells(&self) -> u64 {
        self.max_cells
    }
}

impl Default for DynamicProgrammingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for DynamicProgrammingSolver {
    fn solve(&self, instance: &Instance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let table = Table::build(instance, self.max_cells)?;
        let value = table.optimum();
        let taken = table.traceback(instance);
        assemble(
            instance,
            taken,
            value,
            RunSummary {
                algorithm: Algorithm::DynamicProgramming,
                optimality: Optimality::Proven,
                nodes_expanded: u64::try_from(table.cells.len()).unwrap_or(u64::MAX),
                started_at,
            },
        )
    }
}

struct Table {
    cells: Vec<u64>,
    columns: usize,
    capacity: usize,
}

#[expect(
    clippy::indexing_slicing,
    reason = "every index is below (capacity + 1) * columns, the allocated length"
)]
impl Table {
    fn build(instance: &Instance, max_cells: u64) -> Result<Self, SolveError> {
        let columns = instance.len().saturating_add(1);
        let rows = instance.capacity().saturating_add(1);
        let too_large = || SolveError::TableTooLarge { rows, columns };
        let wide = u64::try_from(columns).map_err(|_| too_large())?;
        let needed = u128::from(rows) * u128::from(wide);
        if needed > u128::from(max_cells) {
            return Err(too_large());
        }
        let capacity = usize::try_from(instance.capacity()).map_err(|_| too_large())?;
        let len = usize::try_from(needed).map_err(|_| too_large())?;
        let mut cells: Vec<u64> = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, 0);
        log::debug!("tabulating {rows} rows by {columns} columns");

        for room in 0..=capacity {
            let row = room * columns;
            for (column, item) in (1..columns).zip(instance.items()) {
                let skip = cells[row + column - 1];
                let take = usize::try_from(item.weight())
                    .ok()
                    .filter(|&weight| weight <= room)
                    .map(|weight| {
                        cells[(room - weight) * columns + column - 1].saturating_add(item.value())
                    });
                cells[row + column] = take.map_or(skip, |value| value.max(skip));
            }
        }

        Ok(Self {
            cells,
            columns,
            capacity,
        })
    }

    fn cell(&self, room: usize, column: usize) -> u64 {
        self.cells[room * self.columns + column]
    }

    fn optimum(&self) -> u64 {
        self.cell(self.capacity, self.columns - 1)
    }

    /// Walk back from the final cell: a change between adjacent columns means
    /// the item was packed.
    fn traceback(&self, instance: &Instance) -> Vec<bool> {
        let mut taken = vec![false; instance.len()];
        let mut room = self.capacity;
        for (column, item) in (1..self.columns).zip(instance.items()).rev() {
            if self.cell(room, column) != self.cell(room, column - 1) {
                taken[column - 1] = true;
                // Only items that fit can change a cell.
                room -= usize::try_from(item.weight()).unwrap_or(room);
            }
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_core::test_support::{brute_force_optimum, classic_instance, instance};
    use rstest::rstest;

    #[rstest]
    fn classic_instance_takes_the_two_heavier_items() {
        let solution = DynamicProgrammingSolver::new()
            .solve(&classic_instance())
            .expect("solve should succeed");
        assert_eq!(solution.value, 220);
        assert_eq!(solution.taken_bits(), vec![0, 1, 1]);
        assert_eq!(solution.optimality, Optimality::Proven);
        assert_eq!(solution.diagnostics.nodes_expanded, 51 * 4);
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
        let solution = DynamicProgrammingSolver::new()
            .solve(&instance(pairs, capacity))
            .expect("solve should succeed");
        assert_eq!(solution.value, expected_value);
        assert_eq!(solution.taken, expected_taken);
    }

    #[rstest]
    fn matches_brute_force_on_a_mixed_instance() {
        let source = instance(&[(12, 4), (7, 3), (9, 5), (4, 2), (10, 7), (3, 1)], 13);
        let solution = DynamicProgrammingSolver::new()
            .solve(&source)
            .expect("solve should succeed");
        let best = brute_force_optimum(&source).expect("small instance");
        assert_eq!(solution.value, best.value);
    }

    #[rstest]
    #[case::unaddressable(u64::MAX, u64::MAX)]
    #[case::overcommitted(100_000_000_000, 100_000_000_001)]
    fn oversized_table_is_rejected_before_allocating(#[case] capacity: u64, #[case] rows: u64) {
        let source = instance(&[(1, 1), (2, 2)], capacity);
        let err = DynamicProgrammingSolver::new()
            .solve(&source)
            .expect_err("table exceeds the cell ceiling");
        assert_eq!(err, SolveError::TableTooLarge { rows, columns: 3 });
    }

    #[rstest]
    fn custom_cell_ceiling_is_honoured() {
        let err = DynamicProgrammingSolver::with_max_cells(203)
            .solve(&classic_instance())
            .expect_err("51 rows of 4 cells exceed 203");
        assert_eq!(
            err,
            SolveError::TableTooLarge {
                rows: 51,
                columns: 4,
            }
        );
        let solution = DynamicProgrammingSolver::with_max_cells(204)
            .solve(&classic_instance())
            .expect("exactly at the ceiling");
        assert_eq!(solution.value, 220);
    }
}
