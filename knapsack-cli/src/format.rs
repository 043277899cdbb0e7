//! Rendering solutions for output.

use clap::ValueEnum;
use knapsack_core::Solution;
use serde::{Deserialize, Serialize};

/// How the `solve` command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `<value> <flag>` followed by the 0/1 selection line.
    #[default]
    Text,
    /// The full solution, diagnostics included, as pretty-printed JSON.
    Json,
}

/// Render a solution in the two-line text format.
///
/// The first line is the value and an optimality flag: `1` when the solver
/// proved the value optimal, `0` for heuristic results. The second line lists
/// one `0`/`1` per item in input order.
///
/// # Examples
/// ```
/// use knapsack_cli::format_solution;
/// use knapsack_solver::solve;
///
/// # fn main() -> Result<(), knapsack_core::SolveError> {
/// let solution = solve([(60, 10), (100, 20), (120, 30)], 50)?;
/// assert_eq!(format_solution(&solution), "220 1\n0 1 1");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn format_solution(solution: &Solution) -> String {
    let flag = u8::from(solution.optimality.is_proven());
    let bits: Vec<String> = solution
        .taken_bits()
        .iter()
        .map(ToString::to_string)
        .collect();
    format!("{} {flag}\n{}", solution.value, bits.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use knapsack_core::{Algorithm, Diagnostics, Optimality};
    use rstest::rstest;
    use std::time::Duration;

    fn solution(value: u64, taken: Vec<bool>, optimality: Optimality) -> Solution {
        Solution {
            value,
            taken,
            optimality,
            diagnostics: Diagnostics {
                algorithm: Algorithm::DepthFirst,
                nodes_expanded: 0,
                solve_time: Duration::ZERO,
            },
        }
    }

    #[rstest]
    #[case(solution(220, vec![false, true, true], Optimality::Proven), "220 1\n0 1 1")]
    #[case(solution(160, vec![true, true, false], Optimality::Heuristic), "160 0\n1 1 0")]
    #[case(solution(0, vec![], Optimality::Proven), "0 1\n")]
    fn text_output_has_value_flag_and_bits(#[case] solution: Solution, #[case] expected: &str) {
        assert_eq!(format_solution(&solution), expected);
    }
}
