//! Assembling and cross-checking solver results.

use std::time::Instant;

use knapsack_core::{Algorithm, Diagnostics, Instance, Optimality, Solution, SolveError};

/// Run metadata collected while solving.
pub(crate) struct RunSummary {
    pub(crate) algorithm: Algorithm,
    pub(crate) optimality: Optimality,
    pub(crate) nodes_expanded: u64,
    pub(crate) started_at: Instant,
}

/// Build a [`Solution`] from input-order flags, verifying that the packing is
/// feasible and worth exactly `claimed_value`.
pub(crate) fn assemble(
    instance: &Instance,
    taken: Vec<bool>,
    claimed_value: u64,
    summary: RunSummary,
) -> Result<Solution, SolveError> {
    let evaluation = instance
        .evaluate(&taken)
        .ok_or_else(|| SolveError::InternalFault {
            detail: format!(
                "{} produced {} flags for {} items",
                summary.algorithm,
                taken.len(),
                instance.len()
            ),
        })?;
    if evaluation.weight > instance.capacity() {
        return Err(SolveError::InternalFault {
            detail: format!(
                "{} packed weight {} into capacity {}",
                summary.algorithm,
                evaluation.weight,
                instance.capacity()
            ),
        });
    }
    if evaluation.value != claimed_value {
        return Err(SolveError::InternalFault {
            detail: format!(
                "{} traced value {} but reported {claimed_value}",
                summary.algorithm, evaluation.value
            ),
        });
    }
    let solve_time = summary.started_at.elapsed();
    log::debug!(
        "{} packed value {claimed_value} (weight {}/{}) after {} nodes in {solve_time:?}",
        summary.algorithm,
        evaluation.weight,
        instance.capacity(),
        summary.nodes_expanded
    );
    Ok(Solution {
        value: claimed_value,
        taken,
        optimality: summary.optimality,
        diagnostics: Diagnostics {
            algorithm: summary.algorithm,
            nodes_expanded: summary.nodes_expanded,
            solve_time,
        },
    })
}
