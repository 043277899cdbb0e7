//! Property-based tests for the knapsack solvers.
//!
//! # Invariants tested
//!
//! - **Equivalence:** depth-first, best-first and dynamic programming agree on
//!   the optimal value.
//! - **Feasibility:** every returned selection fits the capacity.
//! - **Value consistency:** the reported value is the sum of the selected
//!   values.
//! - **Optimality:** no subset beats the exact solvers (brute force, n ≤ 12).
//! - **Bound admissibility:** the relaxation bound never falls below the best
//!   completion of any fixed decision prefix, the root included.
//! - **Exactness:** values beyond `f64` precision do not mislead pruning.
//! - **Heuristics:** greedy selections are feasible and never beat the optimum.


use knapsack_core::test_support::brute_force_optimum;
use knapsack_core::{Algorithm, Instance, Solution, Solver};
use knapsack_solver::{
    AutoSolver, Decision, DecisionFilter, DensityOrder, RelaxationBound, SearchLimits,
    relaxation_bound, solver_for,
};
use proptest::prelude::*;

use proptest_support::{
    correlated_instance_strategy, instance_strategy, large_value_instance_strategy,
};

const EXACT: [Algorithm; 3] = [
    Algorithm::DepthFirst,
    Algorithm::BestFirst,
    Algorithm::DynamicProgramming,
];

const HEURISTIC: [Algorithm; 2] = [Algorithm::GreedyInputOrder, Algorithm::GreedyDensity];

fn run(algorithm: Algorithm, instance: &Instance) -> Result<Solution, TestCaseError> {
    solver_for(algorithm, SearchLimits::unlimited())
        .solve(instance)
        .map_err(|err| TestCaseError::fail(format!("{algorithm} failed: {err}")))
}

fn assert_consistent(instance: &Instance, solution: &Solution) -> Result<(), TestCaseError> {
    let evaluation = instance.evaluate(&solution.taken);
    prop_assert!(evaluation.is_some(), "selection length mismatch");
    if let Some(evaluation) = evaluation {
        prop_assert!(
            evaluation.weight <= instance.capacity(),
            "weight {} exceeds capacity {}",
            evaluation.weight,
            instance.capacity()
        );
        prop_assert_eq!(evaluation.value, solution.value);
    }
    Ok(())
}

/// Best value over feasible completions of the density-order decisions in
/// `fixed`, or `None` when every completion overflows the capacity.
fn best_completion(instance: &Instance, order: &DensityOrder, fixed: &[bool]) -> Option<u64> {
    let n = order.len();
    (0_u32..(1_u32 << n))
        .filter_map(|mask| {
            let decisions: Vec<bool> = (0..n)
                .map(|position| mask & (1 << position) != 0)
                .collect();
            if decisions.iter().zip(fixed).any(|(lhs, rhs)| lhs != rhs) {
                return None;
            }
            instance
                .evaluate(&order.to_input_order(&decisions))
                .filter(|evaluation| evaluation.weight <= instance.capacity())
                .map(|evaluation| evaluation.value)
        })
        .max()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the exact solvers return identical optimal values.
    #[test]
    fn exact_solvers_agree(instance in instance_strategy(0, 18)) {
        let values = EXACT
            .iter()
            .map(|&algorithm| run(algorithm, &instance).map(|solution| solution.value))
            .collect::<Result<Vec<_>, _>>()?;
        prop_assert!(
            values.windows(2).all(|pair| pair.first() == pair.last()),
            "values differ: {values:?}"
        );
    }

    /// Property: every solver returns a feasible selection worth exactly the
    /// reported value, indexed in input order.
    #[test]
    fn selections_are_feasible_and_consistent(instance in instance_strategy(0, 18)) {
        for algorithm in EXACT.iter().chain(HEURISTIC.iter()) {
            let solution = run(*algorithm, &instance)?;
            prop_assert_eq!(solution.taken.len(), instance.len());
            assert_consistent(&instance, &solution)?;
        }
    }

    /// Property: no subset beats an exact solver, and heuristics never beat it.
    #[test]
    fn exact_solvers_match_brute_force(instance in instance_strategy(0, 12)) {
        let best = brute_force_optimum(&instance);
        prop_assert!(best.is_some(), "instance too large for brute force");
        let best_value = best.map_or(0, |evaluation| evaluation.value);
        for algorithm in EXACT {
            let solution = run(algorithm, &instance)?;
            prop_assert_eq!(solution.value, best_value, "{} missed the optimum", algorithm);
            prop_assert!(solution.optimality.is_proven());
        }
        for algorithm in HEURISTIC {
            let solution = run(algorithm, &instance)?;
            prop_assert!(solution.value <= best_value);
            prop_assert!(!solution.optimality.is_proven());
        }
    }

    /// Property: correlated instances, which defeat pruning, still agree.
    #[test]
    fn tree_searches_agree_on_correlated_instances(instance in correlated_instance_strategy(16)) {
        let depth_first = run(Algorithm::DepthFirst, &instance)?;
        let best_first = run(Algorithm::BestFirst, &instance)?;
        let table = run(Algorithm::DynamicProgramming, &instance)?;
        prop_assert_eq!(depth_first.value, table.value);
        prop_assert_eq!(best_first.value, table.value);
    }

    /// Property: the root relaxation bound is admissible.
    #[test]
    fn root_bound_never_underestimates(instance in instance_strategy(0, 18)) {
        let order = DensityOrder::new(&instance);
        let bound = relaxation_bound(
            &order,
            instance.capacity(),
            &DecisionFilter::open(order.len()),
            None,
        );
        let optimum = run(Algorithm::DynamicProgramming, &instance)?.value;
        prop_assert!(
            bound >= RelaxationBound::integral(optimum),
            "bound {} < optimum {}",
            bound,
            optimum
        );
    }

    /// Property: fixing any prefix of decisions keeps the bound admissible
    /// for every completion of that prefix.
    #[test]
    fn bound_is_admissible_under_any_fixed_prefix(
        instance in instance_strategy(1, 10),
        mask in any::<u32>(),
        depth in any::<prop::sample::Index>(),
    ) {
        let order = DensityOrder::new(&instance);
        let last = depth.index(order.len());
        let fixed: Vec<bool> = (0..=last).map(|position| mask & (1 << position) != 0).collect();
        let mut filter = DecisionFilter::open(order.len());
        for (position, &included) in fixed.iter().enumerate() {
            let decision = if included {
                Decision::Included
            } else {
                Decision::Excluded
            };
            filter.set(position, decision);
        }
        let bound = relaxation_bound(&order, instance.capacity(), &filter, Some(last));
        if let Some(best) = best_completion(&instance, &order, &fixed) {
            prop_assert!(
                bound >= RelaxationBound::integral(best),
                "bound {} < best completion {}",
                bound,
                best
            );
        }
    }

    /// Property: exact solvers stay optimal when values exceed `f64`
    /// precision.
    #[test]
    fn exact_solvers_handle_large_values(instance in large_value_instance_strategy(12)) {
        let best = brute_force_optimum(&instance).map_or(0, |evaluation| evaluation.value);
        for algorithm in EXACT {
            let solution = run(algorithm, &instance)?;
            prop_assert_eq!(solution.value, best, "{} missed the optimum", algorithm);
            assert_consistent(&instance, &solution)?;
        }
    }

    /// Property: the automatic dispatch is exact.
    #[test]
    fn auto_solver_is_exact(instance in instance_strategy(0, 18)) {
        let solution = AutoSolver::default()
            .solve(&instance)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let table = run(Algorithm::DynamicProgramming, &instance)?;
        prop_assert_eq!(solution.value, table.value);
        prop_assert!(solution.optimality.is_proven());
    }
}
