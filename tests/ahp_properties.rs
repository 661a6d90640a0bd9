//! Property tests for the AHP calculators.
//!
//! Matrices are generated from random Saaty-scale judgments, so every input
//! is a valid reciprocal matrix; trees are random parent assignments.

use std::collections::HashMap;

use proptest::prelude::*;
use proptest::sample::{select, Index};

use ahp_core::domain::ahp::scale::is_saaty_value;
use ahp_core::domain::ahp::{
    advise_inconsistency, compute_ahp, compute_consistency, compute_weights,
    normalize_direct_input, synthesize_hierarchy, ComparisonMatrix, CriteriaNode, CriteriaTree,
    EvaluatorWeights, GlobalWeights, GroupDecisionAggregator, LeafWeight, PairwiseJudgment,
    PriorityVector, WeightingPolicy, SAATY_SCALE,
};
use ahp_core::domain::foundation::EvaluatorId;

// =============================================================================
// Strategies
// =============================================================================

fn saaty_matrix() -> impl Strategy<Value = ComparisonMatrix> {
    (1usize..=8).prop_flat_map(|n| {
        prop::collection::vec(select(SAATY_SCALE.to_vec()), n * (n - 1) / 2).prop_map(
            move |values| {
                let mut judgments = Vec::with_capacity(values.len());
                let mut next = values.into_iter();
                for row in 0..n {
                    for col in (row + 1)..n {
                        if let Some(value) = next.next() {
                            judgments.push(PairwiseJudgment::new(row, col, value));
                        }
                    }
                }
                ComparisonMatrix::from_judgments(n, &judgments).unwrap()
            },
        )
    })
}

fn positive_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1f64..10.0, 1..=10)
}

/// A random tree over nodes `n0..nk` with normalized local vectors.
fn weighted_tree() -> impl Strategy<Value = (CriteriaTree, HashMap<String, PriorityVector>)> {
    (1usize..12).prop_flat_map(|extra| {
        (
            prop::collection::vec(any::<Index>(), extra),
            prop::collection::vec(0.1f64..10.0, extra),
        )
            .prop_map(move |(parents, raw)| {
                let id = |i: usize| format!("n{}", i);
                let mut nodes = vec![CriteriaNode::root(id(0))];
                let mut children: Vec<Vec<usize>> = vec![Vec::new(); extra + 1];
                for k in 1..=extra {
                    let parent = parents[k - 1].index(k);
                    nodes.push(CriteriaNode::child(id(k), id(parent)));
                    children[parent].push(k);
                }

                let mut local = HashMap::new();
                for (node, kids) in children.iter().enumerate() {
                    if kids.is_empty() {
                        continue;
                    }
                    let total: f64 = kids.iter().map(|&k| raw[k - 1]).sum();
                    let vector = kids.iter().map(|&k| raw[k - 1] / total).collect();
                    local.insert(id(node), PriorityVector::new(vector));
                }

                (CriteriaTree::new(nodes).unwrap(), local)
            })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn weights_sum_to_one(matrix in saaty_matrix()) {
        let weights = compute_weights(&matrix).unwrap();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
        prop_assert!(weights.values().iter().all(|&w| w > 0.0));
    }

    #[test]
    fn matrix_from_weights_is_perfectly_consistent(raw in positive_weights()) {
        let matrix = ComparisonMatrix::from_weights(&raw).unwrap();
        let weights = compute_weights(&matrix).unwrap();
        let report = compute_consistency(&matrix, &weights).unwrap();

        prop_assert!(report.consistency_ratio.abs() < 1e-9);
        prop_assert!(report.is_consistent);

        let total: f64 = raw.iter().sum();
        for (w, r) in weights.values().iter().zip(&raw) {
            prop_assert!((w - r / total).abs() < 1e-9);
        }
    }

    #[test]
    fn advice_recommends_saaty_values(matrix in saaty_matrix(), top_k in 0usize..10) {
        let weights = compute_weights(&matrix).unwrap();
        let advice = advise_inconsistency(&matrix, &weights, top_k).unwrap();
        let n = matrix.size();

        prop_assert!(advice.len() <= top_k);
        prop_assert!(advice.len() <= n * (n - 1) / 2);
        for pair in advice.windows(2) {
            prop_assert!(pair[0].error_magnitude >= pair[1].error_magnitude);
        }
        for a in &advice {
            prop_assert!(a.row < a.col);
            prop_assert!(is_saaty_value(a.recommended_value));
        }
    }

    #[test]
    fn leaf_weights_sum_to_one((tree, local) in weighted_tree()) {
        let global = synthesize_hierarchy(&local, &tree).unwrap();
        let total: f64 = global.values().sum();

        prop_assert_eq!(global.len(), tree.leaf_ids().len());
        prop_assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn benefit_weight_never_drops_when_value_grows(
        values in prop::collection::vec(0.1f64..100.0, 1..8),
        pick in any::<Index>(),
        delta in 0.01f64..50.0,
    ) {
        let i = pick.index(values.len());
        let before = normalize_direct_input(&values, true).unwrap();
        let mut raised = values.clone();
        raised[i] += delta;
        let after = normalize_direct_input(&raised, true).unwrap();

        prop_assert!(after.values()[i] >= before.values()[i] - 1e-12);
    }

    #[test]
    fn cost_weight_never_grows_when_value_grows(
        values in prop::collection::vec(0.1f64..100.0, 1..8),
        pick in any::<Index>(),
        delta in 0.01f64..50.0,
    ) {
        let i = pick.index(values.len());
        let before = normalize_direct_input(&values, false).unwrap();
        let mut raised = values.clone();
        raised[i] += delta;
        let after = normalize_direct_input(&raised, false).unwrap();

        prop_assert!(after.values()[i] <= before.values()[i] + 1e-12);
    }

    #[test]
    fn single_evaluator_aggregation_is_identity(
        raw in positive_weights(),
        importance in 0.1f64..5.0,
    ) {
        let total: f64 = raw.iter().sum();
        let leaves: Vec<LeafWeight> = raw
            .iter()
            .enumerate()
            .map(|(i, r)| LeafWeight { node_id: format!("alt{}", i), global_weight: r / total })
            .collect();
        let evaluator = EvaluatorWeights {
            evaluator_id: EvaluatorId::new("solo").unwrap(),
            global_weights: GlobalWeights::new(leaves.clone()),
            evaluator_weight: importance,
        };

        let group =
            GroupDecisionAggregator::aggregate_weights(&[evaluator], WeightingPolicy::default())
                .unwrap();

        for leaf in &leaves {
            prop_assert_eq!(group.aggregated_weights[&leaf.node_id], leaf.global_weight);
        }
    }

    #[test]
    fn computation_is_deterministic(matrix in saaty_matrix()) {
        let first = compute_ahp(&matrix).unwrap();
        let second = compute_ahp(&matrix).unwrap();

        let bits = |v: &PriorityVector| v.values().iter().map(|w| w.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first.weights), bits(&second.weights));
        prop_assert_eq!(
            first.consistency.lambda_max.to_bits(),
            second.consistency.lambda_max.to_bits()
        );
    }
}
