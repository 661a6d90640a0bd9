//! Hierarchical Synthesizer - Local weights to global leaf weights.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

use super::PriorityVector;
use crate::domain::foundation::ValidationError;

/// Default ε for "local weights sum to 1".
pub const DEFAULT_HIERARCHY_TOLERANCE: f64 = 1e-6;

/// A node of the criteria tree. The root has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaNode {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl CriteriaNode {
    /// Creates the root node.
    pub fn root(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
        }
    }

    /// Creates a node under `parent_id`.
    pub fn child(id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
        }
    }
}

/// A validated criteria tree.
///
/// Children are ordered as they appear in the node list, and that order is
/// the index order of the parent's local weight vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CriteriaNode>", into = "Vec<CriteriaNode>")]
pub struct CriteriaTree {
    nodes: Vec<CriteriaNode>,
    root: usize,
    children: Vec<Vec<usize>>,
    index: HashMap<String, usize>,
}

impl CriteriaTree {
    /// Builds a tree from a flat node list.
    ///
    /// # Errors
    /// - `MissingRoot` / `MultipleRoots` unless exactly one node has no parent
    /// - `DuplicateNode` for repeated ids
    /// - `UnknownParent` for dangling parent references
    /// - `UnreachableNode` for nodes caught in a parent cycle
    pub fn new(nodes: Vec<CriteriaNode>) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(ValidationError::DuplicateNode {
                    node_id: node.id.clone(),
                });
            }
        }

        let roots: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent_id.is_none())
            .map(|(i, _)| i)
            .collect();
        let root = match roots.as_slice() {
            [] => return Err(ValidationError::MissingRoot),
            [only] => *only,
            many => {
                return Err(ValidationError::MultipleRoots {
                    node_ids: many.iter().map(|&i| nodes[i].id.clone()).collect(),
                })
            }
        };

        let mut children = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            if let Some(parent_id) = &node.parent_id {
                let parent = *index.get(parent_id).ok_or_else(|| ValidationError::UnknownParent {
                    node_id: node.id.clone(),
                    parent_id: parent_id.clone(),
                })?;
                children[parent].push(i);
            }
        }

        let mut reached = vec![false; nodes.len()];
        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            reached[u] = true;
            queue.extend(children[u].iter().copied());
        }
        if let Some(i) = reached.iter().position(|r| !r) {
            return Err(ValidationError::UnreachableNode {
                node_id: nodes[i].id.clone(),
            });
        }

        Ok(Self {
            nodes,
            root,
            children,
            index,
        })
    }

    /// Id of the root node.
    pub fn root_id(&self) -> &str {
        &self.nodes[self.root].id
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a valid tree has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `node_id` exists.
    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    /// Ordered child ids of `node_id`.
    pub fn children_of(&self, node_id: &str) -> Result<Vec<&str>, ValidationError> {
        let i = self.position(node_id)?;
        Ok(self.children[i]
            .iter()
            .map(|&c| self.nodes[c].id.as_str())
            .collect())
    }

    /// Leaf ids in node-list order.
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| self.children[*i].is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect()
    }

    fn position(&self, node_id: &str) -> Result<usize, ValidationError> {
        self.index
            .get(node_id)
            .copied()
            .ok_or_else(|| ValidationError::UnknownNode {
                node_id: node_id.to_string(),
            })
    }
}

impl TryFrom<Vec<CriteriaNode>> for CriteriaTree {
    type Error = ValidationError;

    fn try_from(nodes: Vec<CriteriaNode>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<CriteriaTree> for Vec<CriteriaNode> {
    fn from(tree: CriteriaTree) -> Self {
        tree.nodes
    }
}

/// Global weight of one leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafWeight {
    pub node_id: String,
    pub global_weight: f64,
}

/// Global weights of every leaf, in tree node order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalWeights(Vec<LeafWeight>);

impl GlobalWeights {
    /// Wraps leaf weights in the given order.
    pub fn new(leaves: Vec<LeafWeight>) -> Self {
        Self(leaves)
    }

    /// Weight of `node_id`, if it is a leaf.
    pub fn get(&self, node_id: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|l| l.node_id == node_id)
            .map(|l| l.global_weight)
    }

    /// Iterates over leaves in order.
    pub fn iter(&self) -> impl Iterator<Item = &LeafWeight> {
        self.0.iter()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no leaves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all leaf weights.
    pub fn total(&self) -> f64 {
        self.0.iter().map(|l| l.global_weight).sum()
    }

    /// Leaf id to weight.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.0
            .iter()
            .map(|l| (l.node_id.clone(), l.global_weight))
            .collect()
    }
}

/// Final score of one alternative across all leaf criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeScore {
    pub alternative_id: String,
    pub score: f64,
}

/// Weighted-product composition over the criteria tree.
pub struct HierarchicalSynthesizer;

impl HierarchicalSynthesizer {
    /// Synthesizes global leaf weights with the default tolerance.
    pub fn synthesize(
        tree: &CriteriaTree,
        local_weights: &HashMap<String, PriorityVector>,
    ) -> Result<GlobalWeights, ValidationError> {
        Self::synthesize_with_tolerance(tree, local_weights, DEFAULT_HIERARCHY_TOLERANCE)
    }

    /// Synthesizes global leaf weights.
    ///
    /// # Algorithm
    /// The root has global weight 1; each child gets
    /// `parent.global × parent.local[child]`, walking breadth-first.
    ///
    /// # Errors
    /// - `UnknownNode` for local weights keyed by a node not in the tree
    /// - `MissingLocalWeights` for an inner node without a vector
    /// - `LocalWeightCount` when a vector does not match the child count
    /// - `InvalidValue` for negative or non-finite local weights
    /// - `LocalWeightSum` when a vector does not sum to 1 within `tolerance`;
    ///   vectors are never renormalized
    pub fn synthesize_with_tolerance(
        tree: &CriteriaTree,
        local_weights: &HashMap<String, PriorityVector>,
        tolerance: f64,
    ) -> Result<GlobalWeights, ValidationError> {
        let mut keys: Vec<&String> = local_weights.keys().collect();
        keys.sort();
        if let Some(unknown) = keys.into_iter().find(|k| !tree.contains(k)) {
            return Err(ValidationError::UnknownNode {
                node_id: unknown.clone(),
            });
        }

        let mut global = vec![0.0; tree.len()];
        global[tree.root] = 1.0;

        let mut queue = VecDeque::from([tree.root]);
        while let Some(u) = queue.pop_front() {
            let children = &tree.children[u];
            if children.is_empty() {
                continue;
            }

            let node_id = &tree.nodes[u].id;
            let local = local_weights
                .get(node_id)
                .ok_or_else(|| ValidationError::MissingLocalWeights {
                    node_id: node_id.clone(),
                })?;
            check_local_vector(node_id, local, children.len(), tolerance)?;

            for (&child, &w) in children.iter().zip(local.values()) {
                global[child] = global[u] * w;
                queue.push_back(child);
            }
        }

        Ok(GlobalWeights(
            tree.nodes
                .iter()
                .enumerate()
                .filter(|(i, _)| tree.children[*i].is_empty())
                .map(|(i, n)| LeafWeight {
                    node_id: n.id.clone(),
                    global_weight: global[i],
                })
                .collect(),
        ))
    }

    /// Combines leaf global weights with each leaf's alternative priorities.
    ///
    /// `score_a = Σ_leaf global(leaf) × local_leaf(a)`, where every leaf's
    /// vector is indexed by `alternative_ids`.
    pub fn score_alternatives(
        global: &GlobalWeights,
        alternative_ids: &[String],
        per_leaf: &HashMap<String, PriorityVector>,
        tolerance: f64,
    ) -> Result<Vec<AlternativeScore>, ValidationError> {
        if alternative_ids.is_empty() {
            return Err(ValidationError::empty_field("alternative_ids"));
        }

        let mut scores = vec![0.0; alternative_ids.len()];
        for leaf in global.iter() {
            let local = per_leaf
                .get(&leaf.node_id)
                .ok_or_else(|| ValidationError::MissingLocalWeights {
                    node_id: leaf.node_id.clone(),
                })?;
            check_local_vector(&leaf.node_id, local, alternative_ids.len(), tolerance)?;

            for (score, w) in scores.iter_mut().zip(local.values()) {
                *score += leaf.global_weight * w;
            }
        }

        Ok(alternative_ids
            .iter()
            .zip(scores)
            .map(|(id, score)| AlternativeScore {
                alternative_id: id.clone(),
                score,
            })
            .collect())
    }
}

fn check_local_vector(
    node_id: &str,
    local: &PriorityVector,
    expected: usize,
    tolerance: f64,
) -> Result<(), ValidationError> {
    if local.len() != expected {
        return Err(ValidationError::LocalWeightCount {
            node_id: node_id.to_string(),
            children: expected,
            weights: local.len(),
        });
    }
    if let Some((index, &value)) = local
        .values()
        .iter()
        .enumerate()
        .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
    {
        return Err(ValidationError::invalid_value(
            format!("local_weights.{}", node_id),
            index,
            value,
            "a finite non-negative weight",
        ));
    }
    let sum = local.sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ValidationError::LocalWeightSum {
            node_id: node_id.to_string(),
            sum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// goal -> {cost, quality}; quality -> {durability, finish}
    fn uneven_tree() -> CriteriaTree {
        CriteriaTree::new(vec![
            CriteriaNode::root("goal"),
            CriteriaNode::child("cost", "goal"),
            CriteriaNode::child("quality", "goal"),
            CriteriaNode::child("durability", "quality"),
            CriteriaNode::child("finish", "quality"),
        ])
        .unwrap()
    }

    fn weights(entries: &[(&str, &[f64])]) -> HashMap<String, PriorityVector> {
        entries
            .iter()
            .map(|(id, w)| (id.to_string(), PriorityVector::new(w.to_vec())))
            .collect()
    }

    // =========================================================================
    // Tree construction
    // =========================================================================

    #[test]
    fn tree_orders_children_by_node_list() {
        let tree = uneven_tree();
        assert_eq!(tree.root_id(), "goal");
        assert_eq!(tree.children_of("goal").unwrap(), vec!["cost", "quality"]);
        assert_eq!(tree.leaf_ids(), vec!["cost", "durability", "finish"]);
    }

    #[test]
    fn tree_rejects_missing_root() {
        let err = CriteriaTree::new(vec![CriteriaNode::child("a", "b"), CriteriaNode::child("b", "a")])
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingRoot);
        assert_eq!(CriteriaTree::new(vec![]).unwrap_err(), ValidationError::MissingRoot);
    }

    #[test]
    fn tree_rejects_multiple_roots() {
        let err = CriteriaTree::new(vec![CriteriaNode::root("a"), CriteriaNode::root("b")])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MultipleRoots {
                node_ids: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn tree_rejects_duplicates_and_dangling_parents() {
        assert!(matches!(
            CriteriaTree::new(vec![CriteriaNode::root("a"), CriteriaNode::child("a", "a")]),
            Err(ValidationError::DuplicateNode { .. })
        ));
        assert!(matches!(
            CriteriaTree::new(vec![CriteriaNode::root("a"), CriteriaNode::child("b", "zzz")]),
            Err(ValidationError::UnknownParent { .. })
        ));
    }

    #[test]
    fn tree_rejects_detached_cycle() {
        let err = CriteriaTree::new(vec![
            CriteriaNode::root("goal"),
            CriteriaNode::child("x", "y"),
            CriteriaNode::child("y", "x"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnreachableNode {
                node_id: "x".to_string()
            }
        );
    }

    #[test]
    fn tree_deserializes_from_node_list() {
        let json = r#"[{"id":"goal"},{"id":"a","parent_id":"goal"}]"#;
        let tree: CriteriaTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.leaf_ids(), vec!["a"]);
    }

    // =========================================================================
    // Synthesis
    // =========================================================================

    #[test]
    fn synthesize_multiplies_along_paths() {
        let global = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[("goal", &[0.4, 0.6]), ("quality", &[0.75, 0.25])]),
        )
        .unwrap();

        assert_eq!(global.len(), 3);
        assert!((global.get("cost").unwrap() - 0.4).abs() < 1e-12);
        assert!((global.get("durability").unwrap() - 0.45).abs() < 1e-12);
        assert!((global.get("finish").unwrap() - 0.15).abs() < 1e-12);
        assert!((global.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn synthesize_root_only_tree() {
        let tree = CriteriaTree::new(vec![CriteriaNode::root("goal")]).unwrap();
        let global = HierarchicalSynthesizer::synthesize(&tree, &HashMap::new()).unwrap();
        assert_eq!(global.get("goal"), Some(1.0));
    }

    #[test]
    fn synthesize_rejects_unnormalized_vector() {
        let err = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[("goal", &[0.4, 0.6]), ("quality", &[0.5, 0.4])]),
        )
        .unwrap_err();
        match err {
            ValidationError::LocalWeightSum { node_id, sum } => {
                assert_eq!(node_id, "quality");
                assert!((sum - 0.9).abs() < 1e-12);
            }
            other => panic!("Expected LocalWeightSum, got {:?}", other),
        }
    }

    #[test]
    fn synthesize_rejects_missing_vector() {
        let err =
            HierarchicalSynthesizer::synthesize(&uneven_tree(), &weights(&[("goal", &[0.4, 0.6])]))
                .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingLocalWeights {
                node_id: "quality".to_string()
            }
        );
    }

    #[test]
    fn synthesize_rejects_wrong_length() {
        let err = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[("goal", &[0.2, 0.3, 0.5]), ("quality", &[0.5, 0.5])]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::LocalWeightCount { children: 2, weights: 3, .. }));
    }

    #[test]
    fn synthesize_rejects_negative_weight() {
        let err = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[("goal", &[1.5, -0.5]), ("quality", &[0.5, 0.5])]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { index: 1, .. }));
    }

    #[test]
    fn synthesize_rejects_unknown_node_weights() {
        let err = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[
                ("goal", &[0.5, 0.5]),
                ("quality", &[0.5, 0.5]),
                ("ghost", &[1.0]),
            ]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownNode {
                node_id: "ghost".to_string()
            }
        );
    }

    // =========================================================================
    // Alternative scoring
    // =========================================================================

    #[test]
    fn score_alternatives_combines_leaves() {
        let global = HierarchicalSynthesizer::synthesize(
            &uneven_tree(),
            &weights(&[("goal", &[0.4, 0.6]), ("quality", &[0.75, 0.25])]),
        )
        .unwrap();
        let alternatives = vec!["x".to_string(), "y".to_string()];
        let per_leaf = weights(&[
            ("cost", &[1.0, 0.0]),
            ("durability", &[0.0, 1.0]),
            ("finish", &[0.5, 0.5]),
        ]);

        let scores = HierarchicalSynthesizer::score_alternatives(
            &global,
            &alternatives,
            &per_leaf,
            DEFAULT_HIERARCHY_TOLERANCE,
        )
        .unwrap();

        // x = 0.4 + 0.075, y = 0.45 + 0.075
        assert!((scores[0].score - 0.475).abs() < 1e-12);
        assert!((scores[1].score - 0.525).abs() < 1e-12);
        assert_eq!(scores[1].alternative_id, "y");
    }

    #[test]
    fn score_alternatives_requires_every_leaf() {
        let tree = CriteriaTree::new(vec![
            CriteriaNode::root("goal"),
            CriteriaNode::child("a", "goal"),
            CriteriaNode::child("b", "goal"),
        ])
        .unwrap();
        let global =
            HierarchicalSynthesizer::synthesize(&tree, &weights(&[("goal", &[0.5, 0.5])])).unwrap();

        let err = HierarchicalSynthesizer::score_alternatives(
            &global,
            &["x".to_string()],
            &weights(&[("a", &[1.0])]),
            DEFAULT_HIERARCHY_TOLERANCE,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingLocalWeights {
                node_id: "b".to_string()
            }
        );
    }
}
