//! AHP Module - Priority weights and consistency for pairwise judgments.
//!
//! Stateless calculators that turn pairwise comparisons or direct scores into
//! normalized weights, score their consistency, and compose them across a
//! criteria hierarchy and a group of evaluators.
//!
//! # Components
//!
//! - `MatrixValidator` - Shape, positivity, diagonal and reciprocal checks
//! - `PriorityWeightEngine` - Geometric-mean priority vector
//! - `ConsistencyEvaluator` - λmax, CI and CR against the Random Index
//! - `InconsistencyAdvisor` - Worst judgments with Saaty-scale corrections
//! - `DirectInputNormalizer` - Benefit/cost scores to weights
//! - `HierarchicalSynthesizer` - Local vectors to global leaf weights
//! - `GroupDecisionAggregator` - Evaluator-weighted aggregation and ranking
//!
//! # Design Philosophy
//!
//! Every function is pure and reentrant. Nothing here performs I/O or holds
//! state between calls; persistence lives behind `ports::WeightsRepository`.

mod advisor;
mod consistency;
mod direct_input;
mod group;
mod hierarchy;
mod matrix;
mod operations;
mod priority;
pub mod scale;
mod validator;

// Re-export all public types
pub use advisor::{InconsistencyAdvice, InconsistencyAdvisor, DEFAULT_ADVICE_TOP_K};
pub use consistency::{ConsistencyEvaluator, ConsistencyReport};
pub use direct_input::{CriterionDirection, DirectInputNormalizer};
pub use group::{
    EvaluatorMatrix, EvaluatorResult, EvaluatorWeights, GroupDecisionAggregator, GroupResult,
    RankedAlternative, WeightingPolicy,
};
pub use hierarchy::{
    AlternativeScore, CriteriaNode, CriteriaTree, GlobalWeights, HierarchicalSynthesizer,
    LeafWeight, DEFAULT_HIERARCHY_TOLERANCE,
};
pub use matrix::{ComparisonMatrix, PairwiseJudgment};
pub use operations::{
    advise_inconsistency, aggregate_group, compute_ahp, compute_ahp_with_threshold,
    compute_consistency, compute_weights, normalize_direct_input, synthesize_hierarchy,
    synthesize_hierarchy_with_tolerance, validate_matrix, AhpResult,
};
pub use priority::{PriorityVector, PriorityWeightEngine};
pub use scale::{CONSISTENCY_THRESHOLD, RANDOM_INDEX, SAATY_SCALE};
pub use validator::{MatrixValidation, MatrixValidator, DEFAULT_MATRIX_TOLERANCE};
