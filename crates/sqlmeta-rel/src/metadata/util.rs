//! Selectivity guesses and predicate helpers shared by the providers

use crate::node::SemiJoin;
use crate::rex::{RexLiteral, RexNode, RexOp};

/// Fallback selectivities per conjunct
pub const IS_NOT_NULL_SELECTIVITY: f64 = 0.9;
pub const EQUALS_SELECTIVITY: f64 = 0.15;
pub const COMPARISON_SELECTIVITY: f64 = 0.5;
pub const DEFAULT_SELECTIVITY: f64 = 0.25;

/// Guess the selectivity of a predicate from its shape alone.
///
/// Conjuncts are treated as independent. Artificial-selectivity calls contribute the
/// selectivity they carry.
pub fn guess_selectivity(predicate: Option<&RexNode>) -> f64 {
    let Some(predicate) = predicate else {
        return 1.0;
    };
    if is_always_true(predicate) {
        return 1.0;
    }

    let mut selectivity = 1.0;
    let mut artificial = 1.0;
    for conjunct in predicate.conjunctions() {
        if let Some(value) = conjunct.artificial_selectivity_value() {
            artificial *= value;
            continue;
        }
        selectivity *= match conjunct.op() {
            Some(RexOp::IsNotNull) => IS_NOT_NULL_SELECTIVITY,
            Some(RexOp::Equals) => EQUALS_SELECTIVITY,
            Some(op) if op == RexOp::NotEquals || op.is_range_comparison() => {
                COMPARISON_SELECTIVITY
            }
            _ => DEFAULT_SELECTIVITY,
        };
    }
    selectivity * artificial
}

pub fn is_always_true(predicate: &RexNode) -> bool {
    matches!(predicate, RexNode::Literal(RexLiteral::Boolean(true)))
}

/// Conjuncts of `predicate` that `applied` does not already contain
pub fn minus_preds(predicate: &RexNode, applied: &RexNode) -> Option<RexNode> {
    let applied = applied.conjunctions();
    let remaining = predicate
        .conjunctions()
        .into_iter()
        .filter(|conjunct| !applied.contains(conjunct))
        .cloned()
        .collect();
    RexNode::and(remaining)
}

/// AND of two optional predicates
pub fn union_preds(left: Option<&RexNode>, right: Option<&RexNode>) -> Option<RexNode> {
    RexNode::and(left.into_iter().chain(right).cloned().collect())
}

/// The filtering effect of a semi-join on its left input, as an
/// artificial-selectivity predicate.
///
/// Without distinct-value statistics this is the guessed selectivity of the
/// equi-join on the key pairs.
pub fn semi_join_selectivity_predicate(rel: &SemiJoin) -> RexNode {
    let offset = rel.left().row_type().field_count();
    let equalities = rel
        .left_keys()
        .iter()
        .zip(rel.right_keys())
        .map(|(left, right)| {
            RexNode::equals(RexNode::input_ref(*left), RexNode::input_ref(offset + right))
        })
        .collect();
    let selectivity = guess_selectivity(RexNode::and(equalities).as_ref());
    RexNode::artificial_selectivity(selectivity)
}
