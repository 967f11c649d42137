//! Selectivity estimates for the standard node kinds

use crate::error::MetadataResult;
use crate::metadata::reflective::ReflectiveRelMetadataProvider;
use crate::metadata::util::{
    guess_selectivity, is_always_true, minus_preds, semi_join_selectivity_predicate,
    union_preds,
};
use crate::metadata::RelMetadataQuery;
use crate::node::{Filter, Project, RelNode, SemiJoin, Sort, Union};
use crate::rex::RexNode;
use sqlmeta_dispatch::DispatchResult;
use std::any::TypeId;

/// Default selectivity handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct RelMdSelectivity;

impl RelMdSelectivity {
    pub fn provider() -> DispatchResult<ReflectiveRelMetadataProvider> {
        ReflectiveRelMetadataProvider::builder("RelMdSelectivity")
            .selectivity::<Union, _>(Self::union)
            .selectivity::<Filter, _>(Self::filter)
            .selectivity::<Project, _>(Self::project)
            .selectivity::<Sort, _>(|mq, rel, predicate| mq.get_selectivity(rel.input(), predicate))
            .selectivity::<SemiJoin, _>(Self::semi_join)
            .selectivity_for_kind(TypeId::of::<dyn RelNode>(), |_, _, predicate| {
                Ok(Some(guess_selectivity(predicate)))
            })
            .build()
    }

    /// Input selectivities weighted by input row counts
    fn union(
        mq: &RelMetadataQuery,
        rel: &Union,
        predicate: Option<&RexNode>,
    ) -> MetadataResult<Option<f64>> {
        if predicate.is_none_or(is_always_true) {
            return Ok(Some(1.0));
        }

        let mut rows = 0.0;
        let mut selected = 0.0;
        for input in rel.inputs() {
            let input = input.as_ref();
            let Some(input_rows) = mq.get_row_count(input)? else {
                return Ok(None);
            };
            let Some(selectivity) = mq.get_selectivity(input, predicate)? else {
                return Ok(None);
            };
            rows += input_rows;
            selected += input_rows * selectivity;
        }
        Ok(Some(selected / rows.max(1.0)))
    }

    /// Conjuncts the filter already applied do not filter again
    fn filter(
        mq: &RelMetadataQuery,
        rel: &Filter,
        predicate: Option<&RexNode>,
    ) -> MetadataResult<Option<f64>> {
        match predicate {
            Some(predicate) => {
                let remaining = minus_preds(predicate, rel.condition());
                mq.get_selectivity(rel.input(), remaining.as_ref())
            }
            None => mq.get_selectivity(rel.input(), Some(rel.condition())),
        }
    }

    /// Conjuncts over plain field references are pushed to the input with the
    /// fields renumbered; the rest are guessed here.
    fn project(
        mq: &RelMetadataQuery,
        rel: &Project,
        predicate: Option<&RexNode>,
    ) -> MetadataResult<Option<f64>> {
        let Some(predicate) = predicate else {
            return mq.get_selectivity(rel.input(), None);
        };

        let mut pushable = Vec::new();
        let mut not_pushable = Vec::new();
        for conjunct in predicate.conjunctions() {
            match push_past_project(conjunct, rel.exprs()) {
                Some(pushed) => pushable.push(pushed),
                None => not_pushable.push(conjunct.clone()),
            }
        }

        let Some(selectivity) = mq.get_selectivity(rel.input(), RexNode::and(pushable).as_ref())?
        else {
            return Ok(None);
        };
        Ok(Some(
            selectivity * guess_selectivity(RexNode::and(not_pushable).as_ref()),
        ))
    }

    /// The semi-join's filtering effect on the left input, combined with `predicate`
    fn semi_join(
        mq: &RelMetadataQuery,
        rel: &SemiJoin,
        predicate: Option<&RexNode>,
    ) -> MetadataResult<Option<f64>> {
        let semi_join_predicate = semi_join_selectivity_predicate(rel);
        let combined = union_preds(Some(&semi_join_predicate), predicate);
        mq.get_selectivity(rel.left(), combined.as_ref())
    }
}

/// Rewrite `expr` in terms of the project's input, if every field it references is
/// a plain reference to an input field
fn push_past_project(expr: &RexNode, exprs: &[RexNode]) -> Option<RexNode> {
    match expr {
        RexNode::InputRef(index) => match exprs.get(*index)? {
            RexNode::InputRef(source) => Some(RexNode::InputRef(*source)),
            _ => None,
        },
        RexNode::Literal(_) => Some(expr.clone()),
        RexNode::Call { op, operands } => {
            let operands = operands
                .iter()
                .map(|operand| push_past_project(operand, exprs))
                .collect::<Option<Vec<_>>>()?;
            Some(RexNode::call(*op, operands))
        }
    }
}
