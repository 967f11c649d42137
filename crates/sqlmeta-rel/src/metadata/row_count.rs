//! Row-count estimates for the standard node kinds

use crate::error::MetadataResult;
use crate::estimate;
use crate::metadata::reflective::ReflectiveRelMetadataProvider;
use crate::metadata::util::semi_join_selectivity_predicate;
use crate::metadata::RelMetadataQuery;
use crate::node::{Filter, Project, RelNode, SemiJoin, Sort, Union};
use sqlmeta_dispatch::DispatchResult;
use std::any::TypeId;

/// Default row-count handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct RelMdRowCount;

impl RelMdRowCount {
    pub fn provider() -> DispatchResult<ReflectiveRelMetadataProvider> {
        ReflectiveRelMetadataProvider::builder("RelMdRowCount")
            .row_count::<Union, _>(Self::union)
            .row_count::<Filter, _>(Self::filter)
            .row_count::<Project, _>(|mq, rel| mq.get_row_count(rel.input()))
            .row_count::<Sort, _>(|mq, rel| mq.get_row_count(rel.input()))
            .row_count::<SemiJoin, _>(Self::semi_join)
            // Any other kind reports its own estimate.
            .row_count_for_kind(TypeId::of::<dyn RelNode>(), |_, rel| {
                Ok(Some(rel.estimate_row_count()))
            })
            .build()
    }

    /// Sum of the inputs' row counts; unknown if any input's is
    fn union(mq: &RelMetadataQuery, rel: &Union) -> MetadataResult<Option<f64>> {
        let mut rows = 0.0;
        for input in rel.inputs() {
            let Some(partial) = mq.get_row_count(input.as_ref())? else {
                return Ok(None);
            };
            rows += partial;
        }
        Ok(Some(rows))
    }

    fn filter(mq: &RelMetadataQuery, rel: &Filter) -> MetadataResult<Option<f64>> {
        Ok(estimate::multiply(
            mq.get_selectivity(rel.input(), Some(rel.condition()))?,
            mq.get_row_count(rel.input())?,
        ))
    }

    fn semi_join(mq: &RelMetadataQuery, rel: &SemiJoin) -> MetadataResult<Option<f64>> {
        let predicate = semi_join_selectivity_predicate(rel);
        Ok(estimate::multiply(
            mq.get_selectivity(rel.left(), Some(&predicate))?,
            mq.get_row_count(rel.left())?,
        ))
    }
}
