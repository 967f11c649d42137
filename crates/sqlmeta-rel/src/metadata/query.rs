//! Metadata query entry point

use crate::error::{MetadataError, MetadataResult};
use crate::metadata::chained::ChainedMetadataProvider;
use crate::metadata::provider::{MetadataProviderRef, ROW_COUNT, SELECTIVITY};
use crate::metadata::row_count::RelMdRowCount;
use crate::metadata::selectivity::RelMdSelectivity;
use crate::node::{register_standard_kinds, RelNode};
use crate::rex::RexNode;
use log::trace;
use sqlmeta_dispatch::Dispatcher;
use std::fmt;
use std::sync::Arc;

/// Answers metadata questions about relational expressions.
///
/// Every question is routed to the provider's handler for the node's kind, and
/// handlers ask about child nodes through the same query.
#[derive(Clone)]
pub struct RelMetadataQuery {
    provider: MetadataProviderRef,
    dispatcher: Arc<Dispatcher>,
}

impl RelMetadataQuery {
    /// A query resolving against the process-wide node-kind hierarchy
    pub fn new(provider: MetadataProviderRef) -> MetadataResult<Self> {
        Self::with_dispatcher(provider, Dispatcher::global())
    }

    /// A query resolving against `dispatcher`'s hierarchy, into which the standard
    /// node kinds are declared
    pub fn with_dispatcher(
        provider: MetadataProviderRef,
        dispatcher: Arc<Dispatcher>,
    ) -> MetadataResult<Self> {
        register_standard_kinds(dispatcher.hierarchy())?;
        Ok(Self {
            provider,
            dispatcher,
        })
    }

    /// The default row-count and selectivity providers, chained
    pub fn standard_provider() -> MetadataResult<ChainedMetadataProvider> {
        Ok(ChainedMetadataProvider::new(vec![
            Arc::new(RelMdRowCount::provider()?) as MetadataProviderRef,
            Arc::new(RelMdSelectivity::provider()?) as MetadataProviderRef,
        ]))
    }

    /// A query over [`Self::standard_provider`]
    pub fn standard() -> MetadataResult<Self> {
        Self::new(Arc::new(Self::standard_provider()?))
    }

    pub fn provider(&self) -> &MetadataProviderRef {
        &self.provider
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Estimated number of rows `rel` produces, `None` when unknown
    pub fn get_row_count(&self, rel: &dyn RelNode) -> MetadataResult<Option<f64>> {
        trace!("row count of {}", rel.kind_name());
        let handler = self
            .provider
            .row_count_handler(&self.dispatcher, rel)?
            .ok_or_else(|| MetadataError::NoProvider(ROW_COUNT.to_string()))?;
        handler(self, rel)
    }

    /// Estimated fraction of `rel`'s rows satisfying `predicate`, `None` when
    /// unknown. No predicate selects every row.
    pub fn get_selectivity(
        &self,
        rel: &dyn RelNode,
        predicate: Option<&RexNode>,
    ) -> MetadataResult<Option<f64>> {
        trace!(
            "selectivity of {} under {}",
            rel.kind_name(),
            predicate.map_or_else(|| "TRUE".to_string(), ToString::to_string)
        );
        let handler = self
            .provider
            .selectivity_handler(&self.dispatcher, rel)?
            .ok_or_else(|| MetadataError::NoProvider(SELECTIVITY.to_string()))?;
        handler(self, rel, predicate)
    }
}

impl fmt::Debug for RelMetadataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelMetadataQuery")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}
