//! Providers assembled from per-kind handler closures
//!
//! [`ReflectiveRelMetadataProvider`] keeps its handlers in a frozen
//! [`MethodTable`] keyed by node-kind [`TypeId`], and lets the [`Dispatcher`] pick
//! the most specific one for a node. A handler registered on `dyn RelNode` acts as
//! the provider's catch-all.

use crate::error::{MetadataError, MetadataResult};
use crate::metadata::RelMetadataQuery;
use crate::metadata::provider::{
    MetadataHandler, RelMetadataProvider, RowCountHandler, SelectivityHandler, ROW_COUNT,
    SELECTIVITY,
};
use crate::node::RelNode;
use crate::rex::RexNode;
use log::trace;
use sqlmeta_dispatch::{DispatchResult, Dispatcher, HandlerSet, MethodTable, MethodTableBuilder};
use std::any::{type_name, TypeId};
use std::sync::Arc;

/// A provider dispatching on the node's runtime kind
#[derive(Debug)]
pub struct ReflectiveRelMetadataProvider {
    name: String,
    table: MethodTable<MetadataHandler>,
}

impl ReflectiveRelMetadataProvider {
    pub fn builder(name: impl Into<String>) -> ReflectiveProviderBuilder {
        ReflectiveProviderBuilder {
            name: name.into(),
            table: MethodTable::builder(),
        }
    }

    fn handler(
        &self,
        dispatcher: &Dispatcher,
        handler_name: &str,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<&MetadataHandler>> {
        if self.table.shape().method_index(handler_name).is_none() {
            return Ok(None);
        }
        trace!("{} looking up '{}' for {}", self.name, handler_name, rel.kind_name());
        let handler = dispatcher.dispatch(
            &self.table,
            handler_name,
            TypeId::of::<dyn RelNode>(),
            rel.as_any(),
        )?;
        Ok(Some(handler))
    }
}

impl RelMetadataProvider for ReflectiveRelMetadataProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn row_count_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<RowCountHandler>> {
        Ok(match self.handler(dispatcher, ROW_COUNT, rel)? {
            Some(MetadataHandler::RowCount(handler)) => Some(Arc::clone(handler)),
            _ => None,
        })
    }

    fn selectivity_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<SelectivityHandler>> {
        Ok(match self.handler(dispatcher, SELECTIVITY, rel)? {
            Some(MetadataHandler::Selectivity(handler)) => Some(Arc::clone(handler)),
            _ => None,
        })
    }
}

/// Builder for [`ReflectiveRelMetadataProvider`].
///
/// The typed registrations (`row_count::<T>`) hand the handler a `&T`. A kind other
/// kinds are declared under must use the `*_for_kind` form, since its handler also
/// receives those subkinds.
pub struct ReflectiveProviderBuilder {
    name: String,
    table: MethodTableBuilder<MetadataHandler>,
}

impl ReflectiveProviderBuilder {
    pub fn row_count<T, F>(self, handler: F) -> Self
    where
        T: RelNode,
        F: Fn(&RelMetadataQuery, &T) -> MetadataResult<Option<f64>> + Send + Sync + 'static,
    {
        self.row_count_for_kind(TypeId::of::<T>(), move |mq, rel| {
            handler(mq, downcast::<T>(ROW_COUNT, rel)?)
        })
    }

    pub fn row_count_for_kind<F>(mut self, kind: TypeId, handler: F) -> Self
    where
        F: Fn(&RelMetadataQuery, &dyn RelNode) -> MetadataResult<Option<f64>>
            + Send
            + Sync
            + 'static,
    {
        self.table = self
            .table
            .handler(ROW_COUNT, kind, MetadataHandler::RowCount(Arc::new(handler)));
        self
    }

    pub fn selectivity<T, F>(self, handler: F) -> Self
    where
        T: RelNode,
        F: Fn(&RelMetadataQuery, &T, Option<&RexNode>) -> MetadataResult<Option<f64>>
            + Send
            + Sync
            + 'static,
    {
        self.selectivity_for_kind(TypeId::of::<T>(), move |mq, rel, predicate| {
            handler(mq, downcast::<T>(SELECTIVITY, rel)?, predicate)
        })
    }

    pub fn selectivity_for_kind<F>(mut self, kind: TypeId, handler: F) -> Self
    where
        F: Fn(&RelMetadataQuery, &dyn RelNode, Option<&RexNode>) -> MetadataResult<Option<f64>>
            + Send
            + Sync
            + 'static,
    {
        self.table = self.table.handler(
            SELECTIVITY,
            kind,
            MetadataHandler::Selectivity(Arc::new(handler)),
        );
        self
    }

    /// Freeze the handlers; two handlers for the same metric and kind are rejected
    pub fn build(self) -> DispatchResult<ReflectiveRelMetadataProvider> {
        Ok(ReflectiveRelMetadataProvider {
            name: self.name,
            table: self.table.build()?,
        })
    }
}

fn downcast<'a, T: RelNode>(handler_name: &str, rel: &'a dyn RelNode) -> MetadataResult<&'a T> {
    rel.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| MetadataError::Handler {
            handler_name: handler_name.to_string(),
            expected: type_name::<T>().to_string(),
            actual: rel.kind_name().to_string(),
        })
}
