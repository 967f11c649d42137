//! Metadata providers
//!
//! A provider answers "which handler computes metric M for this node?". Handlers
//! receive the [`RelMetadataQuery`] so they can recurse into child nodes through
//! the full provider chain.

use crate::error::MetadataResult;
use crate::metadata::RelMetadataQuery;
use crate::node::RelNode;
use crate::rex::RexNode;
use sqlmeta_dispatch::Dispatcher;
use std::fmt;
use std::sync::Arc;

/// Handler name for row-count metadata
pub const ROW_COUNT: &str = "row_count";
/// Handler name for selectivity metadata
pub const SELECTIVITY: &str = "selectivity";

/// Computes the row count of a node
pub type RowCountHandler =
    Arc<dyn Fn(&RelMetadataQuery, &dyn RelNode) -> MetadataResult<Option<f64>> + Send + Sync>;

/// Computes the selectivity of a predicate over a node's output
pub type SelectivityHandler = Arc<
    dyn Fn(&RelMetadataQuery, &dyn RelNode, Option<&RexNode>) -> MetadataResult<Option<f64>>
        + Send
        + Sync,
>;

/// A handler for one metric
#[derive(Clone)]
pub enum MetadataHandler {
    RowCount(RowCountHandler),
    Selectivity(SelectivityHandler),
}

impl fmt::Debug for MetadataHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCount(_) => f.write_str("RowCount(<fn>)"),
            Self::Selectivity(_) => f.write_str("Selectivity(<fn>)"),
        }
    }
}

/// Supplies metadata handlers for relational node kinds.
///
/// `Ok(None)` means the provider does not compute the metric at all. A provider
/// that computes it but has no handler for the node's kind reports the dispatch
/// not-found error.
pub trait RelMetadataProvider: Send + Sync + fmt::Debug {
    /// Name used in log messages
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn row_count_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<RowCountHandler>>;

    fn selectivity_handler(
        &self,
        dispatcher: &Dispatcher,
        rel: &dyn RelNode,
    ) -> MetadataResult<Option<SelectivityHandler>>;
}

/// Shared handle to a provider
pub type MetadataProviderRef = Arc<dyn RelMetadataProvider>;
