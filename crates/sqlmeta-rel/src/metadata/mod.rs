//! Metadata query framework
//!
//! Derived statistics over relational expressions:
//! - [`RelMetadataQuery`] is the entry point (`get_row_count`, `get_selectivity`)
//! - [`RelMetadataProvider`] supplies a handler per metric and node kind
//! - [`ReflectiveRelMetadataProvider`] builds providers from per-kind closures
//!   resolved by the dispatch engine
//! - [`ChainedMetadataProvider`] stacks providers, falling through on a miss
//! - [`RelMdRowCount`] and [`RelMdSelectivity`] are the standard providers
//!
//! Unknown statistics are `None` and stay `None` through every combination.

mod chained;
mod provider;
mod query;
mod reflective;
mod row_count;
mod selectivity;
pub mod util;

pub use chained::ChainedMetadataProvider;
pub use provider::{
    MetadataHandler, MetadataProviderRef, RelMetadataProvider, RowCountHandler,
    SelectivityHandler, ROW_COUNT, SELECTIVITY,
};
pub use query::RelMetadataQuery;
pub use reflective::{ReflectiveProviderBuilder, ReflectiveRelMetadataProvider};
pub use row_count::RelMdRowCount;
pub use selectivity::RelMdSelectivity;
