//! Relational expressions and their metadata
//!
//! - [`RelNode`] and the standard node kinds, with an open kind hierarchy
//! - [`RexNode`] predicates over a node's output row
//! - The collation model: [`RelCollation`] and [`RelFieldCollation`]
//! - Null-propagating [`estimate`] arithmetic
//! - The [`metadata`] query framework for row counts and selectivities
//!
//! # Example
//!
//! ```ignore
//! use sqlmeta_rel::{Filter, RelMetadataQuery, RexNode, TableScan};
//!
//! let emp: RelNodeRef = Arc::new(TableScan::new("EMP", row_type, 100.0));
//! let filter = Filter::new(emp, RexNode::is_not_null(RexNode::input_ref(0)));
//!
//! let mq = RelMetadataQuery::standard()?;
//! assert_eq!(mq.get_row_count(&filter)?, Some(90.0));
//! ```

pub mod collation;
pub mod error;
pub mod estimate;
pub mod metadata;
pub mod node;
pub mod rex;

pub use collation::{Direction, RelCollation, RelFieldCollation};
pub use error::{CollationError, CollationResult, MetadataError, MetadataResult};
pub use metadata::{
    ChainedMetadataProvider, RelMdRowCount, RelMdSelectivity, RelMetadataProvider,
    RelMetadataQuery, ReflectiveRelMetadataProvider,
};
pub use node::{
    register_standard_kinds, Filter, Join, Project, RelNode, RelNodeRef, SemiJoin, Sort,
    TableScan, Union,
};
pub use rex::{RexLiteral, RexNode, RexOp};
