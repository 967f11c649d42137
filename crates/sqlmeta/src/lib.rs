//! Analysis substrate for SQL query optimizers
//!
//! This crate bundles:
//! - A runtime type-based dispatch engine with ambiguity detection
//! - A metadata query framework for row-count and selectivity estimates
//! - A composable operand type-checking and type-inference strategy library
//! - The collation model for sort-order guarantees
//!
//! # Example
//!
//! ```no_run
//! use sqlmeta::rel::{Filter, MetadataError, RelNodeRef, TableScan};
//! use sqlmeta::{RelMetadataQuery, RexNode, SqlTypeFactory, SqlTypeName, TypeFactory};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), MetadataError> {
//!     let factory = SqlTypeFactory::default();
//!     let row_type = factory.create_struct_type(vec![(
//!         "EMPNO".into(),
//!         factory.create_sql_type(SqlTypeName::Integer),
//!     )]);
//!     let emp: RelNodeRef = Arc::new(TableScan::new("EMP", row_type, 100.0));
//!     let filter = Filter::new(emp, RexNode::artificial_selectivity(0.25));
//!
//!     let mq = RelMetadataQuery::standard()?;
//!     assert_eq!(mq.get_row_count(&filter)?, Some(25.0));
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from internal crates
pub use sqlmeta_diagnostics as diagnostics;
pub use sqlmeta_dispatch as dispatch;
pub use sqlmeta_rel as rel;
pub use sqlmeta_strategy as strategy;
pub use sqlmeta_types as types;

// Convenience re-exports
pub use sqlmeta_diagnostics::{Diagnostic, ErrorCode, ToDiagnostic};
pub use sqlmeta_dispatch::{DispatchError, Dispatcher, MethodTable, TypeHierarchy};
pub use sqlmeta_rel::{RelCollation, RelMetadataQuery, RelNode, RexNode};
pub use sqlmeta_strategy::{CallBinding, SqlOperator, StrategyError};
pub use sqlmeta_types::{RelDataType, SqlTypeFactory, SqlTypeName, TypeFactory, TypeFamily};
