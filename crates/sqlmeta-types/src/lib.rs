//! SQL type model
//!
//! This crate defines the type vocabulary the operand strategies and metadata
//! queries are written against:
//! - Type names and the closed [`TypeFamily`] taxonomy
//! - [`RelDataType`], the read-only handle for a concrete SQL type
//! - Character collations and coercibility
//! - The [`TypeFactory`] seam together with a default [`SqlTypeFactory`]

pub mod coercion;
pub mod collation;
pub mod config;
pub mod data_type;
pub mod error;
pub mod factory;
pub mod family;
pub mod type_name;

pub use collation::{Coercibility, SqlCollation};
pub use config::TypeSystemConfig;
pub use data_type::{Comparability, RelDataType, RelDataTypeField};
pub use error::{TypeError, TypeResult};
pub use factory::{SqlTypeFactory, TypeFactory};
pub use family::TypeFamily;
pub use type_name::SqlTypeName;
