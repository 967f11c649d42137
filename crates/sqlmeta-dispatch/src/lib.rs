//! Runtime type-based dispatch
//!
//! Selects the most specific handler for an argument's dynamic type without any
//! runtime introspection:
//! - [`TypeHierarchy`] records, once per type, which types it directly extends
//! - A [`HandlerSet`] exposes handler signatures grouped by a shared name, each
//!   keyed by the [`TypeId`](std::any::TypeId) of its declared parameter type
//! - [`Dispatcher::resolve`] picks the candidate closest to the argument's dynamic
//!   type, reports ties as ambiguities and caches every resolution
//!
//! ```ignore
//! let hierarchy = TypeHierarchy::new();
//! hierarchy.declare::<dyn Number>("Number", &[])?;
//! hierarchy.declare::<Int>("Int", &[TypeId::of::<dyn Number>()])?;
//!
//! let negater = MethodTable::builder()
//!     .handler("negate", TypeId::of::<dyn Number>(), careless as NegateFn)
//!     .handler("negate", TypeId::of::<Int>(), careful as NegateFn)
//!     .build()?;
//!
//! let dispatcher = Dispatcher::new(Arc::new(hierarchy));
//! let handler = dispatcher.lookup(&negater, "negate", TypeId::of::<dyn Number>(), TypeId::of::<Int>())?;
//! ```

mod dispatcher;
mod error;
mod handler;
mod hierarchy;

pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use handler::{HandlerRef, HandlerSet, HandlerShape, MethodTable, MethodTableBuilder, ShapeId};
pub use hierarchy::{TypeHierarchy, TypeInfo};
