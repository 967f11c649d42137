//! Handler sets
//!
//! A handler set exposes a fixed [`HandlerShape`]: for every handler name, the list
//! of declared parameter types. The shape is frozen at construction and carries a
//! unique [`ShapeId`], which is what resolution caches are keyed on.

use crate::{DispatchError, DispatchResult};
use indexmap::IndexMap;
use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a frozen handler-set shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u64);

impl ShapeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handler signatures grouped by name
#[derive(Debug, Clone)]
pub struct HandlerShape {
    id: ShapeId,
    methods: IndexMap<String, Vec<TypeId>>,
}

impl HandlerShape {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Position of a handler name within the shape
    pub fn method_index(&self, name: &str) -> Option<usize> {
        self.methods.get_index_of(name)
    }

    /// Declared parameter types of the handlers sharing `name`
    pub fn signatures(&self, name: &str) -> &[TypeId] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

/// An object exposing a family of type-specific handlers
pub trait HandlerSet {
    fn shape(&self) -> &HandlerShape;
}

/// A resolved handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    /// Shape the handler belongs to
    pub shape: ShapeId,
    /// Index of the handler name within the shape
    pub method: usize,
    /// Index of the handler among those sharing its name
    pub index: usize,
    /// Declared parameter type of the handler
    pub param: TypeId,
}

/// A handler set storing one value (typically a closure) per handler
#[derive(Debug)]
pub struct MethodTable<F> {
    shape: HandlerShape,
    handlers: Vec<Vec<F>>,
}

impl<F> MethodTable<F> {
    pub fn builder() -> MethodTableBuilder<F> {
        MethodTableBuilder::default()
    }

    /// The handler a resolution points at, if it was resolved against this table
    pub fn get(&self, handler: &HandlerRef) -> Option<&F> {
        if handler.shape != self.shape.id {
            return None;
        }
        self.handlers.get(handler.method)?.get(handler.index)
    }

    pub fn len(&self) -> usize {
        self.handlers.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F> HandlerSet for MethodTable<F> {
    fn shape(&self) -> &HandlerShape {
        &self.shape
    }
}

/// Builder for [`MethodTable`]
#[derive(Debug)]
pub struct MethodTableBuilder<F> {
    methods: IndexMap<String, Vec<(TypeId, F)>>,
}

impl<F> Default for MethodTableBuilder<F> {
    fn default() -> Self {
        Self {
            methods: IndexMap::new(),
        }
    }
}

impl<F> MethodTableBuilder<F> {
    /// Add a handler named `name` whose declared parameter type is `param`
    pub fn handler(mut self, name: impl Into<String>, param: TypeId, handler: F) -> Self {
        self.methods
            .entry(name.into())
            .or_default()
            .push((param, handler));
        self
    }

    /// Freeze the table, rejecting two handlers with the same name and parameter type
    pub fn build(self) -> DispatchResult<MethodTable<F>> {
        let mut methods = IndexMap::with_capacity(self.methods.len());
        let mut handlers = Vec::with_capacity(self.methods.len());

        for (name, entries) in self.methods {
            let mut params: Vec<TypeId> = Vec::with_capacity(entries.len());
            let mut fns = Vec::with_capacity(entries.len());
            for (param, handler) in entries {
                if params.contains(&param) {
                    return Err(DispatchError::DuplicateHandler {
                        handler_name: name,
                        param: format!("{:?}", param),
                    });
                }
                params.push(param);
                fns.push(handler);
            }
            methods.insert(name, params);
            handlers.push(fns);
        }

        Ok(MethodTable {
            shape: HandlerShape {
                id: ShapeId::next(),
                methods,
            },
            handlers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_groups_by_name() {
        let table = MethodTable::builder()
            .handler("row_count", TypeId::of::<u8>(), 1)
            .handler("row_count", TypeId::of::<u16>(), 2)
            .handler("selectivity", TypeId::of::<u8>(), 3)
            .build()
            .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.shape().signatures("row_count").len(), 2);
        assert_eq!(table.shape().method_index("selectivity"), Some(1));
        assert!(table.shape().signatures("missing").is_empty());
    }

    #[test]
    fn test_duplicate_handler_rejected() {
        let result = MethodTable::builder()
            .handler("visit", TypeId::of::<u8>(), ())
            .handler("visit", TypeId::of::<u8>(), ())
            .build();
        assert!(matches!(result, Err(DispatchError::DuplicateHandler { .. })));
    }

    #[test]
    fn test_shapes_are_distinct() {
        let a = MethodTable::builder().handler("visit", TypeId::of::<u8>(), ()).build().unwrap();
        let b = MethodTable::builder().handler("visit", TypeId::of::<u8>(), ()).build().unwrap();
        assert_ne!(a.shape().id(), b.shape().id());

        let foreign = HandlerRef {
            shape: b.shape().id(),
            method: 0,
            index: 0,
            param: TypeId::of::<u8>(),
        };
        assert!(a.get(&foreign).is_none());
        assert!(b.get(&foreign).is_some());
    }
}
