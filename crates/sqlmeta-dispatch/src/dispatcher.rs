//! Most-specific handler resolution
//!
//! Given a handler set, a handler name, a root type and an argument, pick the
//! handler whose declared parameter type is the closest ancestor-or-self of the
//! argument's runtime type. Handlers declared on strict ancestors of the root are
//! never eligible, while marker types outside the root chain are. Successful
//! resolutions are cached per `(shape, name, root, argument type)`.

use crate::{
    DispatchError, DispatchResult, HandlerRef, HandlerSet, MethodTable, ShapeId, TypeHierarchy,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

static GLOBAL_DISPATCHER: Lazy<Arc<Dispatcher>> =
    Lazy::new(|| Arc::new(Dispatcher::new(TypeHierarchy::global())));

type CacheKey = (ShapeId, usize, TypeId, TypeId);

/// Resolves handlers against a [`TypeHierarchy`], memoizing successes
#[derive(Debug)]
pub struct Dispatcher {
    hierarchy: Arc<TypeHierarchy>,
    cache: RwLock<HashMap<CacheKey, HandlerRef>>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    param: TypeId,
    distance: usize,
}

impl Dispatcher {
    pub fn new(hierarchy: Arc<TypeHierarchy>) -> Self {
        Self {
            hierarchy,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The dispatcher bound to [`TypeHierarchy::global`]
    pub fn global() -> Arc<Dispatcher> {
        Arc::clone(&GLOBAL_DISPATCHER)
    }

    pub fn hierarchy(&self) -> &Arc<TypeHierarchy> {
        &self.hierarchy
    }

    /// Number of memoized resolutions
    pub fn cached_resolutions(&self) -> usize {
        self.cache.read().len()
    }

    /// Resolve `handler_name` for the runtime type of `argument`
    pub fn resolve(
        &self,
        set: &dyn HandlerSet,
        handler_name: &str,
        root: TypeId,
        argument: &dyn Any,
    ) -> DispatchResult<HandlerRef> {
        self.lookup(set, handler_name, root, Any::type_id(argument))
    }

    /// Resolve and fetch the handler from a [`MethodTable`]
    pub fn dispatch<'t, F>(
        &self,
        table: &'t MethodTable<F>,
        handler_name: &str,
        root: TypeId,
        argument: &dyn Any,
    ) -> DispatchResult<&'t F> {
        let handler = self.resolve(table, handler_name, root, argument)?;
        table.get(&handler).ok_or_else(|| self.not_found(handler_name, Any::type_id(argument), root))
    }

    /// Resolve `handler_name` for an argument of type `argument`
    pub fn lookup(
        &self,
        set: &dyn HandlerSet,
        handler_name: &str,
        root: TypeId,
        argument: TypeId,
    ) -> DispatchResult<HandlerRef> {
        let shape = set.shape();
        let Some(method) = shape.method_index(handler_name) else {
            return Err(self.not_found(handler_name, argument, root));
        };

        let key = (shape.id(), method, root, argument);
        if let Some(handler) = self.cache.read().get(&key) {
            log::trace!("dispatch cache hit for '{}'", handler_name);
            return Ok(*handler);
        }

        let resolved = self.compute(set, handler_name, method, root, argument)?;
        log::debug!(
            "resolved '{}' for {} to handler on {}",
            handler_name,
            self.hierarchy.name_of(argument),
            self.hierarchy.name_of(resolved.param)
        );
        // Racing writers compute the same answer.
        self.cache.write().insert(key, resolved);
        Ok(resolved)
    }

    fn compute(
        &self,
        set: &dyn HandlerSet,
        handler_name: &str,
        method: usize,
        root: TypeId,
        argument: TypeId,
    ) -> DispatchResult<HandlerRef> {
        log::trace!(
            "resolving '{}' for {}",
            handler_name,
            self.hierarchy.name_of(argument)
        );

        if !self.hierarchy.contains(argument) || !self.hierarchy.contains(root) {
            return Err(self.not_found(handler_name, argument, root));
        }

        let ancestors = self.hierarchy.ancestors(argument)?;
        if !ancestors.contains_key(&root) {
            return Err(self.not_found(handler_name, argument, root));
        }
        let above_root = self.hierarchy.ancestors(root)?;

        let candidates: Vec<Candidate> = set
            .shape()
            .signatures(handler_name)
            .iter()
            .enumerate()
            .filter_map(|(index, param)| {
                let distance = *ancestors.get(param)?;
                let excluded = above_root.get(param).is_some_and(|d| *d > 0);
                (!excluded).then_some(Candidate {
                    index,
                    param: *param,
                    distance,
                })
            })
            .collect();

        let Some(best) = candidates.iter().map(|c| c.distance).min() else {
            return Err(self.not_found(handler_name, argument, root));
        };

        let tied: Vec<Candidate> = candidates
            .into_iter()
            .filter(|c| c.distance == best)
            .collect();

        // Drop a tied candidate when another tied candidate is a subtype of it.
        let specific: Vec<Candidate> = tied
            .iter()
            .filter(|c| {
                !tied
                    .iter()
                    .any(|other| other.param != c.param && self.hierarchy.is_subtype(other.param, c.param))
            })
            .copied()
            .collect();

        match specific.as_slice() {
            [only] => Ok(HandlerRef {
                shape: set.shape().id(),
                method,
                index: only.index,
                param: only.param,
            }),
            _ => {
                let candidates: Vec<String> = specific
                    .iter()
                    .map(|c| self.hierarchy.name_of(c.param))
                    .collect();
                log::warn!(
                    "ambiguous '{}' for {}: {}",
                    handler_name,
                    self.hierarchy.name_of(argument),
                    candidates.join(", ")
                );
                Err(DispatchError::Ambiguous {
                    handler_name: handler_name.to_string(),
                    argument: self.hierarchy.name_of(argument),
                    candidates,
                })
            }
        }
    }

    fn not_found(&self, handler_name: &str, argument: TypeId, root: TypeId) -> DispatchError {
        DispatchError::NotFound {
            handler_name: handler_name.to_string(),
            argument: self.hierarchy.name_of(argument),
            root: self.hierarchy.name_of(root),
        }
    }
}
