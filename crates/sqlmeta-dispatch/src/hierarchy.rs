//! Static type-hierarchy description
//!
//! Each participating type is declared once, naming the types it directly extends.
//! Parents must be declared before their children, so the hierarchy is always a DAG
//! and a declaration never changes the ancestry of an existing type. That is what
//! lets resolutions be cached forever.

use crate::{DispatchError, DispatchResult};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;
use std::any::TypeId;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

static GLOBAL_HIERARCHY: Lazy<Arc<TypeHierarchy>> = Lazy::new(|| Arc::new(TypeHierarchy::new()));

/// A declared type and its direct parents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub id: TypeId,
    pub name: String,
    pub parents: SmallVec<[TypeId; 2]>,
}

/// Append-only registry of types and their direct parents
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    types: RwLock<HashMap<TypeId, Arc<TypeInfo>>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide hierarchy plug-ins register their node kinds into
    pub fn global() -> Arc<TypeHierarchy> {
        Arc::clone(&GLOBAL_HIERARCHY)
    }

    /// Declare `T` with the given direct parents.
    ///
    /// `T` may be unsized, so trait objects such as `dyn RelNode` can act as roots
    /// and marker traits. Re-declaring a type with identical parents is a no-op and
    /// returns `false`.
    pub fn declare<T: ?Sized + 'static>(
        &self,
        name: impl Into<String>,
        parents: &[TypeId],
    ) -> DispatchResult<bool> {
        self.declare_id(TypeId::of::<T>(), name, parents)
    }

    /// Declare a type by id
    pub fn declare_id(
        &self,
        id: TypeId,
        name: impl Into<String>,
        parents: &[TypeId],
    ) -> DispatchResult<bool> {
        let name = name.into();
        let mut types = self.types.write();

        if let Some(existing) = types.get(&id) {
            if existing.parents.as_slice() == parents {
                return Ok(false);
            }
            return Err(DispatchError::DuplicateType { name });
        }

        if let Some(missing) = parents.iter().find(|parent| !types.contains_key(parent)) {
            return Err(DispatchError::UndeclaredType(format!(
                "{:?} (parent of {})",
                missing, name
            )));
        }

        log::debug!("declaring type {} with {} parent(s)", name, parents.len());
        types.insert(
            id,
            Arc::new(TypeInfo {
                id,
                name,
                parents: parents.iter().copied().collect(),
            }),
        );
        Ok(true)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.types.read().contains_key(&id)
    }

    pub fn info(&self, id: TypeId) -> Option<Arc<TypeInfo>> {
        self.types.read().get(&id).cloned()
    }

    /// Declared name of a type, or its debug id when undeclared
    pub fn name_of(&self, id: TypeId) -> String {
        self.info(id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| format!("{:?}", id))
    }

    /// Every ancestor of `id`, including itself at distance zero, mapped to its
    /// minimal number of parent steps. Entries are in breadth-first discovery order.
    pub fn ancestors(&self, id: TypeId) -> DispatchResult<IndexMap<TypeId, usize>> {
        let types = self.types.read();
        if !types.contains_key(&id) {
            return Err(DispatchError::UndeclaredType(format!("{:?}", id)));
        }

        let mut distances = IndexMap::new();
        let mut queue = VecDeque::from([(id, 0usize)]);
        while let Some((current, distance)) = queue.pop_front() {
            if distances.contains_key(&current) {
                continue;
            }
            distances.insert(current, distance);
            if let Some(info) = types.get(&current) {
                for parent in &info.parents {
                    queue.push_back((*parent, distance + 1));
                }
            }
        }
        Ok(distances)
    }

    /// Whether `sub` is `sup` or one of its descendants
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.ancestors(sub)
            .map(|ancestors| ancestors.contains_key(&sup))
            .unwrap_or(false)
    }
}
