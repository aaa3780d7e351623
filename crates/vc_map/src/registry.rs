use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use vc_reflect::hash::{FixedHashState, HashMap};

use crate::{MapError, MappingSet};

/// Cache of [`MappingSet`]s keyed by `(source, destination)` type pair.
///
/// At most one set exists per pair: creation happens under the write lock
/// after a second lookup, so racing callers all receive the same set.
pub struct MappingRegistry {
    sets: RwLock<HashMap<(TypeId, TypeId), MappingSet>>,
}

impl Default for MappingRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MappingRegistry {
    pub const fn new() -> Self {
        Self {
            sets: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    pub fn get(&self, source: TypeId, dest: TypeId) -> Option<MappingSet> {
        self.sets
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(source, dest))
            .cloned()
    }

    /// Returns the set of the pair, calling `create` if there is none.
    ///
    /// `create` runs at most once per pair and may fail, in which case
    /// nothing is cached.
    pub fn get_or_try_insert(
        &self,
        source: TypeId,
        dest: TypeId,
        create: impl FnOnce() -> Result<MappingSet, MapError>,
    ) -> Result<MappingSet, MapError> {
        if let Some(set) = self.get(source, dest) {
            return Ok(set);
        }

        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = sets.get(&(source, dest)) {
            return Ok(set.clone());
        }
        let set = create()?;
        sets.insert((source, dest), set.clone());
        Ok(set)
    }

    /// Evicts the set of the pair, returns whether one was cached.
    ///
    /// Holders of the evicted set keep it; the next resolution discovers a
    /// new one.
    pub fn remove(&self, source: TypeId, dest: TypeId) -> bool {
        let removed = self
            .sets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(source, dest));
        if let Some(set) = &removed {
            log::debug!(
                "evicted mapping `{}` -> `{}`",
                set.source_type().path(),
                set.dest_type().path(),
            );
        }
        removed.is_some()
    }

    #[inline]
    pub fn contains(&self, source: TypeId, dest: TypeId) -> bool {
        self.get(source, dest).is_some()
    }

    pub fn len(&self) -> usize {
        self.sets.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear(&self) {
        self.sets
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_list()
            .entries(
                sets.values()
                    .map(|set| (set.source_type(), set.dest_type())),
            )
            .finish()
    }
}
