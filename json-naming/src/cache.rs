//! Per-strategy caches keyed by type identity.

use std::{any::TypeId, collections::HashMap, sync::Arc};

use dashmap::DashMap;
use parking_lot::RwLock;

/// Default number of entries the flags cache holds before it is cleared.
pub const DEFAULT_FLAGS_CACHE_CAPACITY: usize = 64;

/// Result of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lookup<T> {
    pub(crate) value: T,
    pub(crate) hit: bool,
    /// The cache overflowed and was emptied before the value was stored.
    pub(crate) cleared: bool,
}

/// Memoizes whether a type is a flags enum.
///
/// A bounded cache is emptied as a whole when storing a new entry would exceed its capacity.
/// The clear happens under the write lock, so readers observe either the old or the empty map.
#[derive(Debug)]
pub(crate) struct FlagsCache {
    capacity: Option<usize>,
    entries: RwLock<HashMap<TypeId, bool>>,
}

impl FlagsCache {
    pub(crate) fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity.max(1)),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn unbounded() -> Self {
        Self {
            capacity: None,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn get_or_insert_with(&self, id: TypeId, compute: impl FnOnce() -> bool) -> Lookup<bool> {
        if let Some(&value) = self.entries.read().get(&id) {
            return Lookup {
                value,
                hit: true,
                cleared: false,
            };
        }

        let value = compute();

        let mut entries = self.entries.write();
        let cleared = match self.capacity {
            Some(capacity) if entries.len() >= capacity && !entries.contains_key(&id) => {
                entries.clear();
                true
            }
            _ => false,
        };
        entries.insert(id, value);

        Lookup {
            value,
            hit: false,
            cleared,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Memoizes values per type without eviction. Concurrent misses may compute the same value
/// more than once; the first stored value is kept.
#[derive(Debug)]
pub(crate) struct TypeCache<V> {
    entries: DashMap<TypeId, Arc<V>>,
}

impl<V> TypeCache<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub(crate) fn get_or_insert_with(&self, id: TypeId, compute: impl FnOnce() -> V) -> Lookup<Arc<V>> {
        let cached = self.entries.get(&id).map(|entry| Arc::clone(entry.value()));
        if let Some(value) = cached {
            return Lookup {
                value,
                hit: true,
                cleared: false,
            };
        }

        let computed = Arc::new(compute());
        let value = Arc::clone(self.entries.entry(id).or_insert(computed).value());

        Lookup {
            value,
            hit: false,
            cleared: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
