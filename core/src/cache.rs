//! Caller-owned memoization for generated tables.
//!
//! The generators are pure functions of (config, seed, now); this
//! wrapper pins a generated table to the parameters that produced it.
//! Invalidation is explicit — there is no process-global cached state,
//! and dropping the cache drops the tables.

use crate::types::Seed;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{hash_map::Entry, HashMap};
use std::hash::Hash;

/// Parameters that pin a KPI table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KpiKey {
    pub seed: Seed,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Parameters that pin an incident table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoKey {
    pub seed: Seed,
    pub now: DateTime<Utc>,
}

/// A parameter-keyed memo for one kind of generated table.
pub struct TableCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> TableCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached table for `key`, generating it on first access.
    /// A failed generation caches nothing.
    pub fn get_or_generate<E>(
        &mut self,
        key: K,
        generate: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(generate()?)),
        }
    }

    /// Drop the table pinned to `key`. Returns whether one existed.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every cached table.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for TableCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
