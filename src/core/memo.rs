//! Caller-owned memoization for analytic results.
//!
//! Results are pure functions of the input snapshot, so they are cached by
//! value-equality of the snapshot identity. A change of `data_version`
//! makes every older entry unreachable; [`SnapshotCache::retain_version`]
//! drops them. Entries are replaced whole, never patched.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub company: Option<String>,
    pub data_version: u64,
}

impl SnapshotKey {
    pub fn new(
        date_from: NaiveDate,
        date_to: NaiveDate,
        company: Option<&str>,
        data_version: u64,
    ) -> Self {
        Self {
            date_from,
            date_to,
            company: company.map(str::to_string),
            data_version,
        }
    }
}

#[derive(Debug)]
pub struct SnapshotCache<V> {
    entries: HashMap<SnapshotKey, V>,
    hits: usize,
    misses: usize,
}

impl<V> Default for SnapshotCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V> SnapshotCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &SnapshotKey) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_or_insert_with<F>(&mut self, key: SnapshotKey, compute: F) -> &V
    where
        F: FnOnce() -> V,
    {
        match self.entries.entry(key) {
            Entry::Occupied(e) => {
                self.hits += 1;
                e.into_mut()
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                e.insert(compute())
            }
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for fallible
    /// computations; nothing is stored on error.
    pub fn get_or_try_insert_with<F, E>(&mut self, key: SnapshotKey, compute: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(e) => {
                self.hits += 1;
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                Ok(e.insert(compute()?))
            }
        }
    }

    /// Drop every entry computed from a different source version.
    pub fn retain_version(&mut self, data_version: u64) {
        self.entries.retain(|k, _| k.data_version == data_version);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
