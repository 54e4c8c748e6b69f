// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative mapping from halfcell position to the objects placed there.
use std::collections::BTreeMap;

use crate::coord::HalfcellKey;
use crate::kind::{ObjectKind, Payload};

/// In-memory placement store.
///
/// # Invariants
///
/// - Each `(key, kind)` holds at most one payload, and that payload's variant
///   matches `kind`.
/// - No key maps to an empty inner map: [`HalfcellStore::remove`] prunes the
///   outer entry as soon as its last placement goes, so [`HalfcellStore::len`]
///   counts occupied positions only.
///
/// Mutation is crate-private; callers edit through
/// [`Document::add`](crate::Document::add) so every edit lands in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalfcellStore {
    cells: BTreeMap<HalfcellKey, BTreeMap<ObjectKind, Payload>>,
}

impl HalfcellStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload placed at `(key, kind)`, if any.
    pub fn get(&self, key: HalfcellKey, kind: ObjectKind) -> Option<&Payload> {
        self.cells.get(&key).and_then(|inner| inner.get(&kind))
    }

    /// Returns `true` when `(key, kind)` is occupied.
    pub fn contains(&self, key: HalfcellKey, kind: ObjectKind) -> bool {
        self.get(key, kind).is_some()
    }

    /// Kinds present at `key`, in tag order.
    pub fn kinds_at(&self, key: HalfcellKey) -> impl Iterator<Item = ObjectKind> + '_ {
        self.cells.get(&key).into_iter().flat_map(|inner| inner.keys().copied())
    }

    /// Number of occupied positions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of placements across all positions.
    pub fn placement_count(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    /// Iterate placements in key order, then kind order.
    pub fn iter(&self) -> impl Iterator<Item = (HalfcellKey, &Payload)> + '_ {
        self.cells
            .iter()
            .flat_map(|(key, inner)| inner.values().map(move |payload| (*key, payload)))
    }

    /// Insert or overwrite the placement for `payload.kind()` at `key`.
    ///
    /// Returns the payload it replaced.
    pub(crate) fn set(&mut self, key: HalfcellKey, payload: Payload) -> Option<Payload> {
        self.cells
            .entry(key)
            .or_default()
            .insert(payload.kind(), payload)
    }

    /// Delete the placement at `(key, kind)`, pruning an emptied position.
    pub(crate) fn remove(&mut self, key: HalfcellKey, kind: ObjectKind) -> Option<Payload> {
        let inner = self.cells.get_mut(&key)?;
        let removed = inner.remove(&kind);
        if inner.is_empty() {
            self.cells.remove(&key);
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn has_empty_positions(&self) -> bool {
        self.cells.values().any(BTreeMap::is_empty)
    }
}
