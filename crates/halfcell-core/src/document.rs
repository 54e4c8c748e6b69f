// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Document: the store, its change log and the drawings they drive.
//!
//! # Replay invariant
//!
//! The store always equals the result of replaying `log.applied()` forward
//! from empty. Every mutation goes through [`Document::add`],
//! [`Document::undo`] or [`Document::redo`]; each moves the log cursor and
//! applies exactly the changes it moved over. A change is applied only when
//! the store holds exactly the side it removes (`pre` forward, `post`
//! backward); otherwise the cursor stays put.
//!
//! # Linked runs
//!
//! A linked change belongs to the same user action as its predecessor. Undo
//! keeps stepping back while the change it just reverted is linked; redo
//! keeps stepping forward while the next pending change is linked. A run is
//! therefore always reverted or re-applied whole.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::change::{Change, ChangeError, Direction};
use crate::coord::HalfcellKey;
use crate::history::ChangeLog;
use crate::kind::{ObjectKind, Payload};
use crate::render::RenderPort;
use crate::stamp::Stamp;
use crate::store::HalfcellStore;

/// An editable diagram.
///
/// Owns its placements, its history and the handles of everything its
/// renderer has drawn. Independent documents share nothing.
pub struct Document<R: RenderPort> {
    store: HalfcellStore,
    log: ChangeLog,
    drawn: HashMap<(HalfcellKey, ObjectKind), R::Handle>,
    renderer: R,
}

impl<R: RenderPort> core::fmt::Debug for Document<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("store", &self.store)
            .field("log", &self.log)
            .field("drawn", &self.drawn.len())
            .finish_non_exhaustive()
    }
}

impl<R: RenderPort + Default> Default for Document<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: RenderPort> Document<R> {
    /// Creates an empty document drawing through `renderer`.
    pub fn new(renderer: R) -> Self {
        Self {
            store: HalfcellStore::new(),
            log: ChangeLog::new(),
            drawn: HashMap::new(),
            renderer,
        }
    }

    /// Current placements.
    pub fn store(&self) -> &HalfcellStore {
        &self.store
    }

    /// Edit history.
    pub fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// Rendering collaborator.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Payload at `(key, kind)`, if any.
    pub fn get(&self, key: HalfcellKey, kind: ObjectKind) -> Option<&Payload> {
        self.store.get(key, kind)
    }

    /// Returns `true` when there is something to undo.
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    /// Returns `true` when there is something to redo.
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Record `change` (discarding any redoable suffix) and apply it.
    ///
    /// # Errors
    /// [`ChangeError::Stale`] when the store does not hold `change.pre()` at
    /// the change's slot; nothing is recorded.
    pub fn add(&mut self, change: Change) -> Result<(), ChangeError> {
        check(&self.store, &change, Direction::Forward)?;
        self.record(change);
        self.apply_pending().map(|_| ())
    }

    /// Append `change` to the log without applying it.
    ///
    /// The change becomes the next redoable step; the store is untouched.
    /// Returns how many redoable changes were discarded to make room.
    pub fn record(&mut self, change: Change) -> usize {
        let discarded = self.log.record(change);
        if discarded > 0 {
            debug!(discarded, "new edit discarded redo history");
        }
        discarded
    }

    /// Apply exactly one pending change forward, ignoring links.
    ///
    /// Returns `Ok(false)` when nothing is pending.
    ///
    /// # Errors
    /// [`ChangeError::Stale`] when the pending change no longer matches the
    /// store; it stays pending and nothing is applied.
    pub fn apply_pending(&mut self) -> Result<bool, ChangeError> {
        let Some(change) = self.log.pending() else {
            return Ok(false);
        };
        apply(
            &mut self.store,
            &mut self.drawn,
            &mut self.renderer,
            change,
            Direction::Forward,
        )?;
        self.log.step_forward();
        Ok(true)
    }

    /// Revert the most recent action (a change and the linked changes before
    /// it). Returns `false` when there was nothing to undo.
    ///
    /// Stops early, leaving the cursor on it, at a change the store no
    /// longer matches.
    pub fn undo(&mut self) -> bool {
        let mut reverted = 0usize;
        while let Some(change) = self.log.applied().last() {
            if let Err(err) = apply(
                &mut self.store,
                &mut self.drawn,
                &mut self.renderer,
                change,
                Direction::Backward,
            ) {
                warn!(error = %err, "undo stopped");
                break;
            }
            let linked = change.is_linked();
            self.log.step_back();
            reverted += 1;
            if !linked {
                break;
            }
        }
        if reverted > 0 {
            debug!(reverted, position = self.log.position(), "undo");
        }
        reverted > 0
    }

    /// Re-apply the next undone action (a change and the linked changes after
    /// it). Returns `false` when there was nothing to redo.
    ///
    /// Stops early, leaving it pending, at a change the store no longer
    /// matches.
    pub fn redo(&mut self) -> bool {
        let mut reapplied = 0usize;
        while let Some(change) = self.log.pending() {
            if let Err(err) = apply(
                &mut self.store,
                &mut self.drawn,
                &mut self.renderer,
                change,
                Direction::Forward,
            ) {
                warn!(error = %err, "redo stopped");
                break;
            }
            self.log.step_forward();
            reapplied += 1;
            if !self.log.pending().is_some_and(Change::is_linked) {
                break;
            }
        }
        if reapplied > 0 {
            debug!(reapplied, position = self.log.position(), "redo");
        }
        reapplied > 0
    }

    /// Place every item of `stamp`, shifted by `(dx, dy)`, as one action.
    ///
    /// Items identical to what is already placed are skipped; the first
    /// emitted change starts a new action and the rest are linked to it.
    /// Returns the number of changes added.
    pub fn apply_stamp(&mut self, stamp: &Stamp, dx: i32, dy: i32) -> usize {
        let mut added = 0usize;
        for item in stamp {
            let key = item.at().offset(dx, dy).key();
            let pre = self.store.get(key, item.kind()).cloned();
            if pre.as_ref() == Some(&item.payload) {
                continue;
            }
            let change = match pre {
                Some(pre) => Change::replace(key, pre, item.payload.clone()),
                None => Ok(Change::create(key, item.payload.clone())),
            };
            // Both sides come from the same kind slot, so neither step can fail.
            let Ok(change) = change else { continue };
            if self.add(change.with_linked(added > 0)).is_ok() {
                added += 1;
            }
        }
        debug!(items = stamp.len(), added, dx, dy, "applied stamp");
        added
    }

    /// Flat snapshot of every placement.
    pub fn snapshot(&self) -> Stamp {
        Stamp::snapshot(&self.store)
    }
}

/// Fails unless the store holds exactly the side `direction` removes.
fn check(store: &HalfcellStore, change: &Change, direction: Direction) -> Result<(), ChangeError> {
    let (remove, _) = change.sides(direction);
    if store.get(change.key(), change.kind()) == remove {
        Ok(())
    } else {
        Err(ChangeError::Stale {
            key: change.key(),
            kind: change.kind(),
        })
    }
}

/// Replay one change in `direction` against the store and renderer.
///
/// Nothing is touched when [`check`] fails.
fn apply<R: RenderPort>(
    store: &mut HalfcellStore,
    drawn: &mut HashMap<(HalfcellKey, ObjectKind), R::Handle>,
    renderer: &mut R,
    change: &Change,
    direction: Direction,
) -> Result<(), ChangeError> {
    check(store, change, direction)?;
    let key = change.key();
    let kind = change.kind();
    let (remove, install) = change.sides(direction);
    trace!(%key, %kind, ?direction, "apply change");

    if remove.is_some() {
        store.remove(key, kind);
        if let Some(handle) = drawn.remove(&(key, kind)) {
            renderer.remove(kind, handle);
        }
    }

    if let Some(payload) = install {
        store.set(key, payload.clone());
        let handle = renderer.draw(kind, key.halfcell(), payload);
        if let Some(stale) = drawn.insert((key, kind), handle) {
            warn!(%key, %kind, "replaced a drawing that was never removed");
            renderer.remove(kind, stale);
        }
    }
    Ok(())
}
