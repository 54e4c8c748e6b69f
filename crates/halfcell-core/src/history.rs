// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Linear undo/redo history.
//!
//! The log is a sequence of [`Change`]s split by a cursor into an applied
//! prefix `[0, cursor)` and a redoable suffix `[cursor, len)`. Recording a new
//! change while a suffix exists discards the suffix: history is a line, not a
//! tree.
//!
//! The log only moves the cursor. Applying the change it hands back to the
//! store is the [`Document`](crate::Document)'s job, which is what lets tests
//! exercise recording and application separately.

use crate::change::Change;

/// Append-only (truncate-on-branch) change history with a replay cursor.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    history: Vec<Change>,
    cursor: usize,
}

impl ChangeLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `change` after the cursor, discarding any redoable suffix.
    ///
    /// The cursor does not move; the change is pending until the next
    /// [`step_forward`](Self::step_forward). Returns how many changes were
    /// discarded.
    pub fn record(&mut self, change: Change) -> usize {
        let discarded = self.history.len() - self.cursor;
        self.history.truncate(self.cursor);
        self.history.push(change);
        discarded
    }

    /// Move the cursor back over one change and return it, or `None` at the
    /// start of history.
    pub fn step_back(&mut self) -> Option<&Change> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.history.get(self.cursor)
    }

    /// Move the cursor forward over one change and return it, or `None` when
    /// nothing is pending.
    pub fn step_forward(&mut self) -> Option<&Change> {
        let change = self.history.get(self.cursor)?;
        self.cursor += 1;
        Some(change)
    }

    /// The next change [`step_forward`](Self::step_forward) would return.
    pub fn pending(&self) -> Option<&Change> {
        self.history.get(self.cursor)
    }

    /// Number of applied changes (the cursor position).
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Total recorded changes, applied or not.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns `true` when there is an applied change to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` when there is a pending change to redo.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    /// Applied prefix, oldest first.
    pub fn applied(&self) -> &[Change] {
        &self.history[..self.cursor]
    }

    /// Every recorded change, oldest first.
    pub fn changes(&self) -> &[Change] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::encode;
    use crate::kind::Payload;

    fn surface(x: i32, color: u8) -> Change {
        Change::create(encode(x, 1), Payload::surface(color))
    }

    #[test]
    fn record_leaves_change_pending() {
        let mut log = ChangeLog::new();
        assert_eq!(log.record(surface(1, 1)), 0);
        assert_eq!(log.len(), 1);
        assert_eq!(log.position(), 0);
        assert!(log.can_redo());
        assert!(!log.can_undo());
        assert_eq!(log.pending(), Some(&surface(1, 1)));
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let mut log = ChangeLog::new();
        assert!(log.step_back().is_none());
        assert!(log.step_forward().is_none());

        log.record(surface(1, 1));
        assert_eq!(log.step_forward(), Some(&surface(1, 1)));
        assert!(log.step_forward().is_none());
        assert_eq!(log.position(), 1);

        assert_eq!(log.step_back(), Some(&surface(1, 1)));
        assert!(log.step_back().is_none());
        assert_eq!(log.position(), 0);
    }

    #[test]
    fn recording_mid_history_discards_suffix() {
        let mut log = ChangeLog::new();
        for x in 0..3 {
            log.record(surface(x, 1));
            log.step_forward();
        }
        log.step_back();
        log.step_back();
        assert_eq!(log.record(surface(9, 2)), 2);
        assert_eq!(log.changes(), &[surface(0, 1), surface(9, 2)]);
        assert_eq!(log.applied(), &[surface(0, 1)]);
    }
}
