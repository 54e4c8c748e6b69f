// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Editor session: one document plus the services a tool front-end needs.
//!
//! Tools edit through [`Session::place`] / [`Session::erase`], move content
//! with [`Session::copy`] / [`Session::paste`], and step history with
//! [`Session::undo`] / [`Session::redo`]. Failures that the user should see
//! land in [`Session::notices`]; a failed paste changes nothing.

use std::time::{Duration, Instant};

use halfcell_codec::{deserialize, serialize, DecodeError, EncodeError};
use halfcell_core::{Bounds, Change, Document, Halfcell, ObjectKind, Payload, RenderPort, Stamp};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{ConfigError, ConfigService, ConfigStore};
use crate::notice::{NoticeKind, Notices};
use crate::prefs::{EditorPrefs, PREFS_KEY};

/// How long session notices stay visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Failure of a session operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Selection holds a payload the wire format cannot carry.
    #[error("serialize: {0}")]
    Encode(#[from] EncodeError),
    /// Clipboard bytes are not a readable stamp.
    #[error("deserialize: {0}")]
    Decode(#[from] DecodeError),
}

/// A document being edited, with its notices and preferences.
#[derive(Debug)]
pub struct Session<R: RenderPort> {
    document: Document<R>,
    notices: Notices,
    prefs: EditorPrefs,
}

impl<R: RenderPort> Session<R> {
    /// Start an empty session.
    pub fn new(renderer: R, prefs: EditorPrefs) -> Self {
        Self {
            document: Document::new(renderer),
            notices: Notices::default(),
            prefs,
        }
    }

    /// Start an empty session with prefs read from `config`.
    ///
    /// Unreadable prefs fall back to defaults and leave a warning notice.
    pub fn load<S: ConfigStore>(renderer: R, config: &ConfigService<S>, now: Instant) -> Self {
        match config.load_or_default::<EditorPrefs>(PREFS_KEY) {
            Ok(prefs) => Self::new(renderer, prefs),
            Err(err) => {
                warn!(error = %err, "falling back to default editor prefs");
                let mut session = Self::new(renderer, EditorPrefs::default());
                session.notices.push(
                    NoticeKind::Warn,
                    "preferences unreadable; using defaults",
                    Some(err.to_string()),
                    NOTICE_TTL,
                    now,
                );
                session
            }
        }
    }

    /// The document being edited.
    pub fn document(&self) -> &Document<R> {
        &self.document
    }

    /// Queued notices.
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Mutable notice queue (for expiry ticks).
    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Active preferences.
    pub fn prefs(&self) -> &EditorPrefs {
        &self.prefs
    }

    /// Replace the active preferences.
    pub fn set_prefs(&mut self, prefs: EditorPrefs) {
        self.prefs = prefs;
    }

    /// Persist the active preferences through `config`.
    pub fn save_prefs<S: ConfigStore>(&self, config: &ConfigService<S>) -> Result<(), ConfigError> {
        config.save(PREFS_KEY, &self.prefs)
    }

    /// Put `payload` at `at`, replacing whatever of the same kind is there.
    ///
    /// Returns `false` (and records nothing) when the same payload is
    /// already placed.
    pub fn place(&mut self, at: Halfcell, payload: Payload) -> bool {
        let key = at.key();
        let change = match self.document.get(key, payload.kind()) {
            Some(existing) if *existing == payload => return false,
            Some(existing) => Change::replace(key, existing.clone(), payload),
            None => Ok(Change::create(key, payload)),
        };
        match change.and_then(|change| self.document.add(change)) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "rejected placement");
                false
            }
        }
    }

    /// Remove the `kind` object at `at`. Returns `false` when there was none.
    pub fn erase(&mut self, at: Halfcell, kind: ObjectKind) -> bool {
        let key = at.key();
        let Some(existing) = self.document.get(key, kind).cloned() else {
            return false;
        };
        match self.document.add(Change::delete(key, existing)) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "rejected erase");
                false
            }
        }
    }

    /// Serialize everything inside `bounds`.
    #[instrument(skip(self))]
    pub fn copy(&mut self, bounds: Bounds, now: Instant) -> Result<Vec<u8>, SessionError> {
        let stamp = Stamp::capture(self.document.store(), bounds);
        match serialize(&stamp) {
            Ok(bytes) => {
                debug!(items = stamp.len(), bytes = bytes.len(), "copied selection");
                Ok(bytes)
            }
            Err(err) => {
                let err = SessionError::from(err);
                self.report(&err, now);
                Err(err)
            }
        }
    }

    /// Decode `bytes` and place the stamp shifted by `(dx, dy)` as one
    /// undoable action.
    ///
    /// Returns the number of placements changed. Undecodable input leaves a
    /// notice, changes nothing and returns 0.
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn paste(&mut self, bytes: &[u8], dx: i32, dy: i32, now: Instant) -> usize {
        match deserialize(bytes) {
            Ok(stamp) => self.document.apply_stamp(&stamp, dx, dy),
            Err(err) => {
                let err = SessionError::from(err);
                warn!(error = %err, "paste rejected");
                self.report(&err, now);
                0
            }
        }
    }

    /// Revert the most recent action.
    pub fn undo(&mut self) -> bool {
        self.document.undo()
    }

    /// Re-apply the most recently undone action.
    pub fn redo(&mut self) -> bool {
        self.document.redo()
    }

    fn report(&mut self, err: &SessionError, now: Instant) {
        self.notices
            .push(NoticeKind::Error, err.to_string(), None, NOTICE_TTL, now);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use halfcell_core::{encode, MockRenderer};

    fn session() -> Session<MockRenderer> {
        Session::new(MockRenderer::new(), EditorPrefs::default())
    }

    #[test]
    fn place_is_idempotent_and_replaces() {
        let mut s = session();
        let at = Halfcell::cell_center(0, 0);
        assert!(s.place(at, Payload::surface(1)));
        assert!(!s.place(at, Payload::surface(1)));
        assert!(s.place(at, Payload::surface(2)));
        assert_eq!(s.document().log().len(), 2);
        assert!(s.undo());
        assert_eq!(
            s.document().get(at.key(), ObjectKind::Surface),
            Some(&Payload::surface(1))
        );
    }

    #[test]
    fn erase_missing_object_records_nothing() {
        let mut s = session();
        assert!(!s.erase(Halfcell::new(1, 1), ObjectKind::Text));
        assert!(s.document().log().is_empty());
    }

    #[test]
    fn copy_of_unencodable_payload_reports_error() {
        let mut s = session();
        s.place(Halfcell::new(1, 1), Payload::surface(200));
        let now = Instant::now();
        let err = s
            .copy(Bounds::spanning(Halfcell::new(0, 0), Halfcell::new(2, 2)), now)
            .unwrap_err();
        assert!(matches!(err, SessionError::Encode(_)));
        assert_eq!(s.notices().latest().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn paste_of_unsupported_version_changes_nothing() {
        let mut s = session();
        s.place(Halfcell::new(1, 1), Payload::surface(1));
        let now = Instant::now();
        assert_eq!(s.paste(&[0x80, 0, 0, 0, 0, 0], 0, 0, now), 0);
        assert_eq!(s.document().store().placement_count(), 1);
        assert_eq!(s.document().log().len(), 1);
        let notice = s.notices().latest().unwrap();
        assert_eq!(notice.title, "deserialize: unsupported format version 1");
        assert_eq!(
            s.document().get(encode(1, 1), ObjectKind::Surface),
            Some(&Payload::surface(1))
        );
    }
}
