// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-placement edits recorded in the change log.

use thiserror::Error;

use crate::coord::HalfcellKey;
use crate::kind::{ObjectKind, Payload};

/// Error returned when constructing a [`Change`] that cannot describe an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// Neither side of the change holds a payload.
    #[error("change at {key} has neither a pre nor a post payload")]
    Empty {
        /// Position the change targeted.
        key: HalfcellKey,
    },
    /// A side carries a payload of a different kind than the change.
    #[error("change of kind {expected} at {key} carries a {found} payload")]
    KindMismatch {
        /// Position the change targeted.
        key: HalfcellKey,
        /// Kind declared for the change.
        expected: ObjectKind,
        /// Kind of the offending payload.
        found: ObjectKind,
    },
    /// The store does not hold what the change expects to replace.
    #[error("change of kind {kind} at {key} does not match the store")]
    Stale {
        /// Position the change targeted.
        key: HalfcellKey,
        /// Kind of the change.
        kind: ObjectKind,
    },
}

/// Direction in which a change is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Redo: remove `pre`, install `post`.
    Forward,
    /// Undo: remove `post`, install `pre`.
    Backward,
}

/// Immutable record of one mutation of one `(key, kind)` placement.
///
/// # Invariants
/// - At least one of `pre` / `post` is present.
/// - Every present payload has kind [`Change::kind`].
///
/// Both are enforced by the constructors; a `Change` that violates them
/// cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    key: HalfcellKey,
    kind: ObjectKind,
    pre: Option<Payload>,
    post: Option<Payload>,
    linked: bool,
}

impl Change {
    /// Build a change of `kind` at `key` from its before/after payloads.
    pub fn new(
        key: HalfcellKey,
        kind: ObjectKind,
        pre: Option<Payload>,
        post: Option<Payload>,
    ) -> Result<Self, ChangeError> {
        if pre.is_none() && post.is_none() {
            return Err(ChangeError::Empty { key });
        }
        for payload in pre.iter().chain(post.iter()) {
            if payload.kind() != kind {
                return Err(ChangeError::KindMismatch {
                    key,
                    expected: kind,
                    found: payload.kind(),
                });
            }
        }
        Ok(Self {
            key,
            kind,
            pre,
            post,
            linked: false,
        })
    }

    /// Place `payload` where nothing of its kind existed.
    pub fn create(key: HalfcellKey, payload: Payload) -> Self {
        Self {
            key,
            kind: payload.kind(),
            pre: None,
            post: Some(payload),
            linked: false,
        }
    }

    /// Delete the existing `payload`.
    pub fn delete(key: HalfcellKey, payload: Payload) -> Self {
        Self {
            key,
            kind: payload.kind(),
            pre: Some(payload),
            post: None,
            linked: false,
        }
    }

    /// Replace `pre` with `post`; both must be the same kind.
    pub fn replace(key: HalfcellKey, pre: Payload, post: Payload) -> Result<Self, ChangeError> {
        Self::new(key, pre.kind(), Some(pre), Some(post))
    }

    /// Mark this change as part of the same user action as its predecessor.
    pub fn linked(mut self) -> Self {
        self.linked = true;
        self
    }

    /// Set the linked flag explicitly.
    pub fn with_linked(mut self, linked: bool) -> Self {
        self.linked = linked;
        self
    }

    /// Position edited.
    pub fn key(&self) -> HalfcellKey {
        self.key
    }

    /// Kind edited.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Payload before the edit (`None` if the edit created it).
    pub fn pre(&self) -> Option<&Payload> {
        self.pre.as_ref()
    }

    /// Payload after the edit (`None` if the edit deleted it).
    pub fn post(&self) -> Option<&Payload> {
        self.post.as_ref()
    }

    /// `true` when undone/redone together with the previous change.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// `(remove, install)` sides for replaying in `direction`.
    pub fn sides(&self, direction: Direction) -> (Option<&Payload>, Option<&Payload>) {
        match direction {
            Direction::Forward => (self.pre.as_ref(), self.post.as_ref()),
            Direction::Backward => (self.post.as_ref(), self.pre.as_ref()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::coord::encode;

    #[test]
    fn empty_change_is_rejected() {
        let key = encode(1, 1);
        let err = Change::new(key, ObjectKind::Surface, None, None).unwrap_err();
        assert_eq!(err, ChangeError::Empty { key });
    }

    #[test]
    fn mismatched_payload_kind_is_rejected() {
        let key = encode(1, 1);
        let err = Change::new(key, ObjectKind::Line, None, Some(Payload::surface(1))).unwrap_err();
        assert_eq!(
            err,
            ChangeError::KindMismatch {
                key,
                expected: ObjectKind::Line,
                found: ObjectKind::Surface,
            }
        );
        assert!(Change::replace(key, Payload::surface(1), Payload::text("a")).is_err());
    }

    #[test]
    fn direction_flips_sides() {
        let change = Change::replace(encode(1, 1), Payload::surface(1), Payload::surface(2)).unwrap();
        assert_eq!(
            change.sides(Direction::Forward),
            (Some(&Payload::surface(1)), Some(&Payload::surface(2)))
        );
        assert_eq!(
            change.sides(Direction::Backward),
            (Some(&Payload::surface(2)), Some(&Payload::surface(1)))
        );
    }

    #[test]
    fn create_and_delete_derive_kind() {
        let created = Change::create(encode(2, 1), Payload::line(0));
        assert_eq!(created.kind(), ObjectKind::Line);
        assert_eq!(created.pre(), None);
        assert!(!created.is_linked());

        let deleted = Change::delete(encode(2, 1), Payload::line(0)).linked();
        assert_eq!(deleted.post(), None);
        assert!(deleted.is_linked());
    }
}
