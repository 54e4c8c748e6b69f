// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mock renderer for headless testing of document replay.
//!
//! MockRenderer tracks live drawings in a map without producing any output.
//! Use it to verify that every placement in the store is drawn exactly once
//! and that undo/redo release the handles they should.

use std::collections::BTreeMap;

use crate::coord::Halfcell;
use crate::kind::{ObjectKind, Payload};
use crate::render::RenderPort;

/// Handle issued by [`MockRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MockHandle(pub u64);

/// One live drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// Kind drawn.
    pub kind: ObjectKind,
    /// Where it was drawn.
    pub at: Halfcell,
    /// What was drawn.
    pub payload: Payload,
}

/// Mock render port for testing.
#[derive(Debug, Default)]
pub struct MockRenderer {
    /// Drawings that have not been removed, by handle.
    pub live: BTreeMap<MockHandle, Drawing>,
    /// Total draw calls.
    pub draw_count: u64,
    /// Total remove calls.
    pub remove_count: u64,
    /// Remove calls naming a handle that was not live, or the wrong kind.
    pub stale_removes: u64,
    next: u64,
}

impl MockRenderer {
    /// Create a new mock renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live drawings.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Live drawing at `at` of `kind`, if any.
    pub fn drawing_at(&self, at: Halfcell, kind: ObjectKind) -> Option<&Drawing> {
        self.live
            .values()
            .find(|drawing| drawing.at == at && drawing.kind == kind)
    }
}

impl RenderPort for MockRenderer {
    type Handle = MockHandle;

    fn draw(&mut self, kind: ObjectKind, at: Halfcell, payload: &Payload) -> MockHandle {
        self.next += 1;
        self.draw_count += 1;
        let handle = MockHandle(self.next);
        self.live.insert(
            handle,
            Drawing {
                kind,
                at,
                payload: payload.clone(),
            },
        );
        handle
    }

    fn remove(&mut self, kind: ObjectKind, handle: MockHandle) {
        self.remove_count += 1;
        match self.live.remove(&handle) {
            Some(drawing) if drawing.kind == kind => {}
            _ => self.stale_removes += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_then_remove_releases_handle() {
        let mut renderer = MockRenderer::new();
        let at = Halfcell::new(1, 1);
        let handle = renderer.draw(ObjectKind::Surface, at, &Payload::surface(1));
        assert_eq!(renderer.live_count(), 1);
        assert!(renderer.drawing_at(at, ObjectKind::Surface).is_some());

        renderer.remove(ObjectKind::Surface, handle);
        assert_eq!(renderer.live_count(), 0);
        assert_eq!(renderer.stale_removes, 0);
    }

    #[test]
    fn removing_twice_counts_as_stale() {
        let mut renderer = MockRenderer::new();
        let handle = renderer.draw(ObjectKind::Line, Halfcell::new(2, 1), &Payload::line(0));
        renderer.remove(ObjectKind::Line, handle);
        renderer.remove(ObjectKind::Line, handle);
        assert_eq!(renderer.stale_removes, 1);
        assert_eq!(renderer.remove_count, 2);
    }
}
