// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render port trait defining the drawing contract.

use crate::coord::Halfcell;
use crate::kind::{ObjectKind, Payload};

/// Rendering collaborator driven by the document.
///
/// Implementors turn placements into drawn representations and destroy them
/// on request. The document never inspects a handle; it only keeps the one
/// returned by [`draw`](RenderPort::draw) and hands it back to
/// [`remove`](RenderPort::remove) when the placement goes away.
///
/// Each payload variant needs its own drawing; implementors are expected to
/// match on [`Payload`] exhaustively.
pub trait RenderPort {
    /// Opaque ownership handle for one drawn placement.
    type Handle;

    /// Draw `payload` at `at` and return its handle.
    fn draw(&mut self, kind: ObjectKind, at: Halfcell, payload: &Payload) -> Self::Handle;

    /// Destroy a previously drawn placement.
    fn remove(&mut self, kind: ObjectKind, handle: Self::Handle);
}

/// Renderer that draws nothing, for documents with no view attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl RenderPort for NullRenderer {
    type Handle = ();

    fn draw(&mut self, _kind: ObjectKind, _at: Halfcell, _payload: &Payload) -> Self::Handle {}

    fn remove(&mut self, _kind: ObjectKind, _handle: Self::Handle) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::change::Change;
    use crate::coord::encode;
    use crate::document::Document;

    #[test]
    fn headless_document_still_tracks_state() {
        let mut doc = Document::<NullRenderer>::default();
        doc.add(Change::create(encode(1, 1), Payload::surface(1))).unwrap();
        assert_eq!(doc.store().placement_count(), 1);
        assert!(doc.undo());
        assert!(doc.store().is_empty());
    }
}
