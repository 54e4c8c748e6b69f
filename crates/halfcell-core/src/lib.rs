// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core of the halfcell diagram editor.
//!
//! Diagrams live on a doubled-resolution grid where cell centers, edge
//! midpoints and vertices are all integer points ("halfcells"). This crate
//! holds the authoritative state of a diagram and its edit history:
//!
//! - [`coord`] packs halfcell coordinates into 32-bit store keys.
//! - [`kind`] defines the closed set of object kinds and their payloads.
//! - [`HalfcellStore`] maps positions to the objects placed there.
//! - [`Change`] / [`ChangeLog`] record edits; [`Document`] applies them,
//!   undoes and redoes them, and keeps a [`RenderPort`] in sync.
//! - [`Stamp`] is a flat snapshot of placements, the unit the codec works on.
//!
//! It contains NO serialization logic; the bit-level wire format lives in
//! `halfcell-codec`.
//!
//! # Crate Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for placements and stamps.

pub mod change;
pub mod coord;
mod document;
pub mod history;
pub mod kind;
mod mock_renderer;
mod render;
mod stamp;
mod store;

pub use change::{Change, ChangeError, Direction};
pub use coord::{decode, encode, Halfcell, HalfcellKey, Site};
pub use document::Document;
pub use history::ChangeLog;
pub use kind::{Color, EdgeSpec, Head, ObjectKind, Payload, Shape, ShapeSpec};
pub use mock_renderer::{Drawing, MockHandle, MockRenderer};
pub use render::{NullRenderer, RenderPort};
pub use stamp::{Bounds, Item, Stamp};
pub use store::HalfcellStore;
