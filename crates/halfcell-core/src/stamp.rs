// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stamps: flat, ordered snapshots of placements.
//!
//! A stamp is what the codec reads and writes. It carries no history; it is
//! the content of (part of) a store at one moment, used for copy/paste and
//! export.

use crate::coord::{Halfcell, HalfcellKey};
use crate::kind::{ObjectKind, Payload};
use crate::store::HalfcellStore;

/// One placement in a stamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ItemRepr", into = "ItemRepr"))]
pub struct Item {
    /// Position.
    pub key: HalfcellKey,
    /// Object placed there; its variant is the item's kind.
    pub payload: Payload,
}

impl Item {
    /// Create an item.
    pub fn new(key: HalfcellKey, payload: Payload) -> Self {
        Self { key, payload }
    }

    /// Kind of the placed object.
    pub fn kind(&self) -> ObjectKind {
        self.payload.kind()
    }

    /// Unpacked position.
    pub fn at(&self) -> Halfcell {
        self.key.halfcell()
    }
}

/// JSON shape of an [`Item`]: unpacked coordinates beside the tagged payload.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ItemRepr {
    x: i32,
    y: i32,
    #[serde(flatten)]
    payload: Payload,
}

#[cfg(feature = "serde")]
impl From<ItemRepr> for Item {
    fn from(repr: ItemRepr) -> Self {
        Self::new(Halfcell::new(repr.x, repr.y).key(), repr.payload)
    }
}

#[cfg(feature = "serde")]
impl From<Item> for ItemRepr {
    fn from(item: Item) -> Self {
        let at = item.at();
        Self {
            x: at.x,
            y: at.y,
            payload: item.payload,
        }
    }
}

/// Inclusive rectangle of halfcells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Smallest `x`.
    pub xmin: i32,
    /// Largest `x`.
    pub xmax: i32,
    /// Smallest `y`.
    pub ymin: i32,
    /// Largest `y`.
    pub ymax: i32,
}

impl Bounds {
    /// Rectangle spanning both corners, in any order.
    pub fn spanning(a: Halfcell, b: Halfcell) -> Self {
        Self {
            xmin: a.x.min(b.x),
            xmax: a.x.max(b.x),
            ymin: a.y.min(b.y),
            ymax: a.y.max(b.y),
        }
    }

    /// Returns `true` when `at` lies inside (edges included).
    pub fn contains(&self, at: Halfcell) -> bool {
        (self.xmin..=self.xmax).contains(&at.x) && (self.ymin..=self.ymax).contains(&at.y)
    }

    /// Grow to include `at`.
    pub fn include(&mut self, at: Halfcell) {
        self.xmin = self.xmin.min(at.x);
        self.xmax = self.xmax.max(at.x);
        self.ymin = self.ymin.min(at.y);
        self.ymax = self.ymax.max(at.y);
    }

    /// Smallest rectangle with even (vertex) corners containing `self`.
    pub fn grid_aligned(&self) -> Self {
        Self {
            xmin: self.xmin.div_euclid(2) * 2,
            xmax: self.xmax.saturating_add(1).div_euclid(2) * 2,
            ymin: self.ymin.div_euclid(2) * 2,
            ymax: self.ymax.saturating_add(1).div_euclid(2) * 2,
        }
    }

    /// Width in halfcells (`xmax - xmin`).
    pub fn width(&self) -> i32 {
        self.xmax - self.xmin
    }

    /// Height in halfcells (`ymax - ymin`).
    pub fn height(&self) -> i32 {
        self.ymax - self.ymin
    }
}

/// Ordered sequence of placements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Stamp {
    items: Vec<Item>,
}

impl Stamp {
    /// Creates an empty stamp.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every placement in `store`, in store order.
    pub fn snapshot(store: &HalfcellStore) -> Self {
        store
            .iter()
            .map(|(key, payload)| Item::new(key, payload.clone()))
            .collect()
    }

    /// Placements in `store` that fall inside `bounds`, in store order.
    pub fn capture(store: &HalfcellStore, bounds: Bounds) -> Self {
        store
            .iter()
            .filter(|(key, _)| bounds.contains(key.halfcell()))
            .map(|(key, payload)| Item::new(key, payload.clone()))
            .collect()
    }

    /// Append an item.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Items in order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Consume into the item list.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Iterate items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the stamp has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bounding rectangle of every item, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.items.iter().map(Item::at);
        let first = iter.next()?;
        let mut bounds = Bounds::spanning(first, first);
        for at in iter {
            bounds.include(at);
        }
        Some(bounds)
    }

    /// Copy with every item shifted by `(dx, dy)` halfcells.
    ///
    /// Odd offsets change what each item's position addresses (a cell center
    /// becomes an edge); callers placing by cell keep offsets even.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        self.items
            .iter()
            .map(|item| Item::new(item.at().offset(dx, dy).key(), item.payload.clone()))
            .collect()
    }
}

impl FromIterator<Item> for Stamp {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Item>> for Stamp {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl IntoIterator for Stamp {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stamp {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::coord::encode;

    fn store_with(items: &[(i32, i32, Payload)]) -> HalfcellStore {
        let mut store = HalfcellStore::new();
        for (x, y, payload) in items {
            store.set(encode(*x, *y), payload.clone());
        }
        store
    }

    #[test]
    fn bounds_cover_every_item() {
        let stamp: Stamp = vec![
            Item::new(encode(3, 5), Payload::surface(1)),
            Item::new(encode(-1, 9), Payload::line(0)),
            Item::new(encode(7, -2), Payload::text("a")),
        ]
        .into();
        assert_eq!(
            stamp.bounds(),
            Some(Bounds {
                xmin: -1,
                xmax: 7,
                ymin: -2,
                ymax: 9,
            })
        );
        assert_eq!(Stamp::new().bounds(), None);
    }

    #[test]
    fn grid_alignment_rounds_outward_to_even() {
        let bounds = Bounds {
            xmin: -1,
            xmax: 3,
            ymin: 1,
            ymax: 4,
        };
        assert_eq!(
            bounds.grid_aligned(),
            Bounds {
                xmin: -2,
                xmax: 4,
                ymin: 0,
                ymax: 4,
            }
        );
    }

    #[test]
    fn capture_clips_to_bounds() {
        let store = store_with(&[
            (1, 1, Payload::surface(1)),
            (3, 1, Payload::surface(2)),
            (9, 9, Payload::surface(3)),
        ]);
        let clip = Stamp::capture(&store, Bounds::spanning(Halfcell::new(0, 0), Halfcell::new(4, 2)));
        assert_eq!(clip.len(), 2);
        assert!(clip.iter().all(|item| item.at().x <= 4));
        assert_eq!(Stamp::snapshot(&store).len(), 3);
    }

    #[test]
    fn translation_keeps_order_and_payloads() {
        let stamp: Stamp = vec![
            Item::new(encode(1, 1), Payload::surface(1)),
            Item::new(encode(2, 1), Payload::line(0)),
        ]
        .into();
        let moved = stamp.translated(4, -2);
        assert_eq!(moved.items()[0], Item::new(encode(5, -1), Payload::surface(1)));
        assert_eq!(moved.items()[1], Item::new(encode(6, -1), Payload::line(0)));
        assert_eq!(moved.bounds().unwrap().width(), 1);
    }
}
