// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Halfcell coordinates and their packed store keys.
//!
//! The halfcell grid runs at twice the cell resolution so that cell centers,
//! edge midpoints and vertices all land on integer points. A coordinate packs
//! into a single 32-bit key: `x` in the high half, `y` in the low half.
//!
//! # Aliasing
//!
//! Only the low 16 bits of each component survive packing. Components outside
//! `i16::MIN..=i16::MAX` alias onto a representable coordinate; this is a
//! property of the key format, not an error.

/// Packed halfcell coordinate used as the store index and wire key.
///
/// The layout is `(x << 16) | (y & 0xFFFF)` interpreted as a signed 32-bit
/// integer, so the ordering of keys is x-major, then y.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfcellKey(pub i32);

impl HalfcellKey {
    /// Reinterpret the key as the unsigned 32-bit pattern written on the wire.
    pub const fn to_bits(self) -> u32 {
        self.0 as u32
    }

    /// Rebuild a key from its 32-bit wire pattern.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits as i32)
    }

    /// Unpack into a coordinate.
    pub const fn halfcell(self) -> Halfcell {
        let (x, y) = decode(self);
        Halfcell { x, y }
    }
}

impl core::fmt::Display for HalfcellKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (x, y) = decode(*self);
        write!(f, "({x}, {y})")
    }
}

/// Pack `(x, y)` into a key. Components alias modulo 2^16.
pub const fn encode(x: i32, y: i32) -> HalfcellKey {
    HalfcellKey(x.wrapping_shl(16) | (y & 0xFFFF))
}

/// Unpack a key into `(x, y)`, sign-extending both halves.
pub const fn decode(key: HalfcellKey) -> (i32, i32) {
    (key.0 >> 16, key.0.wrapping_shl(16) >> 16)
}

/// What a halfcell addresses, derived from the parity of its components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Site {
    /// Odd `x`, odd `y`: the center of a cell.
    Cell,
    /// Even `x`, odd `y`: the edge shared by two horizontally adjacent cells.
    VerticalEdge,
    /// Odd `x`, even `y`: the edge shared by two vertically adjacent cells.
    HorizontalEdge,
    /// Even `x`, even `y`: a grid vertex.
    Vertex,
}

impl core::fmt::Display for Site {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Cell => "cell",
            Self::VerticalEdge => "vedge",
            Self::HorizontalEdge => "hedge",
            Self::Vertex => "vertex",
        })
    }
}

/// Unpacked halfcell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Halfcell {
    /// Horizontal halfcell index.
    pub x: i32,
    /// Vertical halfcell index.
    pub y: i32,
}

impl Halfcell {
    /// Create a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Center of cell `(cx, cy)`. Wraps like [`encode`].
    pub const fn cell_center(cx: i32, cy: i32) -> Self {
        Self {
            x: cx.wrapping_mul(2).wrapping_add(1),
            y: cy.wrapping_mul(2).wrapping_add(1),
        }
    }

    /// Pack into a store key.
    pub const fn key(self) -> HalfcellKey {
        encode(self.x, self.y)
    }

    /// Parity class of this coordinate.
    pub const fn site(self) -> Site {
        match (self.x & 1 == 1, self.y & 1 == 1) {
            (true, true) => Site::Cell,
            (false, true) => Site::VerticalEdge,
            (true, false) => Site::HorizontalEdge,
            (false, false) => Site::Vertex,
        }
    }

    /// Shift by `(dx, dy)` halfcells, wrapping at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

impl From<HalfcellKey> for Halfcell {
    fn from(key: HalfcellKey) -> Self {
        key.halfcell()
    }
}

impl From<Halfcell> for HalfcellKey {
    fn from(hc: Halfcell) -> Self {
        hc.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn packs_x_high_and_y_low() {
        assert_eq!(encode(3, 5), HalfcellKey(0x0003_0005));
        assert_eq!(encode(0, -1), HalfcellKey(0x0000_FFFF));
        assert_eq!(encode(-1, 0), HalfcellKey(-65536));
        assert_eq!(decode(encode(-1, -1)), (-1, -1));
    }

    #[test]
    fn extremes_round_trip() {
        for &(x, y) in &[
            (i32::from(i16::MIN), i32::from(i16::MIN)),
            (i32::from(i16::MAX), i32::from(i16::MAX)),
            (i32::from(i16::MIN), i32::from(i16::MAX)),
            (0, 0),
        ] {
            assert_eq!(decode(encode(x, y)), (x, y));
        }
    }

    #[test]
    fn out_of_range_components_alias() {
        assert_eq!(decode(encode(65536 + 7, 2)), (7, 2));
        assert_eq!(decode(encode(4, 32768)), (4, -32768));
    }

    #[test]
    fn huge_offsets_alias_instead_of_overflowing() {
        let at = Halfcell::new(3, 5);
        assert_eq!(at.offset(i32::MAX, 0), Halfcell::new(i32::MIN + 2, 5));
        assert_eq!(decode(at.offset(i32::MAX, i32::MIN).key()), (2, 5));
        assert_eq!(Halfcell::cell_center(i32::MAX, 0).x, -1);
    }

    #[test]
    fn wire_bits_round_trip_negative_keys() {
        let key = encode(-300, 12);
        assert_eq!(HalfcellKey::from_bits(key.to_bits()), key);
    }

    #[test]
    fn site_follows_parity() {
        assert_eq!(Halfcell::cell_center(0, 0).site(), Site::Cell);
        assert_eq!(Halfcell::new(-1, -3).site(), Site::Cell);
        assert_eq!(Halfcell::new(2, 1).site(), Site::VerticalEdge);
        assert_eq!(Halfcell::new(1, 2).site(), Site::HorizontalEdge);
        assert_eq!(Halfcell::new(-2, 0).site(), Site::Vertex);
    }

    proptest! {
        #[test]
        fn coordinate_round_trip(x in i16::MIN..=i16::MAX, y in i16::MIN..=i16::MAX) {
            let (x, y) = (i32::from(x), i32::from(y));
            prop_assert_eq!(decode(encode(x, y)), (x, y));
            prop_assert_eq!(Halfcell::new(x, y).key().halfcell(), Halfcell::new(x, y));
        }
    }
}
