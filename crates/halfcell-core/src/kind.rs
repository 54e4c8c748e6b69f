// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed set of object kinds and their payloads.
//!
//! Every placeable object is a [`Payload`] variant; the variant *is* the kind.
//! Codecs and renderers match on it exhaustively, so adding a kind fails to
//! compile until every consumer handles it.

/// Discriminant of an object kind, shared by the store and the wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ObjectKind {
    /// Filled cell.
    Surface = 0,
    /// Line between adjacent cell centers.
    Line = 1,
    /// Styled segment along a grid edge or between cell centers.
    Edge = 2,
    /// Stack of glyph shapes at a point.
    Shape = 3,
    /// Short text label.
    Text = 4,
}

impl ObjectKind {
    /// Every kind, in tag order.
    pub const ALL: [Self; 5] = [
        Self::Surface,
        Self::Line,
        Self::Edge,
        Self::Shape,
        Self::Text,
    ];

    /// Numeric tag used on the wire.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a kind by wire tag.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Surface),
            1 => Some(Self::Line),
            2 => Some(Self::Edge),
            3 => Some(Self::Shape),
            4 => Some(Self::Text),
            _ => None,
        }
    }

    /// Lowercase display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Line => "line",
            Self::Edge => "edge",
            Self::Shape => "shape",
            Self::Text => "text",
        }
    }
}

impl core::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Index into the editor palette.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(pub u8);

/// Decoration drawn at the head of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Head {
    /// Plain segment.
    #[default]
    None = 0,
    /// Open arrowhead.
    Arrow = 1,
}

impl Head {
    /// Numeric code used on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a head by its numeric code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Arrow),
            _ => None,
        }
    }
}

/// Style of an edge object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSpec {
    /// `true` when the segment follows a grid edge, `false` when it joins
    /// cell centers. Decides the segment's orientation at a given halfcell.
    pub is_edge: bool,
    /// Stroke color.
    pub color: Color,
    /// Stroke thickness multiplier (0..=7).
    pub thickness: u8,
    /// Head decoration.
    pub head: Head,
}

/// Glyph drawn by a shape object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum Shape {
    /// Circle.
    Circle = 0,
    /// Axis-aligned square.
    Square = 1,
    /// Pennant flag.
    Flag = 2,
    /// Five-pointed star.
    Star = 3,
}

impl Shape {
    /// Numeric code used on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a shape by its numeric code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Circle),
            1 => Some(Self::Square),
            2 => Some(Self::Flag),
            3 => Some(Self::Star),
            _ => None,
        }
    }
}

/// One glyph in a shape stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeSpec {
    /// Glyph.
    pub shape: Shape,
    /// Size in twelfths of a cell (0..=15).
    pub size: u8,
    /// Fill color; `None` is transparent.
    pub fill: Option<Color>,
    /// Outline color; `None` is transparent.
    pub outline: Option<Color>,
}

/// Payload of a placed object. The variant determines the [`ObjectKind`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Payload {
    /// Filled cell.
    Surface {
        /// Fill color.
        color: Color,
    },
    /// Center-to-center line.
    Line {
        /// Stroke color.
        color: Color,
    },
    /// Styled edge.
    Edge {
        /// Style.
        spec: EdgeSpec,
        /// Rotate the segment half a turn (flips the head).
        reversed: bool,
    },
    /// Shapes drawn bottom to top.
    Shape {
        /// Glyph stack.
        specs: Vec<ShapeSpec>,
    },
    /// Text label.
    Text {
        /// Label contents.
        text: String,
    },
}

impl Payload {
    /// Kind of this payload.
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Surface { .. } => ObjectKind::Surface,
            Self::Line { .. } => ObjectKind::Line,
            Self::Edge { .. } => ObjectKind::Edge,
            Self::Shape { .. } => ObjectKind::Shape,
            Self::Text { .. } => ObjectKind::Text,
        }
    }

    /// Surface payload.
    pub const fn surface(color: u8) -> Self {
        Self::Surface {
            color: Color(color),
        }
    }

    /// Line payload.
    pub const fn line(color: u8) -> Self {
        Self::Line {
            color: Color(color),
        }
    }

    /// Text payload.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}
