// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Codec error types.

use halfcell_core::ObjectKind;
use thiserror::Error;

/// A payload field does not fit its wire width.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Palette index wider than the color field.
    #[error("{kind}: color {value} does not fit in 6 bits")]
    ColorOutOfRange {
        /// Kind being encoded.
        kind: ObjectKind,
        /// Offending color.
        value: u8,
    },
    /// Edge thickness wider than its field.
    #[error("edge: thickness {value} does not fit in 3 bits")]
    ThicknessOutOfRange {
        /// Offending thickness.
        value: u8,
    },
    /// Shape size wider than its field.
    #[error("shape: size {value} does not fit in 4 bits")]
    SizeOutOfRange {
        /// Offending size.
        value: u8,
    },
    /// More glyphs than the count field can express.
    #[error("shape: {count} glyphs exceed the limit of 15")]
    TooManyShapes {
        /// Glyphs in the stack.
        count: usize,
    },
    /// Label longer than its length prefix allows.
    #[error("text: {len} bytes exceed the limit of 255")]
    TextTooLong {
        /// UTF-8 length of the label.
        len: usize,
    },
}

/// Input that is well-formed enough to read but not valid.
///
/// Truncated input is not an error: decoding stops at the last complete
/// record instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Leading version bit is not a version this codec reads.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),
    /// Kind tag names no known kind.
    #[error("unknown object kind tag {tag}")]
    UnknownKind {
        /// Tag as read.
        tag: u32,
    },
    /// Enum field holds a code with no meaning.
    #[error("{kind}: invalid {field} code {value}")]
    InvalidEnum {
        /// Kind being decoded.
        kind: ObjectKind,
        /// Field name.
        field: &'static str,
        /// Code as read.
        value: u32,
    },
}
