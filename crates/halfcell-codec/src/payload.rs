// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-kind payload layouts.
//!
//! | Kind | Bits (MSB first) |
//! |---|---|
//! | surface, line | color:6 |
//! | edge | is_edge:1 color:6 thickness:3 head:2 reversed:1 |
//! | shape | count:4, then per glyph: shape:2 size:4 has_fill:1 \[fill:6\] has_outline:1 \[outline:6\] |
//! | text | byte_len:8, then byte_len bytes |

use halfcell_core::{Color, EdgeSpec, Head, ObjectKind, Payload, Shape, ShapeSpec};

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, EncodeError};

/// Width of a palette index.
pub const COLOR_BITS: u32 = 6;
/// Width of an edge thickness.
pub const THICKNESS_BITS: u32 = 3;
/// Width of an edge head code.
pub const HEAD_BITS: u32 = 2;
/// Width of a shape stack's glyph count.
pub const SHAPE_COUNT_BITS: u32 = 4;
/// Width of a glyph code.
pub const SHAPE_BITS: u32 = 2;
/// Width of a glyph size.
pub const SIZE_BITS: u32 = 4;
/// Width of a text label's byte count.
pub const TEXT_LEN_BITS: u32 = 8;

const fn max_for(bits: u32) -> u32 {
    (1 << bits) - 1
}

/// Append `payload`'s fields to `w`.
///
/// Every field is range-checked before anything is written, so a failed
/// call leaves `w` untouched.
pub fn write_payload(w: &mut BitWriter, payload: &Payload) -> Result<(), EncodeError> {
    check_payload(payload)?;
    match payload {
        Payload::Surface { color } | Payload::Line { color } => {
            w.write(COLOR_BITS, u32::from(color.0));
        }
        Payload::Edge { spec, reversed } => {
            w.write_bool(spec.is_edge);
            w.write(COLOR_BITS, u32::from(spec.color.0));
            w.write(THICKNESS_BITS, u32::from(spec.thickness));
            w.write(HEAD_BITS, u32::from(spec.head.code()));
            w.write_bool(*reversed);
        }
        Payload::Shape { specs } => {
            w.write(SHAPE_COUNT_BITS, specs.len() as u32);
            for spec in specs {
                w.write(SHAPE_BITS, u32::from(spec.shape.code()));
                w.write(SIZE_BITS, u32::from(spec.size));
                write_optional_color(w, spec.fill);
                write_optional_color(w, spec.outline);
            }
        }
        Payload::Text { text } => {
            w.write(TEXT_LEN_BITS, text.len() as u32);
            for byte in text.bytes() {
                w.write(8, u32::from(byte));
            }
        }
    }
    Ok(())
}

fn write_optional_color(w: &mut BitWriter, color: Option<Color>) {
    w.write_bool(color.is_some());
    if let Some(color) = color {
        w.write(COLOR_BITS, u32::from(color.0));
    }
}

fn check_color(kind: ObjectKind, color: Color) -> Result<(), EncodeError> {
    if u32::from(color.0) > max_for(COLOR_BITS) {
        return Err(EncodeError::ColorOutOfRange {
            kind,
            value: color.0,
        });
    }
    Ok(())
}

fn check_payload(payload: &Payload) -> Result<(), EncodeError> {
    let kind = payload.kind();
    match payload {
        Payload::Surface { color } | Payload::Line { color } => check_color(kind, *color),
        Payload::Edge { spec, .. } => {
            check_color(kind, spec.color)?;
            if u32::from(spec.thickness) > max_for(THICKNESS_BITS) {
                return Err(EncodeError::ThicknessOutOfRange {
                    value: spec.thickness,
                });
            }
            Ok(())
        }
        Payload::Shape { specs } => {
            if specs.len() > max_for(SHAPE_COUNT_BITS) as usize {
                return Err(EncodeError::TooManyShapes { count: specs.len() });
            }
            for spec in specs {
                if u32::from(spec.size) > max_for(SIZE_BITS) {
                    return Err(EncodeError::SizeOutOfRange { value: spec.size });
                }
                for color in spec.fill.into_iter().chain(spec.outline) {
                    check_color(kind, color)?;
                }
            }
            Ok(())
        }
        Payload::Text { text } => {
            if text.len() > max_for(TEXT_LEN_BITS) as usize {
                return Err(EncodeError::TextTooLong { len: text.len() });
            }
            Ok(())
        }
    }
}

/// Read a `kind` payload from `r`.
///
/// Past the end of the data fields read as zero; callers check
/// [`BitReader::in_bounds`] before trusting the result.
pub fn read_payload(r: &mut BitReader<'_>, kind: ObjectKind) -> Result<Payload, DecodeError> {
    let payload = match kind {
        ObjectKind::Surface => Payload::Surface {
            color: read_color(r),
        },
        ObjectKind::Line => Payload::Line {
            color: read_color(r),
        },
        ObjectKind::Edge => {
            let is_edge = r.read_bool();
            let color = read_color(r);
            let thickness = r.read(THICKNESS_BITS) as u8;
            let code = r.read(HEAD_BITS);
            let head = Head::from_code(code as u8).ok_or(DecodeError::InvalidEnum {
                kind,
                field: "head",
                value: code,
            })?;
            let reversed = r.read_bool();
            Payload::Edge {
                spec: EdgeSpec {
                    is_edge,
                    color,
                    thickness,
                    head,
                },
                reversed,
            }
        }
        ObjectKind::Shape => {
            let count = r.read(SHAPE_COUNT_BITS) as usize;
            let mut specs = Vec::with_capacity(count);
            for _ in 0..count {
                let code = r.read(SHAPE_BITS);
                let shape = Shape::from_code(code as u8).ok_or(DecodeError::InvalidEnum {
                    kind,
                    field: "shape",
                    value: code,
                })?;
                let size = r.read(SIZE_BITS) as u8;
                let fill = read_optional_color(r);
                let outline = read_optional_color(r);
                specs.push(ShapeSpec {
                    shape,
                    size,
                    fill,
                    outline,
                });
            }
            Payload::Shape { specs }
        }
        ObjectKind::Text => {
            let len = r.read(TEXT_LEN_BITS) as usize;
            let bytes: Vec<u8> = (0..len).map(|_| r.read(8) as u8).collect();
            Payload::Text {
                text: String::from_utf8_lossy(&bytes).into_owned(),
            }
        }
    };
    Ok(payload)
}

fn read_color(r: &mut BitReader<'_>) -> Color {
    Color(r.read(COLOR_BITS) as u8)
}

fn read_optional_color(r: &mut BitReader<'_>) -> Option<Color> {
    r.read_bool().then(|| read_color(r))
}
