// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Text renderings of stamps for the terminal.

use std::fmt;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use halfcell_app_core::prefs::{EditorPrefs, GridPrefs};
use halfcell_codec::{deserialize, serialize};
use halfcell_core::{Bounds, Color, Head, Item, ObjectKind, Payload, ShapeSpec, Site, Stamp};

/// Decode a base64 stamp (surrounding whitespace ignored).
pub fn decode_base64(text: &str) -> Result<Stamp> {
    let bytes = STANDARD
        .decode(text.trim())
        .context("stamp is not valid base64")?;
    deserialize(&bytes).context("failed to deserialize stamp")
}

/// Parse a JSON stamp and return its base64 wire form.
pub fn encode_json(json: &str) -> Result<String> {
    let stamp: Stamp = serde_json::from_str(json).context("failed to parse stamp JSON")?;
    let bytes = serialize(&stamp).context("failed to serialize stamp")?;
    Ok(STANDARD.encode(bytes))
}

/// One listed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Halfcell x.
    pub x: i32,
    /// Halfcell y.
    pub y: i32,
    /// What the position addresses.
    pub site: Site,
    /// Object kind.
    pub kind: ObjectKind,
    /// Human-readable payload.
    pub detail: String,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6} {:>6}  {:<6}  {:<7}  {}",
            self.x, self.y, self.site, self.kind, self.detail
        )
    }
}

/// List `stamp` in wire order, resolving colors through `prefs`.
pub fn inspect(stamp: &Stamp, prefs: &EditorPrefs) -> Vec<Record> {
    stamp.iter().map(|item| record(item, prefs)).collect()
}

fn record(item: &Item, prefs: &EditorPrefs) -> Record {
    let at = item.at();
    Record {
        x: at.x,
        y: at.y,
        site: at.site(),
        kind: item.kind(),
        detail: describe(&item.payload, prefs),
    }
}

fn color(c: Color, prefs: &EditorPrefs) -> String {
    match prefs.resolve(c) {
        Some(css) => format!("{} ({css})", c.0),
        None => format!("{} (unmapped)", c.0),
    }
}

fn optional_color(c: Option<Color>, prefs: &EditorPrefs) -> String {
    c.map_or_else(|| "none".to_owned(), |c| color(c, prefs))
}

fn glyph(spec: &ShapeSpec, prefs: &EditorPrefs) -> String {
    format!(
        "{:?} size {} fill {} outline {}",
        spec.shape,
        spec.size,
        optional_color(spec.fill, prefs),
        optional_color(spec.outline, prefs)
    )
    .to_lowercase()
}

/// One-line description of a payload.
pub fn describe(payload: &Payload, prefs: &EditorPrefs) -> String {
    match payload {
        Payload::Surface { color: c } | Payload::Line { color: c } => {
            format!("color {}", color(*c, prefs))
        }
        Payload::Edge { spec, reversed } => {
            let mut out = format!(
                "{} color {} thickness {}",
                if spec.is_edge { "grid" } else { "center" },
                color(spec.color, prefs),
                spec.thickness
            );
            if spec.head == Head::Arrow {
                out.push_str(" arrow");
            }
            if *reversed {
                out.push_str(" reversed");
            }
            out
        }
        Payload::Shape { specs } if specs.is_empty() => "no glyphs".to_owned(),
        Payload::Shape { specs } => specs
            .iter()
            .map(|spec| glyph(spec, prefs))
            .collect::<Vec<_>>()
            .join("; "),
        Payload::Text { text } => format!("{text:?}"),
    }
}

/// Extent of a stamp and the frame an export would draw around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Tight bounds of every item.
    pub bounds: Bounds,
    /// `bounds` widened to even (vertex) coordinates.
    pub aligned: Bounds,
    /// Pixel view box `[x, y, width, height]` around `aligned`.
    pub view_box: [i64; 4],
}

/// Frame `stamp` with `grid` metrics; `None` for an empty stamp.
pub fn frame(stamp: &Stamp, grid: &GridPrefs) -> Option<Frame> {
    let bounds = stamp.bounds()?;
    let aligned = bounds.grid_aligned();
    Some(Frame {
        bounds,
        aligned,
        view_box: grid.view_box(aligned),
    })
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bounds;
        let a = self.aligned;
        let [x, y, w, h] = self.view_box;
        writeln!(f, "bounds   x {}..={}  y {}..={}", b.xmin, b.xmax, b.ymin, b.ymax)?;
        writeln!(f, "frame    x {}..={}  y {}..={}", a.xmin, a.xmax, a.ymin, a.ymax)?;
        write!(f, "viewBox  {x} {y} {w} {h}")
    }
}
