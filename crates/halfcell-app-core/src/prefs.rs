// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved editor preferences (palette + grid metrics).

use halfcell_core::{Bounds, Color};
use serde::{Deserialize, Serialize};

/// Config key under which [`EditorPrefs`] are stored.
pub const PREFS_KEY: &str = "editor_prefs";

/// Saved preferences for the diagram editor.
///
/// Missing fields fall back to their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPrefs {
    /// CSS colors indexed by [`Color`].
    pub palette: Vec<String>,
    /// Color new objects start with.
    pub default_color: Color,
    /// Grid geometry and overlay toggles.
    pub grid: GridPrefs,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            palette: vec!["#000000".into(), "#008000".into()],
            default_color: Color(0),
            grid: GridPrefs::default(),
        }
    }
}

impl EditorPrefs {
    /// CSS color for `color`, or `None` when the palette has no such entry.
    pub fn resolve(&self, color: Color) -> Option<&str> {
        self.palette.get(usize::from(color.0)).map(String::as_str)
    }
}

/// Grid geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPrefs {
    /// Pixels per halfcell.
    pub halfcell_px: u32,
    /// Draw grid lines under the diagram.
    pub show_gridlines: bool,
    /// Halfcells of margin around exported frames.
    pub frame_pad: u32,
}

impl Default for GridPrefs {
    fn default() -> Self {
        Self {
            halfcell_px: 20,
            show_gridlines: true,
            frame_pad: 1,
        }
    }
}

impl GridPrefs {
    /// Pixel view box `[x, y, width, height]` framing `frame` plus
    /// `frame_pad` halfcells on every side.
    pub fn view_box(&self, frame: Bounds) -> [i64; 4] {
        let px = i64::from(self.halfcell_px);
        let pad = i64::from(self.frame_pad);
        [
            px * (i64::from(frame.xmin) - pad),
            px * (i64::from(frame.ymin) - pad),
            px * (i64::from(frame.width()) + 2 * pad),
            px * (i64::from(frame.height()) + 2 * pad),
        ]
    }
}
