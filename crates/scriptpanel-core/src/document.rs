//! Persisted layout document model.
//!
//! One [`LayoutDocument`] is stored per named layout. Every field has a serde
//! default so that older or hand-edited files load, and unknown keys are
//! ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{DEFAULT_GRID_COLOR, DEFAULT_GRID_SIZE};
use crate::types::{Point, Rgb, Size};

/// Stable identity of a placed palette item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an id from a natural key such as a script path.
    pub fn from_natural_key(key: &str) -> Self {
        Self(script_basename(key).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Returns the file name component of a script path.
///
/// Both `/` and `\` separate components, so paths saved on Windows resolve
/// to the same basename on every platform.
pub fn script_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Returns the extension of a script path including the leading dot, lowercased.
pub fn script_extension(path: &str) -> Option<String> {
    let name = script_basename(path);
    match name.rfind('.') {
        Some(index) if index > 0 => Some(name[index..].to_ascii_lowercase()),
        _ => None,
    }
}

/// Per-item visual overrides. `None` means "use the item default".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayInfo {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub icon_path: Option<String>,
}

impl DisplayInfo {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }
}

/// Saved geometry of one item.
///
/// Either field may be missing from a hand-edited file; the item then keeps
/// its current value for that field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<(f64, f64)>,
}

impl PlacementInfo {
    pub fn new(pos: Point, size: Size) -> Self {
        Self {
            pos: Some((pos.x, pos.y)),
            size: Some((size.width, size.height)),
        }
    }

    pub fn position(&self) -> Option<Point> {
        self.pos.map(Point::from)
    }

    pub fn dimensions(&self) -> Option<Size> {
        self.size.map(Size::from)
    }
}

/// Canvas-wide presentation settings stored with a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    #[serde(default = "default_show_headers")]
    pub show_headers: bool,
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    #[serde(default = "default_grid_background_color")]
    pub grid_background_color: Rgb,
    /// Row-major 3x3 affine view matrix: `[m11, m12, m13, m21, m22, m23, dx, dy, m33]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_transform: Option<[f64; 9]>,
}

fn default_show_headers() -> bool {
    true
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_grid_background_color() -> Rgb {
    DEFAULT_GRID_COLOR
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            show_headers: default_show_headers(),
            grid_size: default_grid_size(),
            grid_background_color: default_grid_background_color(),
            viewport_transform: None,
        }
    }
}

/// A named layout: item placements, per-script display info, and canvas settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    #[serde(rename = "__meta_data__", default)]
    pub meta_data: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "script_display", default)]
    pub scripts_display: BTreeMap<String, DisplayInfo>,
    #[serde(default)]
    pub palette_layout: BTreeMap<String, PlacementInfo>,
    #[serde(default)]
    pub palette_display: CanvasSettings,
}

impl LayoutDocument {
    /// Returns true if the layout holds no scripts and no placements.
    pub fn is_empty(&self) -> bool {
        self.scripts_display.is_empty() && self.palette_layout.is_empty()
    }

    pub fn placement(&self, id: &ItemId) -> Option<&PlacementInfo> {
        self.palette_layout.get(id.as_str())
    }
}
