//! Grid snapping and grid-line generation.
//!
//! Snapping rounds to the nearest multiple of the grid size using
//! round-half-away-from-zero (`f64::round`), then clamps to zero so that
//! nothing can be placed above or left of the scene origin. A grid size of
//! zero is treated as one.

use scriptpanel_core::constants::{DEFAULT_GRID_COLOR, GRID_LINE_COLOR, GRID_LINE_WIDTH};
use scriptpanel_core::{Point, Rect, Rgb, Size};

/// Grid size as a float, never below one.
pub fn cell_size(grid_size: u32) -> f64 {
    grid_size.max(1) as f64
}

/// Snaps a single coordinate.
pub fn snap_value(value: f64, grid_size: u32) -> f64 {
    let grid = cell_size(grid_size);
    ((value / grid).round() * grid).max(0.0)
}

/// Snaps a point to the nearest grid intersection, clamped to the positive quadrant.
pub fn snap_point(point: Point, grid_size: u32) -> Point {
    Point::new(snap_value(point.x, grid_size), snap_value(point.y, grid_size))
}

/// Snaps each dimension of a size independently.
pub fn snap_size(size: Size, grid_size: u32) -> Size {
    Size::new(
        snap_value(size.width, grid_size),
        snap_value(size.height, grid_size),
    )
}

/// Returns true if `value` already sits on the grid.
pub fn is_on_grid(value: f64, grid_size: u32) -> bool {
    snap_value(value, grid_size) == value
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// One grid line in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub orientation: Orientation,
    pub start: Point,
    pub end: Point,
}

/// Lines covering `visible`, vertical lines first.
///
/// Vertical lines sit at `x = k * grid` for every `k` with
/// `visible.left() <= x <= visible.right()` and span the full visible height;
/// horizontal lines follow the same rule on the y axis.
pub fn grid_lines(visible: &Rect, grid_size: u32) -> Vec<GridLine> {
    let grid = cell_size(grid_size);
    let mut lines = Vec::new();

    let mut k = (visible.left() / grid).ceil();
    while k * grid <= visible.right() {
        let x = k * grid;
        lines.push(GridLine {
            orientation: Orientation::Vertical,
            start: Point::new(x, visible.top()),
            end: Point::new(x, visible.bottom()),
        });
        k += 1.0;
    }

    let mut k = (visible.top() / grid).ceil();
    while k * grid <= visible.bottom() {
        let y = k * grid;
        lines.push(GridLine {
            orientation: Orientation::Horizontal,
            start: Point::new(visible.left(), y),
            end: Point::new(visible.right(), y),
        });
        k += 1.0;
    }

    lines
}

/// Colors and stroke used to paint the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub background: Rgb,
    pub line_color: Rgb,
    pub line_width: f64,
}

impl GridStyle {
    pub fn with_background(background: Rgb) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_GRID_COLOR,
            line_color: GRID_LINE_COLOR,
            line_width: GRID_LINE_WIDTH,
        }
    }
}
