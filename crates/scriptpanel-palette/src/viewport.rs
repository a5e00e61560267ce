//! Viewport and coordinate transformation for the palette view.
//!
//! Converts between screen coordinates (view pixels) and scene coordinates
//! (where items live). Both use a top-left origin with +Y down, so the mapping
//! is a uniform scale plus a translation:
//!
//! ```text
//! screen = scene * zoom + pan
//! scene  = (screen - pan) / zoom
//! ```
//!
//! Zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.

use std::fmt;

use scriptpanel_core::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use scriptpanel_core::{Point, Rect};

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    view_width: f64,
    view_height: f64,
}

impl Viewport {
    /// Creates a viewport of the given view size at 100% with no pan.
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            view_width,
            view_height,
        }
    }

    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    /// Sets the view dimensions (typically called when the panel resizes).
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width;
        self.view_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Zooms in by one wheel step.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    /// Zooms out by one wheel step.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta in screen pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }

    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom + self.pan_x,
            scene.y * self.zoom + self.pan_y,
        )
    }

    /// Zooms to `new_zoom` keeping the scene point under `screen_anchor` fixed.
    pub fn zoom_to_point(&mut self, screen_anchor: Point, new_zoom: f64) {
        let scene = self.screen_to_scene(screen_anchor);
        self.set_zoom(new_zoom);
        self.pan_x = screen_anchor.x - scene.x * self.zoom;
        self.pan_y = screen_anchor.y - scene.y * self.zoom;
    }

    /// Applies `notches` wheel steps at `screen_anchor`; negative zooms out.
    pub fn zoom_steps_at(&mut self, screen_anchor: Point, notches: f64) {
        self.zoom_to_point(screen_anchor, self.zoom * ZOOM_STEP.powf(notches));
    }

    /// Scene rectangle currently visible.
    pub fn visible_rect(&self) -> Rect {
        let top_left = self.screen_to_scene(Point::new(0.0, 0.0));
        Rect::new(
            top_left.x,
            top_left.y,
            self.view_width / self.zoom,
            self.view_height / self.zoom,
        )
    }

    /// Row-major 3x3 affine matrix `[zoom, 0, 0, 0, zoom, 0, pan_x, pan_y, 1]`.
    pub fn transform(&self) -> [f64; 9] {
        [
            self.zoom, 0.0, 0.0, 0.0, self.zoom, 0.0, self.pan_x, self.pan_y, 1.0,
        ]
    }

    /// Restores zoom and pan from a matrix produced by [`Viewport::transform`].
    ///
    /// Only the uniform scale (`m11`) and translation are used; shear and
    /// non-uniform scale are ignored.
    pub fn set_transform(&mut self, matrix: &[f64; 9]) {
        self.set_zoom(matrix[0]);
        if matrix[6].is_finite() && matrix[7].is_finite() {
            self.set_pan(matrix[6], matrix[7]);
        }
    }

    /// Resets to 100% with no pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Viewport(zoom: {:.2}x, pan: ({:.2}, {:.2}), view: {}x{})",
            self.zoom, self.pan_x, self.pan_y, self.view_width, self.view_height
        )
    }
}
