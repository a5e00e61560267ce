//! Palette item model.
//!
//! A [`PaletteItem`] is one placed element on the canvas. It owns its wrapped
//! content, a resize handle in its bottom-right corner, and a header label.
//! Geometry is kept in scene coordinates; the handle and label compute their
//! shapes in item-local coordinates from the item size.

use scriptpanel_core::constants::{DEFAULT_ITEM_COLUMNS, DEFAULT_ITEM_ROWS, HEADER_HEIGHT};
use scriptpanel_core::{DisplayInfo, Error, ItemId, PlacementInfo, Point, Rect, Result, Size};

use crate::display::{item_id_for, PaletteContent};
use crate::grid::{cell_size, snap_point, snap_size};

/// Approximate glyph width used to center header text.
const HEADER_CHAR_WIDTH: f64 = 6.0;

/// Triangular grip in the bottom-right corner of an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    size: f64,
}

impl ResizeHandle {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Triangle corners in item-local coordinates.
    pub fn polygon(&self, item_size: Size) -> [Point; 3] {
        let (w, h, s) = (item_size.width, item_size.height, self.size);
        [
            Point::new(w, h - s),
            Point::new(w, h),
            Point::new(w - s, h),
        ]
    }

    /// Returns true if the item-local point lies on the grip.
    pub fn contains(&self, local: Point, item_size: Size) -> bool {
        let left = item_size.width - self.size;
        let top = item_size.height - self.size;
        local.x >= left
            && local.y >= top
            && local.x <= item_size.width
            && local.y <= item_size.height
            && (local.x - left) + (local.y - top) >= self.size
    }
}

/// Text shown in the header strip above the content.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLabel {
    text: String,
    visible: bool,
}

impl HeaderLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Item-local origin of the text, horizontally centered.
    pub fn position(&self, item_width: f64) -> Point {
        let text_width = self.text.chars().count() as f64 * HEADER_CHAR_WIDTH;
        Point::new(((item_width - text_width) / 2.0).max(0.0), 0.0)
    }
}

/// What part of an item a scene point hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHit {
    Body,
    ResizeHandle,
}

/// One placed element on the palette.
#[derive(Debug)]
pub struct PaletteItem {
    id: ItemId,
    position: Point,
    size: Size,
    selected: bool,
    show_header: bool,
    handle: ResizeHandle,
    header: HeaderLabel,
    content: Box<dyn PaletteContent>,
}

impl PaletteItem {
    /// Creates an item of the default footprint at the origin.
    ///
    /// Content without a natural key is rejected as missing.
    pub fn new(
        id: impl Into<ItemId>,
        content: Box<dyn PaletteContent>,
        grid_size: u32,
    ) -> Result<Self> {
        let id = id.into();
        if content.natural_key().trim().is_empty() {
            return Err(Error::MissingWrappedContent {
                id: id.to_string(),
            });
        }
        if id.is_empty() {
            return Err(Error::invalid_argument("id", "item id must not be empty"));
        }

        let grid = cell_size(grid_size);
        let header = HeaderLabel::new(content.header_text());
        let mut item = Self {
            id,
            position: Point::default(),
            size: Size::new(
                grid * DEFAULT_ITEM_COLUMNS as f64,
                grid * DEFAULT_ITEM_ROWS as f64,
            ),
            selected: false,
            show_header: true,
            handle: ResizeHandle::new(grid),
            header,
            content,
        };
        item.relayout_content();
        Ok(item)
    }

    /// Creates an item whose id comes from the content.
    pub fn for_content(content: Box<dyn PaletteContent>, grid_size: u32) -> Result<Self> {
        let id = item_id_for(content.as_ref());
        Self::new(id, content, grid_size)
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn shows_header(&self) -> bool {
        self.show_header
    }

    pub fn handle(&self) -> &ResizeHandle {
        &self.handle
    }

    pub fn header(&self) -> &HeaderLabel {
        &self.header
    }

    pub fn content(&self) -> &dyn PaletteContent {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn PaletteContent {
        self.content.as_mut()
    }

    /// Swaps the wrapped content, keeping the item's geometry.
    pub fn replace_content(&mut self, content: Box<dyn PaletteContent>) {
        self.content = content;
        self.header.set_text(self.content.header_text());
        self.relayout_content();
    }

    /// The content's natural key, e.g. the script path.
    pub fn natural_key(&self) -> &str {
        self.content.natural_key()
    }

    /// Moves to `pos` snapped to the grid. Returns true if the position changed.
    pub fn set_position(&mut self, pos: Point, grid_size: u32) -> bool {
        let snapped = snap_point(pos, grid_size);
        if snapped == self.position {
            return false;
        }
        self.position = snapped;
        self.relayout_content();
        true
    }

    /// Resizes, optionally snapping. Each dimension is at least one grid cell.
    /// Returns true if the size changed.
    pub fn set_size(&mut self, size: Size, grid_size: u32, snap: bool) -> bool {
        let grid = cell_size(grid_size);
        let size = if snap { snap_size(size, grid_size) } else { size };
        let clamped = Size::new(size.width.max(grid), size.height.max(grid));
        if clamped == self.size {
            return false;
        }
        self.size = clamped;
        self.relayout_content();
        true
    }

    /// Restores saved geometry exactly, without snapping to the current grid.
    /// Fields missing from `placement` keep their current value.
    pub fn restore_placement(&mut self, placement: &PlacementInfo) {
        if let Some(pos) = placement.position() {
            self.position = Point::new(pos.x.max(0.0), pos.y.max(0.0));
        }
        if let Some(size) = placement.dimensions() {
            self.size = Size::new(size.width.max(1.0), size.height.max(1.0));
        }
        self.relayout_content();
    }

    pub fn placement(&self) -> PlacementInfo {
        PlacementInfo::new(self.position, self.size)
    }

    /// Shows or hides the header strip.
    pub fn set_show_header(&mut self, show: bool) {
        self.show_header = show;
        self.header.visible = show;
        self.relayout_content();
    }

    /// Adopts a new grid size. Only the handle changes; the item does not move.
    pub fn set_grid_size(&mut self, grid_size: u32) {
        self.handle.set_size(cell_size(grid_size));
    }

    /// Scene rectangle available to the wrapped content.
    pub fn content_rect(&self) -> Rect {
        let header = if self.show_header { HEADER_HEIGHT } else { 0.0 };
        Rect::new(
            self.position.x,
            self.position.y + header,
            self.size.width,
            (self.size.height - header).max(0.0),
        )
    }

    /// Hit test in scene coordinates.
    pub fn hit_test(&self, scene: Point) -> Option<ItemHit> {
        if !self.rect().contains(&scene) {
            return None;
        }
        let local = Point::new(scene.x - self.position.x, scene.y - self.position.y);
        if self.handle.contains(local, self.size) {
            Some(ItemHit::ResizeHandle)
        } else {
            Some(ItemHit::Body)
        }
    }

    /// Display state of the content, if it supports one.
    pub fn display_info(&self) -> Option<DisplayInfo> {
        self.content.as_displayable().map(|d| d.display_info())
    }

    /// Applies display state to the content. Returns false if the content has none.
    pub fn set_display_from_info(&mut self, info: &DisplayInfo) -> bool {
        let applied = match self.content.as_displayable_mut() {
            Some(displayable) => {
                displayable.set_display_from_info(info);
                true
            }
            None => false,
        };
        if applied {
            self.header.set_text(self.content.header_text());
        }
        applied
    }

    fn relayout_content(&mut self) {
        let rect = self.content_rect();
        self.content.set_geometry(rect);
    }
}
