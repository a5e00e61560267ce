//! Palette canvas: the interactive surface that hosts palette items.
//!
//! The canvas keeps items in insertion order (later items stack on top),
//! along with the grid settings, header visibility, the view transform, and
//! the pointer interaction in progress. Pointer handling lives in `input`.

mod input;
pub mod types;

pub use types::*;

use scriptpanel_core::constants::{DEFAULT_GRID_COLOR, DEFAULT_GRID_SIZE};
use scriptpanel_core::{DisplayInfo, Error, ItemId, Point, Rect, Result, Rgb, Size};
use tracing::{debug, info};

use crate::display::{item_id_for, PaletteContent};
use crate::grid::{self, snap_point, GridLine, GridStyle};
use crate::item::{ItemHit, PaletteItem};
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;

type EventListener = Box<dyn Fn(&PaletteEvent)>;

/// Canvas for arranging script launchers on a grid.
pub struct PaletteCanvas {
    items: Vec<PaletteItem>,
    selection_manager: SelectionManager,
    grid_size: u32,
    grid_color: Rgb,
    show_headers: bool,
    viewport: Viewport,
    cursor: Point,
    interaction: InteractionState,
    space_held: bool,
    modified: bool,
    listeners: Vec<EventListener>,
}

impl PaletteCanvas {
    /// Creates an empty canvas with the default grid.
    pub fn new() -> Self {
        Self::with_size(800.0, 600.0)
    }

    /// Creates an empty canvas for a view of the given size.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            items: Vec::new(),
            selection_manager: SelectionManager::new(),
            grid_size: DEFAULT_GRID_SIZE,
            grid_color: DEFAULT_GRID_COLOR,
            show_headers: true,
            viewport: Viewport::new(width, height),
            cursor: Point::default(),
            interaction: InteractionState::Idle,
            space_held: false,
            modified: false,
            listeners: Vec::new(),
        }
    }

    /// Registers a callback for canvas changes.
    pub fn on_event<F>(&mut self, callback: F)
    where
        F: Fn(&PaletteEvent) + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    pub(crate) fn emit(&mut self, event: PaletteEvent) {
        if event.modifies_layout() {
            self.modified = true;
        }
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// True when the canvas differs from what was last loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Marks the current state as persisted.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn items(&self) -> impl Iterator<Item = &PaletteItem> {
        self.items.iter()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item(&self, id: &ItemId) -> Option<&PaletteItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut PaletteItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Topmost item under a scene point, and which part of it was hit.
    pub fn item_at(&self, scene: Point) -> Option<(&PaletteItem, ItemHit)> {
        self.items
            .iter()
            .rev()
            .find_map(|item| item.hit_test(scene).map(|hit| (item, hit)))
    }

    /// Last pointer position in scene coordinates.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Updates the pointer position from screen coordinates.
    pub fn set_cursor_screen(&mut self, screen: Point) {
        self.cursor = self.viewport.screen_to_scene(screen);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Adds an item, adopting the canvas grid and header settings.
    ///
    /// Ids are unique per canvas; adding a duplicate id is rejected.
    pub fn add_item(&mut self, mut item: PaletteItem) -> Result<ItemId> {
        if self.contains(item.id()) {
            return Err(Error::invalid_argument(
                "id",
                format!("'{}' is already on the palette", item.id()),
            ));
        }
        item.set_grid_size(self.grid_size);
        item.set_show_header(self.show_headers);
        let id = item.id().clone();
        debug!("Added palette item '{}' at {}", id, item.position());
        self.items.push(item);
        self.emit(PaletteEvent::ItemAdded(id.clone()));
        Ok(id)
    }

    /// Wraps `content` in a new item placed at the snapped pointer position.
    pub fn add_content(&mut self, content: Box<dyn PaletteContent>) -> Result<ItemId> {
        let mut item = PaletteItem::for_content(content, self.grid_size)?;
        item.set_position(self.cursor, self.grid_size);
        self.add_item(item)
    }

    /// Accepts a drop from the script browser.
    ///
    /// The browser's current selection is pulled and the first path becomes a
    /// new item at the pointer. An empty selection does nothing. If the
    /// script is already on the palette, that item is selected instead.
    pub fn handle_drop<F>(
        &mut self,
        browser: &dyn ScriptBrowser,
        create: F,
    ) -> Result<Option<ItemId>>
    where
        F: FnOnce(&str) -> Box<dyn PaletteContent>,
    {
        let paths = browser.selected_script_paths();
        let Some(path) = paths.first() else {
            debug!("Drop ignored: browser has no selection");
            return Ok(None);
        };

        let content = create(path.as_str());
        let id = item_id_for(content.as_ref());
        if self.contains(&id) {
            debug!("'{}' is already on the palette, selecting it", id);
            self.select_only(&id);
            return Ok(Some(id));
        }
        self.add_content(content).map(Some)
    }

    /// Removes every selected item. There is no undo.
    pub fn remove_selected_items(&mut self) -> Vec<ItemId> {
        let removed: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.id().clone())
            .collect();
        if removed.is_empty() {
            return removed;
        }
        self.items.retain(|item| !item.is_selected());
        self.selection_manager.retain_existing(&self.items);
        self.emit(PaletteEvent::ItemsRemoved(removed.clone()));
        removed
    }

    /// Removes every item and ends any interaction.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selection_manager = SelectionManager::new();
        self.interaction = InteractionState::Idle;
        self.emit(PaletteEvent::Cleared);
    }

    /// Selected items in stacking order.
    pub fn selected_items(&self) -> impl Iterator<Item = &PaletteItem> {
        self.items.iter().filter(|item| item.is_selected())
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selection_manager.selected_ids(&self.items)
    }

    pub fn selected_count(&self) -> usize {
        self.selection_manager.selected_count(&self.items)
    }

    pub fn primary_selection(&self) -> Option<&ItemId> {
        self.selection_manager.primary()
    }

    pub fn select_only(&mut self, id: &ItemId) -> bool {
        let changed = self.selection_manager.select_only(&mut self.items, id);
        if changed {
            self.emit_selection();
        }
        changed
    }

    /// Toggles one item, keeping the rest of the selection.
    pub fn select_additive(&mut self, id: &ItemId) -> Option<bool> {
        let state = self.selection_manager.toggle(&mut self.items, id);
        if state.is_some() {
            self.emit_selection();
        }
        state
    }

    /// Selects the topmost item at a scene point.
    pub fn select_at(&mut self, scene: Point, multi: bool) -> Option<ItemId> {
        let hit = self
            .selection_manager
            .select_at(&mut self.items, &scene, multi);
        self.emit_selection();
        hit
    }

    /// Selects every item intersecting `rect`, replacing the selection.
    pub fn select_in_rect(&mut self, rect: &Rect) -> usize {
        let count = self
            .selection_manager
            .select_in_rect(&mut self.items, rect, &[]);
        self.emit_selection();
        count
    }

    pub fn select_all(&mut self) {
        self.selection_manager.select_all(&mut self.items);
        self.emit_selection();
    }

    pub fn deselect_all(&mut self) {
        self.selection_manager.deselect_all(&mut self.items);
        self.emit_selection();
    }

    fn emit_selection(&mut self) {
        let ids = self.selected_ids();
        self.emit(PaletteEvent::SelectionChanged(ids));
    }

    /// Moves an item to a scene position, snapped to the grid.
    pub fn move_item(&mut self, id: &ItemId, pos: Point) -> bool {
        let grid_size = self.grid_size;
        let moved = self
            .item_mut(id)
            .is_some_and(|item| item.set_position(pos, grid_size));
        if moved {
            self.emit(PaletteEvent::ItemMoved(id.clone()));
        }
        moved
    }

    /// Resizes an item, snapped to the grid.
    pub fn resize_item(&mut self, id: &ItemId, size: Size) -> bool {
        let grid_size = self.grid_size;
        let resized = self
            .item_mut(id)
            .is_some_and(|item| item.set_size(size, grid_size, true));
        if resized {
            self.emit(PaletteEvent::ItemResized(id.clone()));
        }
        resized
    }

    /// Applies display overrides to one item's content.
    pub fn set_item_display(&mut self, id: &ItemId, info: &DisplayInfo) -> bool {
        let applied = self
            .item_mut(id)
            .is_some_and(|item| item.set_display_from_info(info));
        if applied {
            self.emit(PaletteEvent::DisplayChanged);
        }
        applied
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Changes the grid. Existing items keep their positions and sizes.
    pub fn set_grid_size(&mut self, grid_size: u32) {
        let grid_size = grid_size.max(1);
        if grid_size == self.grid_size {
            return;
        }
        info!("Grid size {} -> {}", self.grid_size, grid_size);
        self.grid_size = grid_size;
        for item in &mut self.items {
            item.set_grid_size(grid_size);
        }
        self.emit(PaletteEvent::DisplayChanged);
    }

    pub fn grid_color(&self) -> Rgb {
        self.grid_color
    }

    /// Sets the background color; `None` restores the default.
    pub fn set_grid_color(&mut self, color: Option<Rgb>) {
        let color = color.unwrap_or(DEFAULT_GRID_COLOR);
        if color == self.grid_color {
            return;
        }
        self.grid_color = color;
        self.emit(PaletteEvent::DisplayChanged);
    }

    pub fn reset_grid_size(&mut self) {
        self.set_grid_size(DEFAULT_GRID_SIZE);
    }

    pub fn reset_grid_color(&mut self) {
        self.set_grid_color(None);
    }

    pub fn reset_grid_display(&mut self) {
        self.reset_grid_size();
        self.reset_grid_color();
    }

    pub fn shows_headers(&self) -> bool {
        self.show_headers
    }

    /// Shows or hides the header strip of every item.
    pub fn display_headers(&mut self, show: bool) {
        if show == self.show_headers {
            return;
        }
        self.show_headers = show;
        for item in &mut self.items {
            item.set_show_header(show);
        }
        self.emit(PaletteEvent::DisplayChanged);
    }

    pub fn grid_style(&self) -> GridStyle {
        GridStyle::with_background(self.grid_color)
    }

    /// Grid lines for the visible part of the scene.
    pub fn visible_grid_lines(&self) -> Vec<GridLine> {
        grid::grid_lines(&self.viewport.visible_rect(), self.grid_size)
    }

    /// Snaps a scene point with the current grid.
    pub fn snap(&self, scene: Point) -> Point {
        snap_point(scene, self.grid_size)
    }
}

impl Default for PaletteCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PaletteCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteCanvas")
            .field("items", &self.items)
            .field("grid_size", &self.grid_size)
            .field("grid_color", &self.grid_color)
            .field("show_headers", &self.show_headers)
            .field("viewport", &self.viewport)
            .field("interaction", &self.interaction)
            .field("modified", &self.modified)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
