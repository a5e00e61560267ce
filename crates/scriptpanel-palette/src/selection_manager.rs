use scriptpanel_core::{ItemId, Point, Rect};

use crate::item::PaletteItem;

/// Manages item selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking which item is the "primary" selected item
/// - Handling point-based selection (clicking on items)
/// - Handling rectangle-based selection (rubber band)
/// - Multi-select operations (Ctrl/Shift+click)
///
/// # Selection Model
///
/// - **Primary Selection**: the item most recently selected (stored in `primary`)
/// - **Multiple Selection**: any number of items can have their `selected` flag set
/// - **Multi-select**: a modifier toggles one item without touching the others
///
/// The manager does not own items; every operation takes the canvas item list,
/// in insertion (stacking) order, so the last item is the topmost.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the primary selected item, if any
    primary: Option<ItemId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    pub fn new() -> Self {
        Self { primary: None }
    }

    /// Returns the ID of the primary selected item.
    pub fn primary(&self) -> Option<&ItemId> {
        self.primary.as_ref()
    }

    /// Ids of all selected items in stacking order.
    pub fn selected_ids(&self, items: &[PaletteItem]) -> Vec<ItemId> {
        items
            .iter()
            .filter(|item| item.is_selected())
            .map(|item| item.id().clone())
            .collect()
    }

    /// Returns the number of selected items.
    pub fn selected_count(&self, items: &[PaletteItem]) -> usize {
        items.iter().filter(|item| item.is_selected()).count()
    }

    /// Deselects every item and clears the primary selection.
    pub fn deselect_all(&mut self, items: &mut [PaletteItem]) {
        for item in items.iter_mut() {
            item.set_selected(false);
        }
        self.primary = None;
    }

    /// Selects every item; the topmost becomes primary.
    pub fn select_all(&mut self, items: &mut [PaletteItem]) {
        for item in items.iter_mut() {
            item.set_selected(true);
        }
        self.primary = items.last().map(|item| item.id().clone());
    }

    /// Collapses the selection to the item with `id`.
    ///
    /// Returns false, leaving the selection untouched, if no such item exists.
    pub fn select_only(&mut self, items: &mut [PaletteItem], id: &ItemId) -> bool {
        if !items.iter().any(|item| item.id() == id) {
            return false;
        }
        for item in items.iter_mut() {
            item.set_selected(item.id() == id);
        }
        self.primary = Some(id.clone());
        true
    }

    /// Flips the selection of one item without affecting the others.
    ///
    /// # Returns
    ///
    /// The new selection state of the item, or `None` if it does not exist.
    pub fn toggle(&mut self, items: &mut [PaletteItem], id: &ItemId) -> Option<bool> {
        let item = items.iter_mut().find(|item| item.id() == id)?;
        let selected = !item.is_selected();
        item.set_selected(selected);
        if selected {
            self.primary = Some(id.clone());
        } else if self.primary.as_ref() == Some(id) {
            self.primary = None;
        }
        Some(selected)
    }

    /// Selects the topmost item at the given scene point.
    ///
    /// # Arguments
    ///
    /// * `items` - The canvas items in stacking order
    /// * `point` - The scene point to test
    /// * `multi` - If `true`, toggles the hit item and keeps the rest
    ///
    /// # Returns
    ///
    /// The ID of the hit item, or `None` if the click landed on empty canvas
    /// (which clears the selection unless `multi` is set).
    pub fn select_at(
        &mut self,
        items: &mut [PaletteItem],
        point: &Point,
        multi: bool,
    ) -> Option<ItemId> {
        let hit = items
            .iter()
            .rev()
            .find(|item| item.hit_test(*point).is_some())
            .map(|item| item.id().clone());

        match (&hit, multi) {
            (Some(id), true) => {
                self.toggle(items, id);
            }
            (Some(id), false) => {
                self.select_only(items, id);
            }
            (None, false) => self.deselect_all(items),
            (None, true) => {}
        }
        hit
    }

    /// Selects every item intersecting `rect`.
    ///
    /// The rectangle may have been built from a drag in any direction; negative
    /// extents are normalized. Items listed in `base` stay selected as well;
    /// pass an empty slice to replace the previous selection.
    ///
    /// # Returns
    ///
    /// The number of selected items afterwards.
    pub fn select_in_rect(
        &mut self,
        items: &mut [PaletteItem],
        rect: &Rect,
        base: &[ItemId],
    ) -> usize {
        let rect = Rect::from_corners(
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
        );

        let mut count = 0;
        self.primary = None;
        for item in items.iter_mut() {
            let selected = base.contains(item.id()) || item.rect().intersects(&rect);
            item.set_selected(selected);
            if selected {
                count += 1;
                self.primary = Some(item.id().clone());
            }
        }
        count
    }

    /// Forgets items that are no longer on the canvas.
    pub fn retain_existing(&mut self, items: &[PaletteItem]) {
        if let Some(primary) = &self.primary {
            if !items.iter().any(|item| item.id() == primary) {
                self.primary = None;
            }
        }
    }
}
