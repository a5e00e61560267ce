//! Pointer and wheel handling for the palette canvas.
//!
//! Events arrive in screen coordinates and are mapped to the scene through the
//! viewport. Moves and resizes are applied live as the pointer moves, so a
//! release only ends the interaction; there is no revert.

use tracing::debug;

use super::{InteractionState, Modifiers, PaletteCanvas, PointerButton, PointerOutcome};
use crate::item::ItemHit;
use scriptpanel_core::{ItemId, Point, Rect, Size};

/// Screen pixels scrolled per wheel notch without Ctrl.
const SCROLL_STEP: f64 = 40.0;

impl PaletteCanvas {
    /// Space toggles pan mode for the left button while held.
    pub fn set_space_held(&mut self, held: bool) {
        self.space_held = held;
    }

    pub fn is_space_held(&self) -> bool {
        self.space_held
    }

    /// Starts an interaction. Presses during another interaction are ignored.
    pub fn pointer_press(
        &mut self,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> PointerOutcome {
        self.set_cursor_screen(screen);
        if !self.interaction.is_idle() {
            return PointerOutcome::None;
        }
        let scene = self.cursor;

        match button {
            PointerButton::Middle => {
                self.interaction = InteractionState::Panning {
                    last_screen: screen,
                };
                PointerOutcome::None
            }
            PointerButton::Left if self.space_held => {
                self.interaction = InteractionState::Panning {
                    last_screen: screen,
                };
                PointerOutcome::None
            }
            PointerButton::Left => {
                self.begin_left_press(scene, modifiers);
                PointerOutcome::None
            }
            PointerButton::Right => {
                let hit = self
                    .item_at(scene)
                    .map(|(item, _)| (item.id().clone(), item.is_selected()));
                match hit {
                    Some((id, selected)) => {
                        if !selected {
                            self.select_only(&id);
                        }
                        PointerOutcome::ContextMenu { item: Some(id) }
                    }
                    None => PointerOutcome::ContextMenu { item: None },
                }
            }
        }
    }

    fn begin_left_press(&mut self, scene: Point, modifiers: Modifiers) {
        let hit = self
            .item_at(scene)
            .map(|(item, hit)| (item.id().clone(), hit, item.is_selected(), item.size()));

        match hit {
            // Ctrl on the handle moves the item instead of resizing it.
            Some((id, ItemHit::ResizeHandle, selected, start_size)) if !modifiers.ctrl => {
                if !selected {
                    self.select_only(&id);
                }
                self.interaction = InteractionState::ResizingItem {
                    id,
                    anchor: scene,
                    start_size,
                };
            }
            Some((id, ItemHit::ResizeHandle, selected, _)) => {
                if !selected {
                    self.select_only(&id);
                }
                self.begin_drag(scene);
            }
            Some((id, ItemHit::Body, selected, _)) => {
                if modifiers.is_additive() {
                    if self.select_additive(&id) != Some(true) {
                        return;
                    }
                } else if !selected {
                    self.select_only(&id);
                }
                self.begin_drag(scene);
            }
            None => {
                let base = if modifiers.is_additive() {
                    self.selected_ids()
                } else {
                    self.deselect_all();
                    Vec::new()
                };
                self.interaction = InteractionState::Selecting {
                    origin: scene,
                    current: scene,
                    base,
                };
            }
        }
    }

    fn begin_drag(&mut self, anchor: Point) {
        let start_positions: Vec<(ItemId, Point)> = self
            .selected_items()
            .map(|item| (item.id().clone(), item.position()))
            .collect();
        self.interaction = InteractionState::DraggingItems {
            anchor,
            start_positions,
        };
    }

    /// Advances the current interaction to the new pointer position.
    pub fn pointer_move(&mut self, screen: Point) {
        self.set_cursor_screen(screen);
        let scene = self.cursor;

        let state = std::mem::take(&mut self.interaction);
        self.interaction = match state {
            InteractionState::Idle => InteractionState::Idle,
            InteractionState::Panning { last_screen } => {
                self.viewport
                    .pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
                self.set_cursor_screen(screen);
                InteractionState::Panning {
                    last_screen: screen,
                }
            }
            InteractionState::Selecting { origin, base, .. } => {
                self.selection_manager.select_in_rect(
                    &mut self.items,
                    &Rect::from_corners(origin, scene),
                    &base,
                );
                InteractionState::Selecting {
                    origin,
                    current: scene,
                    base,
                }
            }
            InteractionState::DraggingItems {
                anchor,
                start_positions,
            } => {
                let (dx, dy) = (scene.x - anchor.x, scene.y - anchor.y);
                for (id, start) in &start_positions {
                    self.move_item(id, start.offset(dx, dy));
                }
                InteractionState::DraggingItems {
                    anchor,
                    start_positions,
                }
            }
            InteractionState::ResizingItem {
                id,
                anchor,
                start_size,
            } => {
                let size = Size::new(
                    start_size.width + scene.x - anchor.x,
                    start_size.height + scene.y - anchor.y,
                );
                self.resize_item(&id, size);
                InteractionState::ResizingItem {
                    id,
                    anchor,
                    start_size,
                }
            }
        };
    }

    /// Applies the final pointer position and returns to idle.
    pub fn pointer_release(&mut self, screen: Point) {
        self.pointer_move(screen);
        match std::mem::take(&mut self.interaction) {
            InteractionState::Selecting { .. } => self.emit_selection(),
            InteractionState::DraggingItems {
                start_positions, ..
            } => debug!("Drag committed for {} item(s)", start_positions.len()),
            InteractionState::ResizingItem { id, .. } => debug!("Resize committed for '{}'", id),
            InteractionState::Panning { .. } | InteractionState::Idle => {}
        }
    }

    /// Ends the current interaction without reverting it, e.g. on focus loss.
    pub fn cancel_interaction(&mut self) {
        self.space_held = false;
        let state = std::mem::take(&mut self.interaction);
        if !state.is_idle() {
            debug!("Interaction cancelled, keeping applied changes");
        }
        if matches!(state, InteractionState::Selecting { .. }) {
            self.emit_selection();
        }
    }

    /// Wheel input: Ctrl zooms about the pointer, Shift scrolls sideways,
    /// otherwise the view scrolls vertically. Positive notches are forward.
    pub fn wheel(&mut self, screen: Point, notches: f64, modifiers: Modifiers) {
        if notches == 0.0 || !notches.is_finite() {
            return;
        }
        if modifiers.ctrl {
            self.viewport.zoom_steps_at(screen, notches);
        } else if modifiers.shift {
            self.viewport.pan_by(notches * SCROLL_STEP, 0.0);
        } else {
            self.viewport.pan_by(0.0, notches * SCROLL_STEP);
        }
        self.set_cursor_screen(screen);
    }
}
