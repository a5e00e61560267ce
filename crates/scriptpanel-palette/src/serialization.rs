//! Conversion between a live canvas and a persisted layout document.

use scriptpanel_core::{CanvasSettings, ItemId, LayoutDocument};
use tracing::{debug, warn};

use crate::canvas::{PaletteCanvas, PaletteEvent};
use crate::display::{item_id_for, PaletteContent};
use crate::item::PaletteItem;

/// What [`apply_layout`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub created: usize,
    pub updated: usize,
    pub placed: usize,
    pub stale: usize,
}

/// Captures item geometry and display info, iterating in insertion order.
///
/// Two items sharing an id or a natural key collapse to the last one.
/// Canvas-wide settings are captured as well.
pub fn capture_layout(canvas: &PaletteCanvas) -> LayoutDocument {
    let mut doc = LayoutDocument {
        palette_display: capture_canvas_settings(canvas),
        ..LayoutDocument::default()
    };

    for item in canvas.items() {
        doc.palette_layout
            .insert(item.id().to_string(), item.placement());
        if let Some(info) = item.display_info() {
            doc.scripts_display
                .insert(item.natural_key().to_string(), info);
        }
    }
    doc
}

/// Creates or updates items from `doc.scripts_display`, then applies saved
/// geometry from `doc.palette_layout`.
///
/// `create` builds fresh content for a script path. When two paths share a
/// basename, and so an id, the later path's content replaces the earlier one.
/// Placement entries whose id matches no item are skipped. Saved geometry is restored exactly rather than
/// re-snapped, so a grid size change never moves saved items.
pub fn apply_layout<F>(
    canvas: &mut PaletteCanvas,
    doc: &LayoutDocument,
    mut create: F,
) -> ApplySummary
where
    F: FnMut(&str) -> Box<dyn PaletteContent>,
{
    let mut summary = ApplySummary::default();

    for (script_path, info) in &doc.scripts_display {
        let content = create(script_path.as_str());
        let id = item_id_for(content.as_ref());

        if let Some(item) = canvas.item_mut(&id) {
            if item.natural_key() != content.natural_key() {
                warn!(
                    "Layout entry '{}' replaces '{}' on item '{}'",
                    script_path,
                    item.natural_key(),
                    id
                );
                let mut content = content;
                if let Some(displayable) = content.as_displayable_mut() {
                    displayable.set_display_from_info(info);
                }
                item.replace_content(content);
                canvas.emit(PaletteEvent::DisplayChanged);
            } else {
                canvas.set_item_display(&id, info);
            }
            summary.updated += 1;
            continue;
        }

        let mut item = match PaletteItem::new(id.clone(), content, canvas.grid_size()) {
            Ok(item) => item,
            Err(e) => {
                debug!("Skipping layout entry '{}': {}", script_path, e);
                continue;
            }
        };
        item.set_display_from_info(info);
        item.set_position(canvas.cursor(), canvas.grid_size());
        if canvas.add_item(item).is_ok() {
            summary.created += 1;
        }
    }

    for (id, placement) in &doc.palette_layout {
        let id = ItemId::new(id.as_str());
        match canvas.item_mut(&id) {
            Some(item) => {
                item.restore_placement(placement);
                summary.placed += 1;
                canvas.emit(PaletteEvent::ItemMoved(id));
            }
            None => {
                debug!("Dropping stale layout entry '{}'", id);
                summary.stale += 1;
            }
        }
    }
    summary
}

/// Canvas-wide settings, including the current view transform.
pub fn capture_canvas_settings(canvas: &PaletteCanvas) -> CanvasSettings {
    CanvasSettings {
        show_headers: canvas.shows_headers(),
        grid_size: canvas.grid_size(),
        grid_background_color: canvas.grid_color(),
        viewport_transform: Some(canvas.viewport().transform()),
    }
}

/// Applies header visibility, grid size, grid color, and the view transform.
pub fn apply_canvas_settings(canvas: &mut PaletteCanvas, settings: &CanvasSettings) {
    canvas.display_headers(settings.show_headers);
    canvas.set_grid_size(settings.grid_size);
    canvas.set_grid_color(Some(settings.grid_background_color));
    if let Some(matrix) = &settings.viewport_transform {
        canvas.viewport_mut().set_transform(matrix);
    }
}
