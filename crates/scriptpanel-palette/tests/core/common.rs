use std::rc::Rc;

use scriptpanel_core::{ItemId, Point, Size};
use scriptpanel_palette::{IconRegistry, PaletteCanvas, PaletteContent, ScriptWidget};

pub fn icons() -> Rc<IconRegistry> {
    Rc::new(IconRegistry::new("/icons"))
}

pub fn widget(path: &str) -> Box<dyn PaletteContent> {
    Box::new(ScriptWidget::new(path, icons()))
}

/// Adds a script widget and places it exactly.
pub fn place(canvas: &mut PaletteCanvas, path: &str, pos: Point, size: Size) -> ItemId {
    let id = canvas.add_content(widget(path)).expect("Failed to add item");
    canvas.move_item(&id, pos);
    canvas.resize_item(&id, size);
    id
}
