//! # Script Panel Palette
//!
//! A freeform 2D palette of script launchers. Items are rectangles that wrap
//! a content widget, snap to a configurable grid, and can be moved, resized,
//! and multi-selected. The whole arrangement round-trips through a
//! [`LayoutDocument`](scriptpanel_core::LayoutDocument).
//!
//! ## Architecture
//!
//! ```text
//! PaletteCanvas (interactive surface)
//!   ├── PaletteItem (geometry, selection, header, resize handle)
//!   │     └── PaletteContent (wrapped widget, optionally Displayable)
//!   ├── SelectionManager
//!   └── Viewport (zoom + pan)
//!
//! grid           snapping and grid lines
//! serialization  canvas <-> LayoutDocument
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use scriptpanel_palette::{IconRegistry, PaletteCanvas, ScriptWidget};
//!
//! let icons = Rc::new(IconRegistry::default());
//! let mut canvas = PaletteCanvas::new();
//! canvas.add_content(Box::new(ScriptWidget::new("/scripts/foo.py", icons)))?;
//! let doc = scriptpanel_palette::serialization::capture_layout(&canvas);
//! ```

pub mod canvas;
pub mod display;
pub mod grid;
pub mod item;
pub mod script_widget;
pub mod selection_manager;
pub mod serialization;
pub mod viewport;

pub use canvas::{
    InteractionState, Modifiers, PaletteCanvas, PaletteEvent, PointerButton, PointerOutcome,
    ScriptBrowser,
};
pub use display::{Displayable, Icon, IconRegistry, PaletteContent};
pub use grid::{grid_lines, snap_point, snap_size, GridLine, GridStyle};
pub use item::{HeaderLabel, ItemHit, PaletteItem, ResizeHandle};
pub use script_widget::ScriptWidget;
pub use selection_manager::SelectionManager;
pub use serialization::{
    apply_canvas_settings, apply_layout, capture_canvas_settings, capture_layout, ApplySummary,
};
pub use viewport::Viewport;
