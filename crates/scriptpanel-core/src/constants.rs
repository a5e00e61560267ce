//! Shared constants for layouts, settings keys, and palette defaults.

use crate::types::Rgb;

/// Name of the layout that always exists, even before it is first saved.
pub const DEFAULT_LAYOUT_NAME: &str = "-user-";

/// Current settings schema stamp.
pub const SETTINGS_VERSION: &str = "1.00.00";

/// Stamp that marks a store written before versioning existed.
pub const LEGACY_SETTINGS_VERSION: &str = "0";

/// Number of backups kept per layout.
pub const MAX_BACKUP_COUNT: usize = 30;

/// Key/value store keys.
pub mod keys {
    pub const ACTIVE_LAYOUT: &str = "active_layout";
    pub const SETTINGS_VERSION: &str = "settings_version";
    pub const DOUBLE_CLICK_ACTION: &str = "double_click_action";

    /// Keys written by the single favorites list scheme.
    pub const LEGACY_FAVORITES: &str = "favorites";
    pub const LEGACY_FAVORITES_DISPLAY: &str = "favorites_display";
    pub const LEGACY_FAVORITES_LAYOUT: &str = "favorites_layout";
    pub const LEGACY_PALETTE_DISPLAY: &str = "palette_display";
}

/// Default grid cell size in scene units.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Default canvas background.
pub const DEFAULT_GRID_COLOR: Rgb = Rgb::new(50, 50, 50);

/// Color of the grid lines drawn over the background.
pub const GRID_LINE_COLOR: Rgb = Rgb::new(100, 100, 100);

pub const GRID_LINE_WIDTH: f64 = 1.0;

/// Height of the header strip shown above an item's content.
pub const HEADER_HEIGHT: f64 = 15.0;

/// Default item footprint, in grid cells.
pub const DEFAULT_ITEM_COLUMNS: u32 = 8;
pub const DEFAULT_ITEM_ROWS: u32 = 4;

/// Scale applied per wheel notch when zooming.
pub const ZOOM_STEP: f64 = 1.25;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
