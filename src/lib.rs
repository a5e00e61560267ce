//! # Script Panel
//!
//! A script browsing panel with a freeform palette of script launchers:
//! - Snap-to-grid palette canvas with move, resize, rubber-band selection, pan and zoom
//! - Named layouts persisted as JSON with timestamped backups
//! - Versioned host settings with automatic migration of legacy keys
//! - Host bindings for running, editing, and binding scripts to hotkeys
//!
//! ## Architecture
//!
//! Script Panel is organized as a workspace with multiple crates:
//!
//! 1. **scriptpanel-core** - Geometry values, layout document model, errors
//! 2. **scriptpanel-settings** - Settings file, layout store, backups, migrations
//! 3. **scriptpanel-palette** - Palette canvas, items, viewport, serialization
//! 4. **scriptpanel** - Host bindings, hotkey builder, the panel controller

pub mod host;
pub mod hotkey;
pub mod panel;

pub use scriptpanel_core::{
    CanvasSettings, DisplayInfo, Error, ItemId, LayoutDocument, PlacementInfo, Point, Rect,
    Result, Rgb, Size,
};

pub use scriptpanel_settings::{
    DoubleClickAction, PanelConfig, SettingsError, SettingsResult, SettingsStore,
};

pub use scriptpanel_palette::{
    Displayable, IconRegistry, Modifiers, PaletteCanvas, PaletteContent, PaletteEvent,
    PaletteItem, PointerButton, PointerOutcome, ScriptBrowser, ScriptWidget, Viewport,
};

pub use host::{trigger_script, HostInterface, StandaloneHost};
pub use hotkey::{build_command, CommandKind, HotkeyCommand};
pub use panel::{PanelError, PanelResult, ScriptPanel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
