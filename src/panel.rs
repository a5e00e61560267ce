//! The panel controller.
//!
//! Wires the settings store, the palette canvas, and the host binding
//! together. The controller owns the layout lifecycle: load on start and on
//! explicit reload, save on request, switch and create named layouts.

use std::rc::Rc;

use scriptpanel_core::{ItemId, LayoutDocument};
use scriptpanel_palette::{
    apply_canvas_settings, apply_layout, capture_layout, ApplySummary, IconRegistry,
    PaletteCanvas, PaletteContent, ScriptBrowser, ScriptWidget,
};
use scriptpanel_settings::{
    validate_layout_name, DoubleClickAction, SettingsError, SettingsStore,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::host::{trigger_script, HostInterface};
use crate::hotkey::{build_command, CommandKind, HotkeyCommand, HOTKEY_CATEGORY};

/// Errors surfaced by panel operations.
#[derive(Error, Debug)]
pub enum PanelError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Palette(#[from] scriptpanel_core::Error),

    #[error("Layout '{0}' already exists")]
    LayoutExists(String),
}

pub type PanelResult<T> = Result<T, PanelError>;

fn script_content(icons: &Rc<IconRegistry>, path: &str) -> Box<dyn PaletteContent> {
    Box::new(ScriptWidget::new(path, Rc::clone(icons)))
}

/// Script panel bound to one host.
pub struct ScriptPanel<H: HostInterface> {
    store: SettingsStore,
    canvas: PaletteCanvas,
    host: H,
    icons: Rc<IconRegistry>,
    layout_name: String,
}

impl<H: HostInterface> ScriptPanel<H> {
    /// Creates the panel and loads the active layout.
    pub fn new(store: SettingsStore, host: H, icons: Rc<IconRegistry>) -> PanelResult<Self> {
        let layout_name = store.active_layout();
        let mut panel = Self {
            store,
            canvas: PaletteCanvas::new(),
            host,
            icons,
            layout_name,
        };
        panel.load_layout()?;
        Ok(panel)
    }

    pub fn canvas(&self) -> &PaletteCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PaletteCanvas {
        &mut self.canvas
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SettingsStore {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Name of the layout shown on the canvas.
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// True when the canvas has changes that are not on disk.
    pub fn needs_save(&self) -> bool {
        self.canvas.is_modified()
    }

    /// Re-reads the settings file and rebuilds the canvas from the active layout.
    ///
    /// A corrupt layout file is reported and leaves the canvas untouched.
    pub fn load_layout(&mut self) -> PanelResult<ApplySummary> {
        self.store.sync()?;
        let name = self.store.active_layout();
        let doc = self.store.get_layout(&name)?;

        self.canvas.clear();
        apply_canvas_settings(&mut self.canvas, &doc.palette_display);
        let icons = &self.icons;
        let summary = apply_layout(&mut self.canvas, &doc, |path| {
            script_content(icons, path)
        });
        self.canvas.mark_saved();

        info!(
            "Loaded layout '{}': {} item(s), {} stale placement(s)",
            name,
            self.canvas.item_count(),
            summary.stale
        );
        self.layout_name = name;
        Ok(summary)
    }

    /// Writes the canvas to the current layout, backing up the previous file.
    pub fn save_layout(&mut self) -> PanelResult<()> {
        let doc = capture_layout(&self.canvas);
        self.store.update_layout(&self.layout_name, &doc)?;
        self.canvas.mark_saved();
        Ok(())
    }

    /// Makes `name` the active layout and loads it. Unsaved changes are discarded.
    pub fn switch_layout(&mut self, name: &str) -> PanelResult<ApplySummary> {
        validate_layout_name(name)?;
        if self.needs_save() {
            debug!("Discarding unsaved changes to '{}'", self.layout_name);
        }
        self.store.set_active_layout(name)?;
        self.load_layout()
    }

    /// Creates an empty layout called `name` and switches to it.
    pub fn add_layout(&mut self, name: &str) -> PanelResult<ApplySummary> {
        validate_layout_name(name)?;
        if self.layout_names()?.iter().any(|existing| existing == name) {
            return Err(PanelError::LayoutExists(name.to_string()));
        }
        self.store.update_layout(name, &LayoutDocument::default())?;
        info!("Created layout '{}'", name);
        self.switch_layout(name)
    }

    pub fn layout_names(&self) -> PanelResult<Vec<String>> {
        Ok(self.store.list_layout_names()?)
    }

    /// Accepts a drop from the script browser at the current pointer position.
    pub fn palette_item_dropped(
        &mut self,
        browser: &dyn ScriptBrowser,
    ) -> PanelResult<Option<ItemId>> {
        let icons = &self.icons;
        let id = self
            .canvas
            .handle_drop(browser, |path| script_content(icons, path))?;
        Ok(id)
    }

    /// Runs or opens a script, per the double-click setting on disk.
    pub fn script_double_clicked(&mut self, path: &str) -> PanelResult<()> {
        self.store.sync()?;
        match self.store.double_click_action() {
            DoubleClickAction::RunScript => {
                trigger_script(&self.host, path)?;
            }
            DoubleClickAction::EditScript => self.host.open_script(path)?,
        }
        Ok(())
    }

    /// Runs the script behind a palette item.
    pub fn trigger_item(&self, id: &ItemId) -> PanelResult<bool> {
        let item = self.canvas.item(id).ok_or_else(|| {
            scriptpanel_core::Error::invalid_argument("id", format!("no item '{}'", id))
        })?;
        Ok(trigger_script(&self.host, item.natural_key())?)
    }

    /// Opens every selected item's script in the editor.
    pub fn open_selected_in_editor(&self) -> PanelResult<usize> {
        let mut opened = 0;
        for item in self.canvas.selected_items() {
            self.host.open_script(item.natural_key())?;
            opened += 1;
        }
        Ok(opened)
    }

    /// Registers a hotkey running `script_path` on `shortcut`.
    pub fn create_hotkey(
        &self,
        script_path: &str,
        shortcut: &str,
        kind: CommandKind,
    ) -> PanelResult<HotkeyCommand> {
        let command = build_command(script_path, kind)?;
        let name = command.hotkey_name();
        self.host
            .setup_hotkey(&name, shortcut, &command.text, HOTKEY_CATEGORY)?;
        info!("Hotkey created as a {:?}: {}", kind, name);
        Ok(command)
    }

    /// Adds a shelf button running `script_path`.
    pub fn create_shelf_button(
        &self,
        script_path: &str,
        kind: CommandKind,
    ) -> PanelResult<HotkeyCommand> {
        let command = build_command(script_path, kind)?;
        self.host
            .add_to_shelf(&command.name, &command.text, &command.extension)?;
        info!("Shelf button created as a {:?}: {}", kind, command.name);
        Ok(command)
    }
}
