//! Launcher content for one script file.

use std::rc::Rc;

use scriptpanel_core::{script_basename, DisplayInfo, Rect, Rgb};
use tracing::warn;

use crate::display::{Displayable, Icon, IconRegistry, PaletteContent};

/// A labelled, optionally colored button that launches a script.
#[derive(Debug, Clone)]
pub struct ScriptWidget {
    script_path: String,
    label: String,
    color: Option<Rgb>,
    icon: Icon,
    icon_override: Option<String>,
    geometry: Rect,
    icons: Rc<IconRegistry>,
}

impl ScriptWidget {
    pub fn new(script_path: impl Into<String>, icons: Rc<IconRegistry>) -> Self {
        let script_path = script_path.into();
        let label = script_basename(&script_path).to_string();
        let icon = icons.icon_for_script(&script_path);
        Self {
            script_path,
            label,
            color: None,
            icon,
            icon_override: None,
            geometry: Rect::default(),
            icons,
        }
    }

    /// Creates a widget and applies saved display overrides.
    pub fn with_display(
        script_path: impl Into<String>,
        info: &DisplayInfo,
        icons: Rc<IconRegistry>,
    ) -> Self {
        let mut widget = Self::new(script_path, icons);
        widget.set_display_from_info(info);
        widget
    }

    pub fn script_path(&self) -> &str {
        &self.script_path
    }

    /// File name of the script.
    pub fn script_name(&self) -> &str {
        script_basename(&self.script_path)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_color(&mut self, color: Option<Rgb>) {
        self.color = color;
    }

    /// Uses the icon at `icon_path`. Returns false, keeping the current icon,
    /// when the path does not resolve.
    pub fn set_icon(&mut self, icon_path: &str) -> bool {
        match self.icons.resolve(icon_path) {
            Some(icon) => {
                self.icon = icon;
                self.icon_override = Some(icon_path.to_string());
                true
            }
            None => {
                warn!(
                    "Icon '{}' for {} could not be loaded, keeping {}",
                    icon_path, self.script_path, self.icon.key
                );
                false
            }
        }
    }

    pub fn reset_label(&mut self) {
        self.label = self.script_name().to_string();
    }

    pub fn reset_color(&mut self) {
        self.color = None;
    }

    pub fn reset_icon(&mut self) {
        self.icon = self.icons.icon_for_script(&self.script_path);
        self.icon_override = None;
    }

    pub fn reset_display(&mut self) {
        self.reset_label();
        self.reset_color();
        self.reset_icon();
    }
}

impl Displayable for ScriptWidget {
    fn display_info(&self) -> DisplayInfo {
        DisplayInfo {
            label: Some(self.label.clone()),
            color: self.color,
            icon_path: self.icon_override.clone(),
        }
    }

    fn set_display_from_info(&mut self, info: &DisplayInfo) {
        match info.label.as_deref() {
            Some(label) => self.set_label(label),
            None => self.reset_label(),
        }
        self.set_color(info.color);
        match info.icon_path.as_deref() {
            Some(path) => {
                self.set_icon(path);
            }
            None => self.reset_icon(),
        }
    }
}

impl PaletteContent for ScriptWidget {
    fn natural_key(&self) -> &str {
        &self.script_path
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    fn as_displayable(&self) -> Option<&dyn Displayable> {
        Some(self)
    }

    fn as_displayable_mut(&mut self) -> Option<&mut dyn Displayable> {
        Some(self)
    }
}
