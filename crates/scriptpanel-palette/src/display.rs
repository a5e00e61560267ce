//! Wrapped content contract, the optional display capability, and icon lookup.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use scriptpanel_core::{script_basename, script_extension, DisplayInfo, ItemId, Rect};

/// Label, color, and icon that a content type can expose and restore.
pub trait Displayable {
    /// Current display state. Fields left at their defaults may be `None`.
    fn display_info(&self) -> DisplayInfo;

    /// Replaces the display state. Absent fields reset to the content default.
    fn set_display_from_info(&mut self, info: &DisplayInfo);
}

/// Anything a palette item can host.
pub trait PaletteContent: fmt::Debug {
    /// The content's natural key; for scripts, the script path.
    fn natural_key(&self) -> &str;

    /// Overrides the item id otherwise derived from the natural key.
    fn palette_id(&self) -> Option<ItemId> {
        None
    }

    /// Text shown in the item's header strip.
    fn header_text(&self) -> String {
        script_basename(self.natural_key()).to_string()
    }

    /// Called whenever the content area of the hosting item changes.
    fn set_geometry(&mut self, _rect: Rect) {}

    fn as_displayable(&self) -> Option<&dyn Displayable> {
        None
    }

    fn as_displayable_mut(&mut self) -> Option<&mut dyn Displayable> {
        None
    }
}

/// Id of the item that hosts `content`.
pub fn item_id_for(content: &dyn PaletteContent) -> ItemId {
    content
        .palette_id()
        .unwrap_or_else(|| ItemId::from_natural_key(content.natural_key()))
}

pub const PYTHON_ICON: &str = "python_icon";
pub const MEL_ICON: &str = "mel_icon";
pub const UNKNOWN_ICON: &str = "unknown_icon";

/// A resolved icon: the key it was requested by and the image it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub key: String,
    pub path: PathBuf,
}

/// Icon lookup shared by every content widget.
///
/// Built once at startup and handed to the widgets that need it.
#[derive(Debug, Clone)]
pub struct IconRegistry {
    named: HashMap<String, PathBuf>,
    by_extension: HashMap<String, String>,
}

impl IconRegistry {
    /// Registry with the built-in icons located in `icon_dir`.
    pub fn new(icon_dir: impl AsRef<Path>) -> Self {
        let icon_dir = icon_dir.as_ref();
        let mut registry = Self {
            named: HashMap::new(),
            by_extension: HashMap::new(),
        };
        for name in [PYTHON_ICON, MEL_ICON, UNKNOWN_ICON] {
            registry.register_named(name, icon_dir.join(format!("{}.png", name)));
        }
        registry.register_extension(".py", PYTHON_ICON);
        registry.register_extension(".mel", MEL_ICON);
        registry
    }

    pub fn register_named(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.named.insert(name.into(), path.into());
    }

    /// Maps an extension (with leading dot) to a named icon.
    pub fn register_extension(&mut self, extension: &str, icon_name: impl Into<String>) {
        self.by_extension
            .insert(extension.to_ascii_lowercase(), icon_name.into());
    }

    /// Default icon for a script, chosen by extension.
    pub fn icon_for_script(&self, script_path: &str) -> Icon {
        let name = script_extension(script_path)
            .and_then(|ext| self.by_extension.get(&ext))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ICON);
        self.named_icon(name).unwrap_or_else(|| Icon {
            key: UNKNOWN_ICON.to_string(),
            path: PathBuf::from(format!("{}.png", UNKNOWN_ICON)),
        })
    }

    pub fn named_icon(&self, name: &str) -> Option<Icon> {
        self.named.get(name).map(|path| Icon {
            key: name.to_string(),
            path: path.clone(),
        })
    }

    /// Resolves a user supplied icon: a registered name or an existing image file.
    pub fn resolve(&self, icon_path: &str) -> Option<Icon> {
        if let Some(icon) = self.named_icon(icon_path) {
            return Some(icon);
        }
        let path = Path::new(icon_path);
        path.is_file().then(|| Icon {
            key: icon_path.to_string(),
            path: path.to_path_buf(),
        })
    }
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::new("icons")
    }
}
