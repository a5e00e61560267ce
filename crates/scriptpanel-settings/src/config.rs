//! Panel configuration and the host-scoped key/value settings file.
//!
//! [`PanelConfig`] resolves where settings live and which external programs
//! the standalone host launches. [`HostSettings`] is the flat key/value file
//! that holds the active layout name, the schema version stamp, the
//! double-click action, and any legacy keys awaiting migration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{SettingsError, SettingsResult};

pub const ENV_SETTINGS_DIR: &str = "SCRIPT_PANEL_SETTINGS_DIR";
pub const ENV_HOST: &str = "SCRIPT_PANEL_HOST";
pub const ENV_EDITOR: &str = "SCRIPT_PANEL_EDITOR";
pub const ENV_PYTHON: &str = "SCRIPT_PANEL_PYTHON";

/// Host name used when the panel runs outside any content-creation application.
pub const STANDALONE_HOST: &str = "standalone";

/// What a double-click on a script does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoubleClickAction {
    #[default]
    RunScript,
    EditScript,
}

impl DoubleClickAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoubleClickAction::RunScript => "run_script",
            DoubleClickAction::EditScript => "edit_script",
        }
    }
}

impl fmt::Display for DoubleClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoubleClickAction {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run_script" => Ok(DoubleClickAction::RunScript),
            "edit_script" => Ok(DoubleClickAction::EditScript),
            other => Err(SettingsError::invalid(
                "double_click_action",
                format!("unknown action '{}'", other),
            )),
        }
    }
}

/// Where settings are stored and which external programs to launch.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    pub settings_dir: PathBuf,
    pub host_name: String,
    pub editor: Option<String>,
    pub python: Option<String>,
}

impl PanelConfig {
    /// Resolves the configuration from process environment variables.
    pub fn from_env() -> SettingsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> SettingsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let settings_dir = match non_empty(ENV_SETTINGS_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_settings_dir()?,
        };

        Ok(Self {
            settings_dir,
            host_name: non_empty(ENV_HOST).unwrap_or_else(|| STANDALONE_HOST.to_string()),
            editor: non_empty(ENV_EDITOR).or_else(|| non_empty("EDITOR")),
            python: non_empty(ENV_PYTHON),
        })
    }

    /// Platform configuration directory joined with `script_panel`.
    pub fn default_settings_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("script_panel"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "no configuration directory on this platform".to_string(),
                )
            })
    }

    /// Editor program, falling back to VS Code.
    pub fn editor_command(&self) -> String {
        self.editor.clone().unwrap_or_else(|| "code".to_string())
    }

    /// Python interpreter program.
    pub fn python_command(&self) -> String {
        self.python.clone().unwrap_or_else(|| {
            if cfg!(windows) {
                "python".to_string()
            } else {
                "python3".to_string()
            }
        })
    }

    /// Path of the key/value file for this host.
    pub fn settings_file(&self) -> PathBuf {
        settings_file_path(&self.settings_dir, &self.host_name)
    }
}

/// Path of the key/value settings file for `host_name` under `root`.
pub fn settings_file_path(root: &Path, host_name: &str) -> PathBuf {
    root.join(format!("script_panel_{}.json", host_name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    fn for_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(SettingsFormat::Json),
            Some("toml") => Ok(SettingsFormat::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Flat key/value settings persisted as a JSON (or TOML) object.
#[derive(Debug, Clone)]
pub struct HostSettings {
    path: PathBuf,
    format: SettingsFormat,
    values: BTreeMap<String, serde_json::Value>,
}

impl HostSettings {
    /// Loads the file at `path`; a missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
        let path = path.into();
        let format = SettingsFormat::for_path(&path)?;
        let mut settings = Self {
            path,
            format,
            values: BTreeMap::new(),
        };
        settings.sync()?;
        Ok(settings)
    }

    /// Re-reads the file from disk, discarding unsaved in-memory changes.
    pub fn sync(&mut self) -> SettingsResult<()> {
        if !self.path.exists() {
            self.values.clear();
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        self.values = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            match self.format {
                SettingsFormat::Json => serde_json::from_str(&content)?,
                SettingsFormat::Toml => toml::from_str(&content)?,
            }
        };
        Ok(())
    }

    /// Writes every value back to disk.
    pub fn save(&self) -> SettingsResult<()> {
        let content = match self.format {
            SettingsFormat::Json => serde_json::to_string_pretty(&self.values)?,
            SettingsFormat::Toml => toml::to_string_pretty(&self.values)?,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Returns the value for `key` decoded as `T`, or `None` if absent or of another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }

    /// Sets `key` in memory. Call [`HostSettings::save`] to persist.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> SettingsResult<()> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
