//! Named layout persistence.
//!
//! A [`SettingsStore`] owns one host's key/value settings file plus a folder
//! of layout documents, one `<name>.json` per layout, and a reserved
//! `_backups` subfolder holding per-layout backup copies:
//!
//! ```text
//! <root>/script_panel_<host>.json
//! <root>/<host>_layouts/<layout>.json
//! <root>/<host>_layouts/_backups/<layout>/LAYOUT_BACKUP_<layout>_<timestamp>.json
//! ```
//!
//! Layout documents are always read from disk so that a load reflects the
//! latest save from any panel instance sharing the folder. There is no file
//! locking; concurrent writers race.

use std::path::{Path, PathBuf};

use scriptpanel_core::constants::{keys, DEFAULT_LAYOUT_NAME, MAX_BACKUP_COUNT};
use scriptpanel_core::LayoutDocument;
use tracing::{debug, info, warn};

use crate::backup::BackupManager;
use crate::config::{settings_file_path, DoubleClickAction, HostSettings, PanelConfig};
use crate::error::{BackupResult, SettingsError, SettingsResult};
use crate::migration;

/// Folder name reserved for backups inside the layouts folder.
pub const BACKUP_FOLDER_NAME: &str = "_backups";

const LAYOUT_EXTENSION: &str = "json";

/// Versioned, file-backed settings for one host.
#[derive(Debug)]
pub struct SettingsStore {
    host_name: String,
    root: PathBuf,
    layouts_dir: PathBuf,
    pub(crate) settings: HostSettings,
    backups: BackupManager,
}

impl SettingsStore {
    /// Opens (or creates) the store for `host_name` beneath `root`.
    ///
    /// The layouts and backups folders are created eagerly; failing to create
    /// them is an error. Pending schema migrations run before this returns.
    pub fn open(root: impl Into<PathBuf>, host_name: &str) -> SettingsResult<Self> {
        if host_name.trim().is_empty() {
            return Err(SettingsError::invalid("host name", "must not be empty"));
        }

        let root = root.into();
        let layouts_dir = root.join(format!("{}_layouts", host_name));
        let backups_dir = layouts_dir.join(BACKUP_FOLDER_NAME);
        std::fs::create_dir_all(&backups_dir).map_err(|e| {
            SettingsError::ConfigDirectory(format!(
                "cannot create {}: {}",
                backups_dir.display(),
                e
            ))
        })?;

        let settings = HostSettings::load(settings_file_path(&root, host_name))?;
        let mut store = Self {
            host_name: host_name.to_string(),
            root,
            layouts_dir,
            settings,
            backups: BackupManager::new(backups_dir, MAX_BACKUP_COUNT),
        };

        let applied = migration::run_migrations(&mut store)?;
        info!(
            "Opened settings for host '{}' at {} ({} migration(s) applied)",
            store.host_name,
            store.root.display(),
            applied
        );
        Ok(store)
    }

    /// Opens the store described by a [`PanelConfig`].
    pub fn open_with_config(config: &PanelConfig) -> SettingsResult<Self> {
        Self::open(&config.settings_dir, &config.host_name)
    }

    /// Changes how many backups are kept per layout.
    pub fn set_max_backups(&mut self, max_backups: usize) {
        self.backups = BackupManager::new(self.backups.root().to_path_buf(), max_backups);
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layouts_dir(&self) -> &Path {
        &self.layouts_dir
    }

    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut HostSettings {
        &mut self.settings
    }

    /// Path of the document for `name`, validating the name first.
    pub fn layout_path(&self, name: &str) -> SettingsResult<PathBuf> {
        validate_layout_name(name)?;
        Ok(self
            .layouts_dir
            .join(format!("{}.{}", name, LAYOUT_EXTENSION)))
    }

    /// Reads the layout `name`; a layout that was never saved is empty.
    ///
    /// A file that exists but cannot be parsed is reported as
    /// [`SettingsError::Configuration`].
    pub fn get_layout(&self, name: &str) -> SettingsResult<LayoutDocument> {
        let path = self.layout_path(name)?;
        if !path.exists() {
            debug!("Layout '{}' has no file yet", name);
            return Ok(LayoutDocument::default());
        }

        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content)
            .map_err(|source| SettingsError::Configuration { path, source })
    }

    /// Overwrites layout `name` with `doc`, backing up the previous file first.
    ///
    /// A failed backup is logged and the write still happens.
    pub fn update_layout(&self, name: &str, doc: &LayoutDocument) -> SettingsResult<()> {
        let path = self.layout_path(name)?;

        if let Err(e) = self.make_backup(name) {
            warn!("Backup of layout '{}' failed: {}", name, e);
        }

        let content = serde_json::to_string_pretty(doc)?;
        std::fs::write(&path, content)?;
        info!("Saved layout '{}' to {}", name, path.display());
        Ok(())
    }

    /// Copies the current file of layout `name` into its backup folder.
    pub fn make_backup(&self, name: &str) -> BackupResult<Option<PathBuf>> {
        let Ok(path) = self.layout_path(name) else {
            return Ok(None);
        };
        self.backups.backup(name, &path)
    }

    /// Names of all saved layouts, sorted, with the default layout first.
    pub fn list_layout_names(&self) -> SettingsResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.layouts_dir)? {
            let path = entry?.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(LAYOUT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if stem != BACKUP_FOLDER_NAME {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        names.retain(|name| name != DEFAULT_LAYOUT_NAME);
        names.insert(0, DEFAULT_LAYOUT_NAME.to_string());
        Ok(names)
    }

    /// Name of the layout shown last, or the default layout.
    pub fn active_layout(&self) -> String {
        self.settings
            .get_string(keys::ACTIVE_LAYOUT)
            .filter(|name| validate_layout_name(name).is_ok())
            .unwrap_or_else(|| DEFAULT_LAYOUT_NAME.to_string())
    }

    pub fn set_active_layout(&mut self, name: &str) -> SettingsResult<()> {
        validate_layout_name(name)?;
        self.settings.set(keys::ACTIVE_LAYOUT, name)?;
        self.settings.save()
    }

    pub fn double_click_action(&self) -> DoubleClickAction {
        self.settings
            .get(keys::DOUBLE_CLICK_ACTION)
            .unwrap_or_default()
    }

    pub fn set_double_click_action(&mut self, action: DoubleClickAction) -> SettingsResult<()> {
        self.settings.set(keys::DOUBLE_CLICK_ACTION, action)?;
        self.settings.save()
    }

    /// The stored schema stamp, if any.
    pub fn settings_version(&self) -> Option<String> {
        self.settings.get_string(keys::SETTINGS_VERSION)
    }

    /// Re-reads the key/value file from disk.
    pub fn sync(&mut self) -> SettingsResult<()> {
        self.settings.sync()
    }
}

/// Layout names become file names, so they must be a single path component.
pub fn validate_layout_name(name: &str) -> SettingsResult<()> {
    let reason = if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else if name == "." || name == ".." {
        Some("must not be a relative path")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SettingsError::InvalidSetting {
            key: format!("layout name '{}'", name),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
