//! Script Panel Settings Crate
//!
//! Handles the host-scoped key/value settings file, named layout documents,
//! layout backups with retention, and schema migrations.

pub mod backup;
pub mod config;
pub mod error;
pub mod migration;
pub mod persistence;

pub use backup::{BackupEntry, BackupManager};
pub use config::{DoubleClickAction, HostSettings, PanelConfig, STANDALONE_HOST};
pub use error::{BackupError, BackupResult, SettingsError, SettingsResult};
pub use migration::{Migration, MIGRATIONS};
pub use persistence::{validate_layout_name, SettingsStore, BACKUP_FOLDER_NAME};
