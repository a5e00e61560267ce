//! Error types for the settings crate.
//!
//! This module provides structured error types for the key/value settings
//! file, named layout persistence, and layout backups.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A layout document on disk could not be parsed.
    #[error("Corrupted layout file {}: {source}", path.display())]
    Configuration {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A setting value or layout name is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The settings directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// The settings file format is not supported.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    /// A backup operation failed.
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),
}

impl SettingsError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while copying or pruning layout backups.
///
/// These never reach the caller of a save; the store logs and drops them.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The per-layout backup folder could not be created.
    #[error("Cannot create backup folder {}: {source}", path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The current layout file could not be copied.
    #[error("Cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An old backup could not be listed or removed.
    #[error("Cannot prune backup {}: {source}", path.display())]
    Prune {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for backup operations.
pub type BackupResult<T> = Result<T, BackupError>;
