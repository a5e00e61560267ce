//! Timestamped layout backups with a retention ceiling.
//!
//! Each layout has its own folder of copies named
//! `LAYOUT_BACKUP_<layout>_<timestamp>[_<n>].json`. The timestamp is UTC with
//! microsecond precision in a fixed-width sortable form; `n` disambiguates
//! copies written within the same microsecond. Retention ordering always
//! comes from the parsed name, never from directory listing order.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BackupError, BackupResult};

const BACKUP_PREFIX: &str = "LAYOUT_BACKUP_";
const BACKUP_EXTENSION: &str = ".json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// One backup file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub timestamp: String,
    pub sequence: u32,
}

impl BackupEntry {
    /// Parses a backup file name for `layout`, returning `None` for foreign files.
    fn parse(layout: &str, path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let rest = name
            .strip_prefix(BACKUP_PREFIX)?
            .strip_prefix(layout)?
            .strip_prefix('_')?
            .strip_suffix(BACKUP_EXTENSION)?;

        let (timestamp, sequence) = match rest.split_once('_') {
            Some((timestamp, sequence)) => (timestamp, sequence.parse().ok()?),
            None => (rest, 0),
        };
        if timestamp.is_empty() || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            timestamp: timestamp.to_string(),
            sequence,
            path,
        })
    }

    fn chronological(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Writes and prunes backups beneath a root folder.
#[derive(Debug, Clone)]
pub struct BackupManager {
    root: PathBuf,
    max_backups: usize,
}

impl BackupManager {
    pub fn new(root: impl Into<PathBuf>, max_backups: usize) -> Self {
        Self {
            root: root.into(),
            max_backups,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_backups(&self) -> usize {
        self.max_backups
    }

    /// Folder holding the backups of one layout.
    pub fn folder_for(&self, layout: &str) -> PathBuf {
        self.root.join(layout)
    }

    /// Backups of `layout`, oldest first.
    pub fn list(&self, layout: &str) -> BackupResult<Vec<BackupEntry>> {
        let folder = self.folder_for(layout);
        if !folder.is_dir() {
            return Ok(Vec::new());
        }

        let read_err = |source| BackupError::Prune {
            path: folder.clone(),
            source,
        };
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&folder).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            if let Some(backup) = BackupEntry::parse(layout, entry.path()) {
                entries.push(backup);
            }
        }
        entries.sort_by(BackupEntry::chronological);
        Ok(entries)
    }

    /// Copies `source` into the backup folder of `layout`.
    ///
    /// Returns `Ok(None)` when there is nothing to back up or retention is zero.
    /// Before the copy is written, the oldest backups are removed until fewer
    /// than `max_backups` remain.
    pub fn backup(&self, layout: &str, source: &Path) -> BackupResult<Option<PathBuf>> {
        if self.max_backups == 0 || !source.is_file() {
            return Ok(None);
        }

        let folder = self.folder_for(layout);
        std::fs::create_dir_all(&folder).map_err(|source| BackupError::CreateFolder {
            path: folder.clone(),
            source,
        })?;

        self.prune(layout, self.max_backups - 1)?;

        let target = self.next_backup_path(layout, &folder);
        std::fs::copy(source, &target).map_err(|err| BackupError::Copy {
            from: source.to_path_buf(),
            to: target.clone(),
            source: err,
        })?;

        debug!("Backed up layout '{}' to {}", layout, target.display());
        Ok(Some(target))
    }

    /// Deletes the oldest backups of `layout` until at most `keep` remain.
    pub fn prune(&self, layout: &str, keep: usize) -> BackupResult<usize> {
        let entries = self.list(layout)?;
        let excess = entries.len().saturating_sub(keep);
        for entry in entries.iter().take(excess) {
            std::fs::remove_file(&entry.path).map_err(|source| BackupError::Prune {
                path: entry.path.clone(),
                source,
            })?;
            debug!("Pruned backup {}", entry.path.display());
        }
        Ok(excess)
    }

    fn next_backup_path(&self, layout: &str, folder: &Path) -> PathBuf {
        let timestamp = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let base = format!("{}{}_{}", BACKUP_PREFIX, layout, timestamp);

        let mut candidate = folder.join(format!("{}{}", base, BACKUP_EXTENSION));
        let mut sequence = 1u32;
        while candidate.exists() {
            candidate = folder.join(format!("{}_{}{}", base, sequence, BACKUP_EXTENSION));
            sequence += 1;
        }
        candidate
    }
}
