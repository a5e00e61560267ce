//! Settings schema migrations.
//!
//! The store carries a version stamp under `settings_version`. On open, every
//! migration in [`MIGRATIONS`] whose source version is at or above the stored
//! major version runs in order, then the current stamp is written. A store
//! stamped with a newer version than this build understands is left alone.

use std::collections::BTreeMap;

use scriptpanel_core::constants::{
    keys, DEFAULT_LAYOUT_NAME, LEGACY_SETTINGS_VERSION, SETTINGS_VERSION,
};
use scriptpanel_core::{CanvasSettings, DisplayInfo, PlacementInfo};
use tracing::{info, warn};

use crate::error::SettingsResult;
use crate::persistence::SettingsStore;

/// One schema step.
pub struct Migration {
    pub from: u32,
    pub to: u32,
    pub description: &'static str,
    pub apply: fn(&mut SettingsStore) -> SettingsResult<bool>,
}

/// All known migrations, ordered by source version.
pub const MIGRATIONS: &[Migration] = &[Migration {
    from: 0,
    to: 1,
    description: "move the legacy favorites list into the default layout",
    apply: migrate_v0_to_v1,
}];

const LEGACY_KEYS: [&str; 4] = [
    keys::LEGACY_FAVORITES,
    keys::LEGACY_FAVORITES_DISPLAY,
    keys::LEGACY_FAVORITES_LAYOUT,
    keys::LEGACY_PALETTE_DISPLAY,
];

/// Major component of a version stamp. A store without a stamp predates
/// versioning; unreadable stamps are treated the same way.
pub fn schema_major(stamp: Option<&str>) -> u32 {
    let stamp = stamp.unwrap_or(LEGACY_SETTINGS_VERSION);
    stamp
        .split('.')
        .next()
        .and_then(|major| major.trim().parse().ok())
        .unwrap_or(0)
}

/// Major version written by this build.
pub fn current_major() -> u32 {
    schema_major(Some(SETTINGS_VERSION))
}

/// Runs pending migrations and stamps the current version.
///
/// Returns how many migrations changed the store.
pub fn run_migrations(store: &mut SettingsStore) -> SettingsResult<usize> {
    let stamp = store.settings_version();
    let version = schema_major(stamp.as_deref());
    let current = current_major();

    if version > current {
        warn!(
            "Settings version {:?} is newer than {}; leaving the store untouched",
            stamp, SETTINGS_VERSION
        );
        return Ok(0);
    }

    let mut applied = 0;
    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.from >= version && m.to <= current)
    {
        if (migration.apply)(store)? {
            info!(
                "Applied settings migration {} -> {}: {}",
                migration.from, migration.to, migration.description
            );
            applied += 1;
        }
    }

    if stamp.as_deref() != Some(SETTINGS_VERSION) {
        store
            .settings
            .set(keys::SETTINGS_VERSION, SETTINGS_VERSION)?;
        store.settings.save()?;
    }
    Ok(applied)
}

/// Moves the legacy favorites keys into the default layout.
///
/// Returns `false` without touching anything when no legacy key is present,
/// so running it again after a successful run is harmless.
pub fn migrate_v0_to_v1(store: &mut SettingsStore) -> SettingsResult<bool> {
    if !LEGACY_KEYS.iter().any(|key| store.settings.contains(key)) {
        return Ok(false);
    }

    let mut doc = store.get_layout(DEFAULT_LAYOUT_NAME)?;

    if let Some(display) = legacy_value::<BTreeMap<String, DisplayInfo>>(
        store,
        keys::LEGACY_FAVORITES_DISPLAY,
    ) {
        doc.scripts_display.extend(display);
    }

    if let Some(favorites) = legacy_value::<Vec<String>>(store, keys::LEGACY_FAVORITES) {
        for path in favorites {
            doc.scripts_display.entry(path).or_default();
        }
    }

    if let Some(layout) = legacy_value::<BTreeMap<String, PlacementInfo>>(
        store,
        keys::LEGACY_FAVORITES_LAYOUT,
    ) {
        doc.palette_layout.extend(layout);
    }

    if let Some(display) = legacy_value::<CanvasSettings>(store, keys::LEGACY_PALETTE_DISPLAY) {
        doc.palette_display = display;
    }

    store.update_layout(DEFAULT_LAYOUT_NAME, &doc)?;

    for key in LEGACY_KEYS {
        store.settings.remove(key);
    }
    store.settings.save()?;
    Ok(true)
}

fn legacy_value<T: serde::de::DeserializeOwned>(store: &SettingsStore, key: &str) -> Option<T> {
    let value = store.settings.get_value(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Dropping unreadable legacy setting '{}': {}", key, e);
            None
        }
    }
}
