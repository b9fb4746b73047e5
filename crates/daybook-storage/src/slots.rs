//! Slot naming: one autosave slot plus any number of named snapshots.

use crate::error::Result;
use crate::store::KeyValueStore;

/// Slot holding the working document.
pub const AUTOSAVE_KEY: &str = "accounting-app-autosave";

/// Prefix shared by every named snapshot slot.
pub const SNAPSHOT_PREFIX: &str = "accounting-app-data-";

pub fn snapshot_key(name: &str) -> String {
    format!("{SNAPSHOT_PREFIX}{name}")
}

/// Snapshot names are trimmed; a blank name is no name.
pub fn normalize_snapshot_name(raw: &str) -> Option<&str> {
    let name = raw.trim();
    (!name.is_empty()).then_some(name)
}

/// Names of every stored snapshot, ascending.
pub fn snapshot_names(store: &dyn KeyValueStore) -> Result<Vec<String>> {
    let mut names: Vec<String> = store
        .keys()?
        .into_iter()
        .filter_map(|key| key.strip_prefix(SNAPSHOT_PREFIX).map(str::to_string))
        .collect();
    names.sort();
    Ok(names)
}
