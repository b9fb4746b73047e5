use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Result, StorageError};
use crate::fs::atomic_write_bytes;

/// String-keyed, string-valued durable store.
///
/// Implementations are internally synchronized so one store can be shared (via
/// `Arc`) between the session and its autosave task.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Every key currently stored, in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

type Slots = BTreeMap<String, String>;

fn slot_bytes(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Refuse a write that would push the store past `quota` bytes (keys plus values).
fn check_quota(slots: &Slots, quota: Option<usize>, key: &str, value: &str) -> Result<()> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let current: usize = slots.iter().map(|(k, v)| slot_bytes(k, v)).sum();
    let replaced = slots.get(key).map_or(0, |old| slot_bytes(key, old));
    let required = current - replaced + slot_bytes(key, value);
    if required > limit {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            required,
            limit,
        });
    }
    Ok(())
}

/// In-process store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<Slots>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys plus values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: Arc::default(),
            quota: Some(bytes),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().expect("memory store mutex poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("memory store mutex poisoned");
        check_quota(&slots, self.quota, key, value)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let slots = self.slots.lock().expect("memory store mutex poisoned");
        Ok(slots.keys().cloned().collect())
    }
}

/// Store persisted as one JSON object (`{"key": "value", ...}`) in a single file.
///
/// Every `set` rewrites the whole file atomically; the in-memory copy is only
/// updated once the write has succeeded.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    slots: Arc<Mutex<Slots>>,
    quota: Option<usize>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let slots = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Slots::new(),
            Ok(text) => serde_json::from_str::<Slots>(&text)
                .map_err(|_| StorageError::CorruptStore { path: path.clone() })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Slots::new(),
            Err(err) => return Err(err.into()),
        };
        log::debug!("opened store {} with {} slots", path.display(), slots.len());
        Ok(Self {
            path,
            slots: Arc::new(Mutex::new(slots)),
            quota: None,
        })
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().expect("file store mutex poisoned");
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("file store mutex poisoned");
        check_quota(&slots, self.quota, key, value)?;

        let mut next = slots.clone();
        next.insert(key.to_string(), value.to_string());
        let bytes = serde_json::to_vec_pretty(&next)?;
        atomic_write_bytes(&self.path, &bytes)?;

        *slots = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let slots = self.slots.lock().expect("file store mutex poisoned");
        Ok(slots.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_enforces_quota_on_total_bytes() {
        let store = MemoryStore::with_quota(10);
        store.set("a", "1234").expect("5 bytes fits");
        store.set("a", "123456789").expect("replacing a slot only counts the new value");

        let err = store.set("b", "1").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 12,
                limit: 10,
                ..
            }
        ));
        assert_eq!(store.get("b").expect("get"), None);
        assert_eq!(store.get("a").expect("get").as_deref(), Some("123456789"));
    }

    #[test]
    fn memory_store_clones_share_slots() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").expect("set");
        assert_eq!(other.get("k").expect("get").as_deref(), Some("v"));
        assert_eq!(other.keys().expect("keys"), vec!["k".to_string()]);
    }

    #[test]
    fn file_store_reopens_with_previous_slots() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("store.json");

        let store = FileStore::open(&path).expect("open missing file");
        assert!(store.keys().expect("keys").is_empty());
        store.set("b", "2").expect("set b");
        store.set("a", "1").expect("set a");

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.keys().expect("keys"), vec!["a", "b"]);
        assert_eq!(reopened.get("b").expect("get").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_rejects_non_object_files() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").expect("write");

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::CorruptStore { .. }));
    }

    #[test]
    fn file_store_quota_failure_leaves_file_untouched() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = tmp.path().join("store.json");
        let store = FileStore::open(&path).expect("open").with_quota(8);
        store.set("k", "v").expect("small write");
        let before = std::fs::read_to_string(&path).expect("read");

        assert!(store.set("k2", "too large").is_err());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), before);
        assert_eq!(store.get("k2").expect("get"), None);
    }
}
