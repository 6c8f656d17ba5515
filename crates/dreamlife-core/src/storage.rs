//! Key-value storage capability behind every persisted slot.
//!
//! The collection store never touches a global; it is handed a
//! `KeyValueStore`. `FileStore` keeps one JSON file per slot under
//! `.dreamlife/slots/`, `MemoryStore` keeps everything in a map.

use crate::error::Result;
use crate::paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    /// Raw value stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the slot with `value`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Clear the slot. Returns `false` if it was already empty.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// All occupied slot keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to pre-populate a slot with raw text.
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        paths::validate_slot_key(key)?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        paths::validate_slot_key(key)?;
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        paths::validate_slot_key(key)?;
        Ok(self.slots.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.slots.keys().cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the slot directory under `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let dir = paths::slots_dir(root);
        crate::io::ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        paths::validate_slot_key(key)?;
        Ok(paths::slot_file(&self.dir, key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        crate::io::atomic_write(&path, value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        crate::io::remove_if_exists(&path)
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(paths::SLOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if paths::validate_slot_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("habits").unwrap(), None);
        store.set("habits", "[]").unwrap();
        assert_eq!(store.get("habits").unwrap().as_deref(), Some("[]"));
        assert!(store.remove("habits").unwrap());
        assert!(!store.remove("habits").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_rejects_bad_keys() {
        let mut store = MemoryStore::new();
        assert!(store.set("../etc/passwd", "x").is_err());
        assert!(store.get("Dream Goals").is_err());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("letters", "[{\"id\":1}]").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("letters").unwrap().as_deref(),
            Some("[{\"id\":1}]")
        );
        assert!(dir.path().join(".dreamlife/slots/letters.json").exists());
    }

    #[test]
    fn file_store_missing_slot_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("money-goals").unwrap(), None);
    }

    #[test]
    fn file_store_keys_skip_foreign_files() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("session", "{}").unwrap();
        store.set("habits", "[]").unwrap();
        std::fs::write(store.dir().join("notes.txt"), "ignored").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["habits", "session"]);
    }

    #[test]
    fn file_store_remove() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("user", "{}").unwrap();
        assert!(store.remove("user").unwrap());
        assert_eq!(store.get("user").unwrap(), None);
        assert!(!store.remove("user").unwrap());
    }
}
