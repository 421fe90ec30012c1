// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence of the marker list.
//!
//! Markers live in a single named slot of a key-value store, serialized as
//! a JSON array. The whole list is rewritten on every save; there is no
//! partial update and no schema version.

use crate::models::marker::Marker;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Named slots holding text.
pub trait KeyValueStore {
    /// Read a slot. `Ok(None)` when the slot was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the content of a slot.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store keeping one `<key>.json` file per slot in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        // Write beside the slot and rename over it so a crash mid-write
        // leaves the previous list intact.
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}

/// In-memory key-value store.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: std::collections::HashMap<String, String>,
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot.
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every following `set` fail, for exercising error paths.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Storage is read-only");
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the marker list in one slot of a [`KeyValueStore`].
#[derive(Debug)]
pub struct MarkerPersistence<S> {
    backend: S,
    slot: String,
}

impl<S: KeyValueStore> MarkerPersistence<S> {
    pub fn new(backend: S, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Load the stored list.
    ///
    /// Missing, unreadable or malformed data all yield an empty list.
    pub fn load(&self) -> Vec<Marker> {
        let text = match self.backend.get(&self.slot) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::info!("No stored markers in slot '{}'", self.slot);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Could not read stored markers, starting empty: {:#}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Marker>>(&text) {
            Ok(markers) => {
                log::info!("Loaded {} markers from slot '{}'", markers.len(), self.slot);
                markers
            }
            Err(e) => {
                log::warn!("Ignoring malformed markers in slot '{}': {}", self.slot, e);
                Vec::new()
            }
        }
    }

    /// Replace the stored list.
    pub fn save(&mut self, markers: &[Marker]) -> Result<()> {
        let json = serde_json::to_string(markers)?;
        self.backend
            .set(&self.slot, &json)
            .with_context(|| format!("Failed to save markers to slot '{}'", self.slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOT: &str = "markers";

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("pinmap-{}-{}-{}", name, std::process::id(), nanos))
    }

    #[test]
    fn test_load_without_stored_data_is_empty() {
        let persistence = MarkerPersistence::new(MemoryStore::new(), SLOT);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_malformed_text_is_empty() {
        let store = MemoryStore::new().with_slot(SLOT, "[{\"longitude\": 1.0,");
        let persistence = MarkerPersistence::new(store, SLOT);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_structurally_different_value_is_empty() {
        let store = MemoryStore::new().with_slot(SLOT, r#"{"markers": []}"#);
        let persistence = MarkerPersistence::new(store, SLOT);
        assert!(persistence.load().is_empty());

        let store = MemoryStore::new().with_slot(SLOT, r#"[{"x": 1, "y": 2}]"#);
        let persistence = MarkerPersistence::new(store, SLOT);
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let markers = vec![
            Marker::new(-86.25, 41.68, "Home"),
            Marker::new(-86.24, 41.70, "Work"),
        ];
        let mut persistence = MarkerPersistence::new(MemoryStore::new(), SLOT);
        persistence.save(&markers).unwrap();

        assert_eq!(persistence.load(), markers);
    }

    #[test]
    fn test_file_store_missing_slot_is_none() {
        let store = FileStore::new(temp_dir("missing"));
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_between_instances() {
        let dir = temp_dir("reopen");
        let markers = vec![Marker::new(12.5, 55.7, "Harbour")];

        let mut first = MarkerPersistence::new(FileStore::new(&dir), SLOT);
        first.save(&markers).unwrap();

        let second = MarkerPersistence::new(FileStore::new(&dir), SLOT);
        assert_eq!(second.load(), markers);
        assert!(!dir.join("markers.json.tmp").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
