//! Slot persistence - one durable blob per record collection
//!
//! A slot holds the JSON encoding of an ordered record list. Reading a slot
//! that was never written, cannot be read, or no longer decodes yields
//! "absent" so callers start from their baseline instead of failing.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Byte-level access to named slots
pub trait SlotStorage {
    /// Read a slot's bytes, `None` if it has never been written
    fn read(&self, slot: &str) -> io::Result<Option<Vec<u8>>>;

    /// Replace a slot's entire contents
    fn write(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Errors that can occur while saving a slot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode slot '{slot}': {source}")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write slot '{slot}': {source}")]
    Write {
        slot: String,
        #[source]
        source: io::Error,
    },
}

/// Slots stored as `<dir>/<slot>.json` files
#[derive(Debug, Clone)]
pub struct FileSlots {
    dir: PathBuf,
}

impl FileSlots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a slot
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStorage for FileSlots {
    fn read(&self, slot: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.slot_path(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.slot_path(slot);
        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &path)?;

        // fsync directory for rename durability
        if let Ok(d) = fs::File::open(&self.dir) {
            let _ = d.sync_all();
        }
        Ok(())
    }
}

/// In-memory slots, used as a persistence double in tests
#[derive(Debug, Default, Clone)]
pub struct MemorySlots {
    slots: HashMap<String, Vec<u8>>,
    reject_writes: bool,
    writes: usize,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot with raw bytes
    pub fn with_slot(mut self, slot: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.slots.insert(slot.to_string(), bytes.into());
        self
    }

    /// Make every subsequent write fail
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Raw bytes currently held by a slot
    pub fn get(&self, slot: &str) -> Option<&[u8]> {
        self.slots.get(slot).map(Vec::as_slice)
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, slot: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, bytes: &[u8]) -> io::Result<()> {
        if self.reject_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "slot storage is read-only",
            ));
        }
        self.slots.insert(slot.to_string(), bytes.to_vec());
        self.writes += 1;
        Ok(())
    }
}

/// Typed load/save of record lists on top of a [`SlotStorage`]
#[derive(Debug)]
pub struct Persistence<S> {
    storage: S,
}

impl<S: SlotStorage> Persistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load a slot's record list
    ///
    /// Returns `None` when the slot is empty, unreadable, or does not decode
    /// into `Vec<T>`.
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Option<Vec<T>> {
        let bytes = match self.storage.read(slot) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(slot, "slot has never been written");
                return None;
            }
            Err(e) => {
                tracing::warn!(slot, "failed to read slot, starting from defaults: {e}");
                return None;
            }
        };

        match serde_json::from_slice::<Vec<T>>(&bytes) {
            Ok(records) => {
                tracing::debug!(slot, count = records.len(), "loaded slot");
                Some(records)
            }
            Err(e) => {
                tracing::warn!(slot, "slot did not decode, starting from defaults: {e}");
                None
            }
        }
    }

    /// Overwrite a slot with the given record list
    pub fn save<T: Serialize>(&mut self, slot: &str, records: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Encode {
            slot: slot.to_string(),
            source,
        })?;
        self.storage
            .write(slot, &bytes)
            .map_err(|source| StoreError::Write {
                slot: slot.to_string(),
                source,
            })?;
        tracing::debug!(slot, count = records.len(), "saved slot");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_never_written_slot_is_absent() {
        let persistence = Persistence::new(MemorySlots::new());
        let loaded: Option<Vec<String>> = persistence.load("kitData");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_corrupt_slot_is_absent() {
        let slots = MemorySlots::new().with_slot("kitData", b"{not json".to_vec());
        let persistence = Persistence::new(slots);
        let loaded: Option<Vec<String>> = persistence.load("kitData");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_wrong_shape_is_absent() {
        let slots = MemorySlots::new().with_slot("kitData", br#"{"name": "x"}"#.to_vec());
        let persistence = Persistence::new(slots);
        let loaded: Option<Vec<String>> = persistence.load("kitData");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let mut persistence = Persistence::new(MemorySlots::new());
        let items = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        persistence.save("shoppingListData", &items).unwrap();

        let loaded: Vec<String> = persistence.load("shoppingListData").unwrap();
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let mut persistence = Persistence::new(MemorySlots::new());
        persistence
            .save("fabricData", &["one".to_string(), "two".to_string()])
            .unwrap();
        persistence.save("fabricData", &["three".to_string()]).unwrap();

        let loaded: Vec<String> = persistence.load("fabricData").unwrap();
        assert_eq!(loaded, vec!["three".to_string()]);
    }

    #[test]
    fn test_save_reports_write_failure() {
        let mut slots = MemorySlots::new();
        slots.set_reject_writes(true);
        let mut persistence = Persistence::new(slots);

        let err = persistence.save("kitData", &["x".to_string()]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }

    #[test]
    fn test_file_slots_roundtrip() {
        let dir = tempdir().unwrap();
        let mut slots = FileSlots::new(dir.path().join("stash"));

        assert!(slots.read("threadData").unwrap().is_none());

        slots.write("threadData", b"[]").unwrap();
        assert_eq!(slots.read("threadData").unwrap().unwrap(), b"[]".to_vec());
        assert!(dir.path().join("stash/threadData.json").exists());
        assert!(!dir.path().join("stash/threadData.json.tmp").exists());
    }

    #[test]
    fn test_file_slots_are_independent() {
        let dir = tempdir().unwrap();
        let mut slots = FileSlots::new(dir.path());

        slots.write("kitData", b"[1]").unwrap();
        slots.write("patternData", b"[2]").unwrap();

        assert_eq!(slots.read("kitData").unwrap().unwrap(), b"[1]".to_vec());
        assert_eq!(slots.read("patternData").unwrap().unwrap(), b"[2]".to_vec());
    }
}
