//! Stash discovery and layout
//!
//! A stash is the directory that holds the five slot files. It is either a
//! `.sable/` directory found by walking up from the working directory, a
//! directory named explicitly, or the per-user data directory.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::record::Record;
use crate::core::slot::FileSlots;
use crate::core::store::CollectionStore;

/// Marker directory for a local stash
pub const STASH_DIR: &str = ".sable";

/// Where a stash's data directory came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StashOrigin {
    /// Passed on the command line or via `SABLE_DATA_DIR`
    Explicit,
    /// Found by walking up to a `.sable/` directory
    Discovered,
    /// The per-user application data directory
    UserDefault,
}

/// A located stash
#[derive(Debug, Clone)]
pub struct Stash {
    data_dir: PathBuf,
    origin: StashOrigin,
}

impl Stash {
    /// Use a data directory as-is
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            origin: StashOrigin::Explicit,
        }
    }

    /// Resolve the stash to use: explicit directory, else a discovered
    /// `.sable/`, else the per-user data directory
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, StashError> {
        if let Some(dir) = explicit {
            return Ok(Self::at(dir));
        }

        match Self::discover() {
            Ok(stash) => Ok(stash),
            Err(StashError::NotFound { .. }) => Self::user_default(),
            Err(e) => Err(e),
        }
    }

    /// Find a stash by walking up from the current directory
    pub fn discover() -> Result<Self, StashError> {
        let current = std::env::current_dir().map_err(|e| StashError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find a stash by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, StashError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| StashError::IoError(e.to_string()))?;

        loop {
            let stash_dir = current.join(STASH_DIR);
            if stash_dir.is_dir() {
                return Ok(Self {
                    data_dir: stash_dir,
                    origin: StashOrigin::Discovered,
                });
            }

            if !current.pop() {
                return Err(StashError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// The per-user data directory (created on demand)
    pub fn user_default() -> Result<Self, StashError> {
        let dirs = directories::ProjectDirs::from("", "", "sable").ok_or(StashError::NoHomeDir)?;
        let data_dir = dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|e| StashError::IoError(e.to_string()))?;
        Ok(Self {
            data_dir,
            origin: StashOrigin::UserDefault,
        })
    }

    /// Create a new `.sable/` stash under the given directory
    pub fn init(path: &Path) -> Result<Self, StashError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let stash_dir = root.join(STASH_DIR);
        if stash_dir.exists() {
            return Err(StashError::AlreadyExists(root));
        }

        Self::write_layout(&stash_dir)
    }

    /// Initialize even if `.sable/` exists; existing slots are kept
    pub fn init_force(path: &Path) -> Result<Self, StashError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::write_layout(&root.join(STASH_DIR))
    }

    fn write_layout(stash_dir: &Path) -> Result<Self, StashError> {
        std::fs::create_dir_all(stash_dir).map_err(|e| StashError::IoError(e.to_string()))?;

        let config_path = stash_dir.join("config.yaml");
        if !config_path.exists() {
            std::fs::write(&config_path, Self::default_config())
                .map_err(|e| StashError::IoError(e.to_string()))?;
        }

        Ok(Self {
            data_dir: stash_dir.to_path_buf(),
            origin: StashOrigin::Discovered,
        })
    }

    fn default_config() -> &'static str {
        r#"# S.A.B.L.E stash configuration

# Brand recorded on new threads when --brand is not given
# default_brand: DMC

# Default output format (auto, tsv, json, yaml, csv, md, id)
# default_format: auto

# Threads at or below this many skeins are reported as low stock
# low_stock: 1
"#
    }

    /// Directory holding the slot files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn origin(&self) -> StashOrigin {
        self.origin
    }

    /// Stash-level config file
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.yaml")
    }

    /// File-backed slot storage for this stash
    pub fn slots(&self) -> FileSlots {
        FileSlots::new(&self.data_dir)
    }

    /// Open one collection store
    pub fn open<T: Record>(&self) -> CollectionStore<T, FileSlots> {
        CollectionStore::open(self.slots())
    }
}

/// Errors that can occur while locating a stash
#[derive(Debug, Error)]
pub enum StashError {
    #[error("no stash found (searched from {searched_from:?}). Run 'sable init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("stash already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("could not determine a home directory for the default stash")]
    NoHomeDir,

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ShoppingItem;
    use tempfile::tempdir;

    #[test]
    fn test_stash_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let stash = Stash::init(tmp.path()).unwrap();

        assert!(stash.data_dir().ends_with(STASH_DIR));
        assert!(stash.config_path().exists());
    }

    #[test]
    fn test_stash_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Stash::init(tmp.path()).unwrap();

        let err = Stash::init(tmp.path()).unwrap_err();
        assert!(matches!(err, StashError::AlreadyExists(_)));
    }

    #[test]
    fn test_stash_init_force_keeps_slots() {
        let tmp = tempdir().unwrap();
        let stash = Stash::init(tmp.path()).unwrap();
        let mut list = stash.open::<ShoppingItem>();
        list.add(ShoppingItem::new("hoop"));

        let stash = Stash::init_force(tmp.path()).unwrap();
        assert_eq!(stash.open::<ShoppingItem>().len(), 1);
    }

    #[test]
    fn test_stash_discover_walks_up() {
        let tmp = tempdir().unwrap();
        Stash::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let stash = Stash::discover_from(&subdir).unwrap();
        assert_eq!(stash.origin(), StashOrigin::Discovered);
        assert_eq!(
            stash.data_dir().canonicalize().unwrap(),
            tmp.path().join(STASH_DIR).canonicalize().unwrap()
        );
    }

    #[test]
    fn test_stash_discover_fails_without_marker() {
        let tmp = tempdir().unwrap();
        let err = Stash::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, StashError::NotFound { .. }));
    }

    #[test]
    fn test_explicit_stash_wins() {
        let tmp = tempdir().unwrap();
        let stash = Stash::resolve(Some(tmp.path())).unwrap();
        assert_eq!(stash.origin(), StashOrigin::Explicit);
        assert_eq!(stash.data_dir(), tmp.path());
    }
}
