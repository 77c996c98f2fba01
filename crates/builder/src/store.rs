//! Persistence for configuration trees.
//!
//! Trees are stored as JSON under a versioned key (`<key>.v1.json` on disk).
//! Loading is lenient: missing fields fall back to defaults, and a corrupt
//! document is logged and treated as absent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Version suffix appended to every stored key.
pub const STORE_VERSION: u32 = 1;

/// Errors raised by a [`TreeStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Wrap IO errors.
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde errors.
    #[error("store serialization error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Keys become file names, so path syntax is refused.
    #[error("invalid store key '{0}'")]
    InvalidKey(String),
}

/// Raw key/value persistence for serialized trees.
pub trait TreeStore {
    /// Read the stored text for `key`, if any.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the stored text for `key`.
    fn save_raw(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
}

/// Load and decode a tree; `None` when absent, unreadable or corrupt.
pub fn load_tree<T: DeserializeOwned>(store: &impl TreeStore, key: &str) -> Option<T> {
    let raw = match store.load_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!("Failed to read stored tree '{key}': {err}. Using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(tree) => Some(tree),
        Err(err) => {
            warn!("Failed to parse stored tree '{key}': {err}. Using defaults");
            None
        }
    }
}

/// Encode and store a tree as pretty JSON.
pub fn save_tree<T: Serialize>(
    store: &mut impl TreeStore,
    key: &str,
    tree: &T,
) -> Result<(), StoreError> {
    let contents = serde_json::to_string_pretty(tree)?;
    store.save_raw(key, &contents)
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.v{STORE_VERSION}.json")))
    }
}

impl TreeStore for FileStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_raw(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, contents)?;
        info!("saved tree '{}' to {}", key, path.display());
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TreeStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
