//! Persistent key-value storage
//!
//! Mirrors the browser storage contract: string keys, string values,
//! synchronous writes. Two backends:
//! - **FileStore**: JSON object on disk, rewritten on every mutation
//! - **MemoryStore**: in-process map for tests
//!
//! A failed write leaves the store exactly as it was before the call.
//!
//! Keys iterate in lexical order (BTreeMap), which fixes the order of list
//! keys and therefore which list becomes the fallback after a deletion.
//!
//! Known limitation: concurrent writers (two processes on the same file) are
//! last-write-wins. There is no locking.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

pub mod lists;
pub mod visited;

pub use lists::ListStore;
pub use visited::VisitedBooths;

/// String key-value storage with synchronous writes
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
    /// All keys, lexical order
    fn keys(&self) -> Vec<String>;
}

/// In-memory store
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}

/// Store persisted as a single JSON object file
///
/// The whole file is loaded at open and rewritten after each mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file is missing or corrupt
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = Self::read_items(&path);
        debug!(path = %path.display(), count = items.len(), "Opened file store");
        Self { path, items }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(path: &Path) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return BTreeMap::new(),
        };

        match serde_json::from_str::<BTreeMap<String, Value>>(&contents) {
            // Non-string values are kept as their JSON text
            Ok(raw) => raw
                .into_iter()
                .map(|(key, value)| match value {
                    Value::String(s) => (key, s),
                    other => (key, other.to_string()),
                })
                .collect(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Storage file is corrupt, starting empty");
                BTreeMap::new()
            }
        }
    }

    fn write_items(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Write `items` to disk and only then adopt them as the current state
    fn replace_items(&mut self, items: BTreeMap<String, String>) -> Result<(), StoreError> {
        self.write_items(&items)?;
        self.items = items;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut items = self.items.clone();
        items.insert(key.to_string(), value);
        self.replace_items(items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut items = self.items.clone();
        items.remove(key);
        self.replace_items(items)
    }

    fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }
}
