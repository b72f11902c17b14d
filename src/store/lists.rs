//! Named favorite lists on top of a key-value store
//!
//! Each list lives under `favorites:<listKey>` as a JSON array of booth
//! labels. Missing or corrupt entries read as empty lists.

use tracing::warn;

use super::KeyValueStore;
use crate::constants::store::{LEGACY_KEY, LIST_PREFIX};
use crate::error::StoreError;

/// Namespaced favorite list access
#[derive(Debug)]
pub struct ListStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ListStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    fn storage_key(key: &str) -> String {
        format!("{LIST_PREFIX}{key}")
    }

    /// Booths stored for `key`; empty when missing or corrupt
    pub fn get(&self, key: &str) -> Vec<String> {
        self.read_array(&Self::storage_key(key))
    }

    pub fn set(&mut self, key: &str, booths: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string(booths)?;
        self.backend.set_item(&Self::storage_key(key), json)
    }

    pub fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.backend.remove_item(&Self::storage_key(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.backend.get_item(&Self::storage_key(key)).is_some()
    }

    /// Every list key under the namespace, lexical order
    pub fn list_keys(&self) -> Vec<String> {
        self.backend
            .keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix(LIST_PREFIX).map(str::to_string))
            .collect()
    }

    /// Legacy single-list record, if one is stored at all
    /// Returns `Some(vec![])` for a present but empty or corrupt record
    pub fn legacy(&self) -> Option<Vec<String>> {
        self.backend
            .get_item(LEGACY_KEY)
            .map(|_| self.read_array(LEGACY_KEY))
    }

    pub fn remove_legacy(&mut self) -> Result<(), StoreError> {
        self.backend.remove_item(LEGACY_KEY)
    }

    fn read_array(&self, storage_key: &str) -> Vec<String> {
        let Some(raw) = self.backend.get_item(storage_key) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(booths) => booths,
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Corrupt list entry, treating as empty");
                Vec::new()
            }
        }
    }
}
