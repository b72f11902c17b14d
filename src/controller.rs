//! Favorite list state controller
//!
//! Owns the active list and its booths, and is the only writer of the list
//! store and the location fragment. Every mutating operation ends with an
//! explicit commit (store first, then fragment) followed by a full refresh of
//! the available list keys.
//!
//! States: `Uninitialized` -> (`initialize`) -> `NoListSelected` | `Active`.
//!
//! On load the fragment is authoritative for the content of the active list;
//! the store is authoritative for which lists exist. A crash between the
//! store write and the fragment write leaves the fragment stale, which the
//! next load tolerates.

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::codec;
use crate::error::ListError;
use crate::location::{Location, UrlState};
use crate::names;
use crate::store::{KeyValueStore, ListStore};

/// The active list and its in-memory booths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSelection {
    pub key: String,
    pub booths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Uninitialized,
    NoListSelected,
    Active(ActiveSelection),
}

pub struct ListController<S, L> {
    store: ListStore<S>,
    location: L,
    state: ListState,
    available: Vec<String>,
}

impl<S: KeyValueStore, L: Location> ListController<S, L> {
    pub fn new(backend: S, location: L) -> Self {
        Self {
            store: ListStore::new(backend),
            location,
            state: ListState::Uninitialized,
            available: Vec::new(),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn active_key(&self) -> Option<&str> {
        match &self.state {
            ListState::Active(selection) => Some(&selection.key),
            _ => None,
        }
    }

    /// Booths of the active list; empty when no list is active
    pub fn favorites(&self) -> &[String] {
        match &self.state {
            ListState::Active(selection) => &selection.booths,
            _ => &[],
        }
    }

    pub fn is_favorite(&self, label: &str) -> bool {
        self.favorites().iter().any(|b| b == label)
    }

    /// List keys as of the last operation
    pub fn available_lists(&self) -> &[String] {
        &self.available
    }

    pub fn store(&self) -> &ListStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ListStore<S> {
        &mut self.store
    }

    #[cfg(test)]
    pub fn location(&self) -> &L {
        &self.location
    }

    // ------------------------------------------------------------------
    // Load and navigation
    // ------------------------------------------------------------------

    /// Page-load procedure using the thread RNG for migrated list names
    pub fn initialize(&mut self) {
        self.initialize_with(&mut rand::rng());
    }

    /// Page-load procedure, in order:
    /// fragment list key -> legacy migration -> first stored list -> none
    pub fn initialize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let url = UrlState::parse(&self.location.fragment());

        let selection = self
            .activate_from_url(&url)
            .or_else(|| self.migrate_legacy(rng))
            .or_else(|| self.first_existing_list());

        self.enter(selection);
        self.refresh();
    }

    /// Fragment changed outside the controller (history navigation, pasted link)
    /// Same as `initialize` minus legacy migration.
    pub fn handle_external_navigation(&mut self) {
        let url = UrlState::parse(&self.location.fragment());

        let selection = self
            .activate_from_url(&url)
            .or_else(|| self.first_existing_list());

        self.enter(selection);
        self.refresh();
    }

    /// Replace the fragment with the one in `link` and navigate to it
    pub fn open(&mut self, link: &str) {
        let fragment = match link.find('#') {
            Some(idx) => &link[idx + 1..],
            None => link,
        };
        info!(fragment = %fragment, "Navigating to fragment");
        self.location.set_fragment(fragment);
        self.handle_external_navigation();
    }

    /// Step 1: list key and favorites from the fragment
    /// A token that fails to decode yields an empty list, never an error.
    fn activate_from_url(&self, url: &UrlState) -> Option<ActiveSelection> {
        let key = url.list_key.clone()?;

        let booths = match url.encoded_favorites.as_deref() {
            Some(token) => codec::decode(token).unwrap_or_else(|e| {
                warn!(list = %key, error = %e, "Could not decode favorites from fragment, using empty list");
                Vec::new()
            }),
            None => Vec::new(),
        };

        info!(list = %key, count = booths.len(), "Loaded list from fragment");
        Some(ActiveSelection { key, booths })
    }

    /// Step 2: move the legacy single-list record under a generated name
    fn migrate_legacy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ActiveSelection> {
        let legacy = self.store.legacy()?;

        if legacy.is_empty() {
            debug!("Removing empty legacy favorites record");
            if let Err(e) = self.store.remove_legacy() {
                error!(error = %e, "Failed to remove empty legacy record");
            }
            return None;
        }

        let key = names::unique_list_name(rng, &self.store.list_keys());
        if let Err(e) = self.store.set(&key, &legacy) {
            error!(list = %key, error = %e, "Failed to migrate legacy favorites, keeping legacy record");
            return None;
        }
        // A legacy record left behind would be migrated again on the next load
        if let Err(e) = self.store.remove_legacy() {
            error!(error = %e, "Failed to remove legacy record, undoing migration");
            if let Err(e) = self.store.delete(&key) {
                error!(list = %key, error = %e, "Failed to remove migrated list");
            }
            return None;
        }

        info!(list = %key, count = legacy.len(), "Migrated legacy favorites");
        Some(ActiveSelection { key, booths: legacy })
    }

    /// Step 3: first stored list in key order
    fn first_existing_list(&self) -> Option<ActiveSelection> {
        let key = self.store.list_keys().into_iter().next()?;
        let booths = self.store.get(&key);
        info!(list = %key, count = booths.len(), "Falling back to first stored list");
        Some(ActiveSelection { key, booths })
    }

    fn enter(&mut self, selection: Option<ActiveSelection>) {
        match selection {
            Some(selection) => {
                self.state = ListState::Active(selection);
                self.commit();
            }
            None => {
                info!("No list selected");
                self.state = ListState::NoListSelected;
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Flip membership of `label` in the active list; returns the new membership
    pub fn toggle_favorite(&mut self, label: &str) -> Result<bool, ListError> {
        let ListState::Active(selection) = &mut self.state else {
            return Err(ListError::NoActiveList);
        };

        let favorite = match selection.booths.iter().position(|b| b == label) {
            Some(idx) => {
                selection.booths.remove(idx);
                false
            }
            None => {
                selection.booths.push(label.to_string());
                true
            }
        };
        info!(list = %selection.key, booth = %label, favorite, "Toggled favorite");

        self.commit();
        self.refresh();
        Ok(favorite)
    }

    /// Create an empty list and make it active
    pub fn create_list(&mut self, name: &str) -> Result<(), ListError> {
        let key = name.trim();
        if key.is_empty() {
            return Err(ListError::EmptyName);
        }
        if self.store.list_keys().iter().any(|k| k == key) {
            return Err(ListError::DuplicateName(key.to_string()));
        }

        self.store.set(key, &[])?;
        info!(list = %key, "Created list");

        self.state = ListState::Active(ActiveSelection {
            key: key.to_string(),
            booths: Vec::new(),
        });
        self.commit();
        self.refresh();
        Ok(())
    }

    /// Make an existing list active; the store entry is only read
    pub fn switch_list(&mut self, key: &str) -> Result<(), ListError> {
        if !self.store.contains(key) {
            return Err(ListError::UnknownList(key.to_string()));
        }

        let booths = self.store.get(key);
        info!(list = %key, count = booths.len(), "Switched list");
        self.state = ListState::Active(ActiveSelection {
            key: key.to_string(),
            booths,
        });
        self.write_fragment();
        self.refresh();
        Ok(())
    }

    /// Remove a list; if it was active, fall back to the first remaining list
    pub fn delete_list(&mut self, key: &str) -> Result<(), ListError> {
        if !self.store.contains(key) {
            return Err(ListError::UnknownList(key.to_string()));
        }

        self.store.delete(key)?;
        info!(list = %key, "Deleted list");

        if self.active_key() == Some(key) {
            match self.first_existing_list() {
                Some(fallback) => {
                    self.state = ListState::Active(fallback);
                    self.write_fragment();
                }
                None => {
                    info!("Deleted last list, no list selected");
                    self.state = ListState::NoListSelected;
                    self.location.set_fragment("");
                }
            }
        }

        self.refresh();
        Ok(())
    }

    /// Shareable link for the active list, if any
    pub fn share_link(&self, base_url: &str) -> Option<String> {
        let ListState::Active(selection) = &self.state else {
            return None;
        };
        let base = base_url.split('#').next().unwrap_or(base_url);
        let fragment = UrlState::new(selection.key.clone(), codec::encode(&selection.booths)).to_fragment();
        Some(format!("{base}#{fragment}"))
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    /// Write-through of the active selection: store entry, then fragment
    fn commit(&mut self) {
        if let ListState::Active(selection) = &self.state {
            if let Err(e) = self.store.set(&selection.key, &selection.booths) {
                error!(list = %selection.key, error = %e, "Failed to persist list, continuing in memory");
            }
        }
        self.write_fragment();
    }

    fn write_fragment(&mut self) {
        let url = match &self.state {
            ListState::Active(selection) => {
                UrlState::new(selection.key.clone(), codec::encode(&selection.booths))
            }
            _ => UrlState::default(),
        };
        self.location.set_fragment(&url.to_fragment());
    }

    fn refresh(&mut self) {
        self.available = self.store.list_keys();
        debug!(lists = ?self.available, "Refreshed available lists");
    }
}
