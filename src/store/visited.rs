//! Visited booth marks for the list overview
//!
//! Stored under `visitedBooths` as a JSON object of label -> bool,
//! shared by every list.

use std::collections::BTreeMap;
use tracing::warn;

use super::KeyValueStore;
use crate::constants::store::VISITED_KEY;
use crate::error::StoreError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VisitedBooths {
    marks: BTreeMap<String, bool>,
}

impl VisitedBooths {
    /// Load marks from the store; corrupt content reads as no marks
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let Some(raw) = store.get_item(VISITED_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<BTreeMap<String, bool>>(&raw) {
            Ok(marks) => Self { marks },
            Err(e) => {
                warn!(error = %e, "Corrupt visited booths entry, treating as empty");
                Self::default()
            }
        }
    }

    pub fn is_visited(&self, label: &str) -> bool {
        self.marks.get(label).copied().unwrap_or(false)
    }

    /// Flip the mark for `label` and write through; returns the new mark
    pub fn toggle<S: KeyValueStore>(&mut self, store: &mut S, label: &str) -> Result<bool, StoreError> {
        let visited = !self.is_visited(label);
        self.marks.insert(label.to_string(), visited);
        store.set_item(VISITED_KEY, serde_json::to_string(&self.marks)?)?;
        Ok(visited)
    }
}
