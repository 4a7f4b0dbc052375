use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListRecord, ListStore};
use crate::storage::KeyValueStore;

pub const BRAIN_DUMP_KEY: &str = "brainDumpItems";

/// A quick note captured to get it out of one's head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainDumpItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl ListRecord for BrainDumpItem {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type BrainDumpStore<S> = ListStore<BrainDumpItem, S>;

impl<S: KeyValueStore> ListStore<BrainDumpItem, S> {
    pub fn open(store: S) -> Self {
        let mut list = Self::with_key(store, BRAIN_DUMP_KEY);
        list.load();
        list
    }

    /// Capture a new item and return its id.
    pub fn add(&mut self, title: &str, created_at: DateTime<Utc>) -> String {
        let title = title.trim().to_string();
        self.insert_with(|id| BrainDumpItem {
            id,
            title,
            completed: false,
            created_at,
        })
    }

    /// Flip `completed`. Returns false when nothing matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.update_with(id, |item| item.completed = !item.completed)
    }

    pub fn pending_count(&self) -> usize {
        self.items().iter().filter(|item| !item.completed).count()
    }
}
