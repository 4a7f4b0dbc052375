//! Small list-shaped stores kept next to the study aggregate.
//!
//! Each list lives under its own key and follows the same rules as
//! [`StudyDataManager`](crate::study::StudyDataManager): read once, write the
//! whole list after every change, log and ignore write failures.

mod brain_dump;
mod calendar;

pub use brain_dump::{BrainDumpItem, BrainDumpStore, BRAIN_DUMP_KEY};
pub use calendar::{CalendarEvent, CalendarEventPatch, CalendarStore, NewCalendarEvent, CALENDAR_KEY};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::ids::IdGenerator;
use crate::storage::KeyValueStore;

/// An element of a [`ListStore`].
pub trait ListRecord: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &str;
}

pub struct ListStore<T, S> {
    store: S,
    key: &'static str,
    items: Vec<T>,
    is_loading: bool,
    ids: IdGenerator,
}

impl<T: ListRecord, S: KeyValueStore> ListStore<T, S> {
    /// Empty, not-yet-loaded list stored under `key`.
    pub fn with_key(store: S, key: &'static str) -> Self {
        Self {
            store,
            key,
            items: Vec::new(),
            is_loading: true,
            ids: IdGenerator::new(),
        }
    }

    /// Read the stored list. Runs once; a missing or unreadable list is empty.
    pub fn load(&mut self) {
        if !self.is_loading {
            return;
        }
        self.items = match self.store.get(self.key) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                warn!(key = self.key, "stored list is malformed, starting empty: {e}");
                Vec::new()
            }),
            Ok(None) => {
                debug!(key = self.key, "no stored list");
                Vec::new()
            }
            Err(e) => {
                warn!(key = self.key, "failed to read list, starting empty: {e}");
                Vec::new()
            }
        };
        for item in &self.items {
            self.ids.observe(item.id());
        }
        self.is_loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Delete the item with `id`. Returns false when nothing matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let mut next = self.items.clone();
        next.retain(|item| item.id() != id);
        if next.len() == self.items.len() {
            return false;
        }
        self.commit(next);
        true
    }

    fn insert_with(&mut self, build: impl FnOnce(String) -> T) -> String {
        let id = self.ids.next_id();
        let mut next = self.items.clone();
        next.push(build(id.clone()));
        self.commit(next);
        id
    }

    fn update_with(&mut self, id: &str, edit: impl FnOnce(&mut T)) -> bool {
        let mut next = self.items.clone();
        let Some(item) = next.iter_mut().find(|item| item.id() == id) else {
            return false;
        };
        edit(item);
        self.commit(next);
        true
    }

    fn commit(&mut self, next: Vec<T>) {
        match serde_json::to_string(&next) {
            Ok(blob) => {
                if let Err(e) = self.store.set(self.key, &blob) {
                    warn!(key = self.key, "failed to persist list, keeping in-memory copy: {e}");
                }
            }
            Err(e) => warn!(key = self.key, "failed to serialize list: {e}"),
        }
        self.items = next;
    }
}
