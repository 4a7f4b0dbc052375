use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{ListRecord, ListStore};
use crate::error::ValidationError;
use crate::storage::KeyValueStore;

pub const CALENDAR_KEY: &str = "calendarEvents";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// `HH:MM`, absent for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListRecord for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A calendar entry awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendarEvent {
    title: String,
    date: NaiveDate,
    time: Option<String>,
    description: Option<String>,
}

impl NewCalendarEvent {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        time: Option<&str>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: title.into(),
            date,
            time: time.map(normalize_time).transpose()?,
            description,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    /// `Some(None)` clears the time, making the event all-day.
    pub time: Option<Option<String>>,
    pub description: Option<String>,
}

fn normalize_time(raw: &str) -> Result<String, ValidationError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .map_err(|_| ValidationError::InvalidValue {
            field: "time".into(),
            message: format!("'{raw}' is not HH:MM"),
        })
}

pub type CalendarStore<S> = ListStore<CalendarEvent, S>;

impl<S: KeyValueStore> ListStore<CalendarEvent, S> {
    pub fn open(store: S) -> Self {
        let mut list = Self::with_key(store, CALENDAR_KEY);
        list.load();
        list
    }

    pub fn add(&mut self, event: NewCalendarEvent) -> String {
        self.insert_with(|id| CalendarEvent {
            id,
            title: event.title,
            date: event.date,
            time: event.time,
            description: event.description,
        })
    }

    /// Apply `patch` to the event with `id`. Returns `Ok(false)` when nothing matched.
    pub fn update(&mut self, id: &str, patch: CalendarEventPatch) -> Result<bool, ValidationError> {
        let time = patch
            .time
            .map(|t| t.as_deref().map(normalize_time).transpose())
            .transpose()?;
        Ok(self.update_with(id, |event| {
            if let Some(title) = patch.title {
                event.title = title;
            }
            if let Some(date) = patch.date {
                event.date = date;
            }
            if let Some(time) = time {
                event.time = time;
            }
            if patch.description.is_some() {
                event.description = patch.description;
            }
        }))
    }

    /// Events on `date`, all-day entries first, then by time.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<_> = self.items().iter().filter(|e| e.date == date).collect();
        events.sort_by(|a, b| a.time.cmp(&b.time));
        events
    }
}
