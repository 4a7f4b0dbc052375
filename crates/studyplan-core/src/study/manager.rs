//! The study data manager.
//!
//! `StudyDataManager` is the only reader and writer of the `studyData` key.
//! It reads the store once, at `load()`, and afterwards serves every read
//! from memory.
//!
//! ## Write contract
//!
//! Every mutation builds a complete new `StudyData`, writes the whole
//! aggregate under one key, then replaces the in-memory value. There are no
//! partial or per-field writes. A failed write is logged and otherwise
//! ignored: the in-memory value stays authoritative for the rest of the
//! session and the change is lost only if the process restarts first.
//!
//! Rejected mutations (full priority list, bad index, past date) leave the
//! state untouched and write nothing.
//!
//! `priority_tasks` is kept separate from `tasks`. Adding a task with a
//! priority does not add a priority entry, and removing a priority entry
//! does not touch `tasks`.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::merge::merge_persisted;
use super::model::{
    days_until, Countdown, CountdownPatch, NewCountdown, NewTask, PriorityTask, StudyData,
    GRADE_RANGE, MAX_PRIORITY_TASKS,
};
use crate::error::{StudyError, ValidationError};
use crate::ids::IdGenerator;
use crate::storage::KeyValueStore;
use crate::timer::StudyTimeRecorder;

/// Storage key of the study aggregate.
pub const STUDY_DATA_KEY: &str = "studyData";

pub struct StudyDataManager<S> {
    store: S,
    data: StudyData,
    is_loading: bool,
    ids: IdGenerator,
}

impl<S: KeyValueStore> StudyDataManager<S> {
    /// Create a manager holding the starter dataset. Nothing is read until
    /// [`load`](Self::load) runs; until then `is_loading()` is true.
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, IdGenerator::new())
    }

    pub fn with_id_generator(store: S, ids: IdGenerator) -> Self {
        Self {
            store,
            data: StudyData::default_dataset(),
            is_loading: true,
            ids,
        }
    }

    /// Create and load in one step.
    pub fn open(store: S) -> Self {
        let mut manager = Self::new(store);
        manager.load();
        manager
    }

    /// Read and merge the stored aggregate.
    ///
    /// Runs once; later calls do nothing. Whatever was in memory before the
    /// first call is replaced.
    pub fn load(&mut self) {
        if !self.is_loading {
            return;
        }
        let defaults = StudyData::default_dataset();
        self.data = match self.store.get(STUDY_DATA_KEY) {
            Ok(Some(blob)) => {
                debug!(bytes = blob.len(), "loaded stored study data");
                merge_persisted(&blob, defaults)
            }
            Ok(None) => {
                debug!("no stored study data, using starter dataset");
                defaults
            }
            Err(e) => {
                warn!("failed to read study data, using starter dataset: {e}");
                defaults
            }
        };
        let task_ids = self.data.tasks.iter().map(|t| &t.id);
        let dday_ids = self.data.d_days.iter().map(|d| &d.id);
        for id in task_ids.chain(dday_ids) {
            self.ids.observe(id);
        }
        self.is_loading = false;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn data(&self) -> &StudyData {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// True when another priority entry would be accepted.
    pub fn has_priority_capacity(&self) -> bool {
        self.data.priority_tasks.len() < MAX_PRIORITY_TASKS
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Flip `completed` on the task with `id`. Returns false when no task matches.
    pub fn toggle_task(&mut self, id: &str) -> bool {
        let mut next = self.data.clone();
        let Some(task) = next.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        self.commit(next);
        true
    }

    /// Append a task and return its new id.
    pub fn add_task(&mut self, task: NewTask) -> String {
        let id = self.ids.next_id();
        let mut next = self.data.clone();
        next.tasks.push(task.with_id(id.clone()));
        self.commit(next);
        id
    }

    /// Add `delta_minutes` to today's study time.
    pub fn update_study_time(&mut self, delta_minutes: i64) {
        let mut next = self.data.clone();
        next.today_study_time = next.today_study_time.saturating_add(delta_minutes);
        self.commit(next);
    }

    /// Append a validated countdown and return its new id.
    pub fn add_dday(&mut self, countdown: NewCountdown) -> String {
        let id = self.ids.next_id();
        let mut next = self.data.clone();
        next.d_days.push(countdown.with_id(id.clone()));
        self.commit(next);
        id
    }

    /// Validate and add a countdown in one call.
    pub fn schedule_dday(
        &mut self,
        title: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<String, StudyError> {
        let countdown = NewCountdown::new(title, date, today)?;
        Ok(self.add_dday(countdown))
    }

    /// Patch the countdown with `id`. A new date recomputes `days_left`
    /// against `today` and must not be in the past.
    ///
    /// Returns `Ok(false)` when no countdown matches.
    pub fn update_dday(
        &mut self,
        id: &str,
        patch: CountdownPatch,
        today: NaiveDate,
    ) -> Result<bool, StudyError> {
        let mut next = self.data.clone();
        let Some(countdown) = next.d_days.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };
        if let Some(date) = patch.date {
            let days_left = days_until(date, today);
            if days_left < 0 {
                return Err(ValidationError::DateInPast {
                    date,
                    days: -days_left,
                }
                .into());
            }
            countdown.date = date;
            countdown.days_left = days_left;
        }
        if let Some(title) = patch.title {
            countdown.title = title;
        }
        self.commit(next);
        Ok(true)
    }

    /// Delete the countdown with `id`. Returns false when no countdown matches.
    pub fn remove_dday(&mut self, id: &str) -> bool {
        let mut next = self.data.clone();
        let before = next.d_days.len();
        next.d_days.retain(|d| d.id != id);
        if next.d_days.len() == before {
            return false;
        }
        self.commit(next);
        true
    }

    /// Recompute every `days_left` snapshot against `today`. Countdowns whose
    /// date has passed get a negative value; they are not removed.
    pub fn refresh_ddays(&mut self, today: NaiveDate) {
        let mut next = self.data.clone();
        for countdown in &mut next.d_days {
            countdown.days_left = days_until(countdown.date, today);
        }
        self.commit(next);
    }

    /// Hide `subject` when visible, show it (at the end) otherwise.
    /// Returns whether the subject is visible afterwards.
    ///
    /// Hiding always succeeds. Only subjects listed in `subjects` can be
    /// shown.
    pub fn toggle_subject_visibility(&mut self, subject: &str) -> Result<bool, StudyError> {
        let mut next = self.data.clone();
        let visible = if next.is_subject_visible(subject) {
            next.visible_subjects.retain(|s| s != subject);
            false
        } else {
            if !next.subjects.iter().any(|s| s == subject) {
                return Err(ValidationError::UnknownSubject(subject.to_string()).into());
            }
            next.visible_subjects.push(subject.to_string());
            true
        };
        self.commit(next);
        Ok(visible)
    }

    /// Append to the priority list unless it already holds
    /// [`MAX_PRIORITY_TASKS`] entries.
    pub fn add_priority_task(&mut self, task: PriorityTask) -> Result<(), StudyError> {
        if !self.has_priority_capacity() {
            debug!(title = %task.title, "priority list full, ignoring");
            return Err(StudyError::PriorityCapacityExceeded {
                max: MAX_PRIORITY_TASKS,
            });
        }
        let mut next = self.data.clone();
        next.priority_tasks.push(task);
        self.commit(next);
        Ok(())
    }

    /// Remove the priority entry at `index` and return it.
    pub fn remove_priority_task(&mut self, index: usize) -> Result<PriorityTask, StudyError> {
        let len = self.data.priority_tasks.len();
        if index >= len {
            return Err(StudyError::IndexOutOfRange {
                collection: "priorityTasks",
                index,
                len,
            });
        }
        let mut next = self.data.clone();
        let removed = next.priority_tasks.remove(index);
        self.commit(next);
        Ok(removed)
    }

    /// Set the grade for `subject`, adding the entry if needed.
    pub fn update_subject_grade(&mut self, subject: &str, grade: u8) -> Result<(), StudyError> {
        if !GRADE_RANGE.contains(&grade) {
            return Err(ValidationError::GradeOutOfRange(grade).into());
        }
        let mut next = self.data.clone();
        next.subject_grades.insert(subject.to_string(), grade);
        self.commit(next);
        Ok(())
    }

    /// Look up a countdown by id.
    pub fn dday(&self, id: &str) -> Option<&Countdown> {
        self.data.dday(id)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit(&mut self, next: StudyData) {
        self.persist(&next);
        self.data = next;
    }

    fn persist(&self, data: &StudyData) {
        let blob = match serde_json::to_string(data) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("failed to serialize study data: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(STUDY_DATA_KEY, &blob) {
            warn!("failed to persist study data, keeping in-memory copy: {e}");
        }
    }
}

impl<S: KeyValueStore> StudyTimeRecorder for StudyDataManager<S> {
    fn record_study_minutes(&mut self, minutes: i64) {
        self.update_study_time(minutes);
    }
}
