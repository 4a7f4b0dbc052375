//! Reconcile a stored blob with the starter dataset.
//!
//! The merge is per top-level field: a field that is present and well-formed
//! in the blob replaces the default wholesale, anything else keeps the
//! default. Nested collections are never merged element by element.
//!
//! `tasks` and `dDays` hold user records, so a stored array of them is kept
//! even when some elements are malformed; only those elements are dropped.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::model::{StudyData, MAX_PRIORITY_TASKS};

/// Merge `blob` over `defaults`. Never fails; unreadable input yields
/// `defaults` unchanged.
pub fn merge_persisted(blob: &str, defaults: StudyData) -> StudyData {
    let value: Value = match serde_json::from_str(blob) {
        Ok(v) => v,
        Err(e) => {
            warn!("stored study data is not valid JSON, using defaults: {e}");
            return defaults;
        }
    };
    let Value::Object(mut fields) = value else {
        warn!("stored study data is not an object, using defaults");
        return defaults;
    };

    let mut merged = StudyData {
        tasks: take_records(&mut fields, "tasks", defaults.tasks),
        d_days: take_records(&mut fields, "dDays", defaults.d_days),
        today_study_time: take_field(&mut fields, "todayStudyTime", defaults.today_study_time),
        target_study_time: take_field(&mut fields, "targetStudyTime", defaults.target_study_time),
        weekly_study_time: take_field(&mut fields, "weeklyStudyTime", defaults.weekly_study_time),
        monthly_goal: take_field(&mut fields, "monthlyGoal", defaults.monthly_goal),
        subjects: take_field(&mut fields, "subjects", defaults.subjects),
        subject_grades: take_field(&mut fields, "subjectGrades", defaults.subject_grades),
        visible_subjects: take_field(&mut fields, "visibleSubjects", defaults.visible_subjects),
        priority_tasks: take_field(&mut fields, "priorityTasks", defaults.priority_tasks),
    };

    if merged.priority_tasks.len() > MAX_PRIORITY_TASKS {
        warn!(
            stored = merged.priority_tasks.len(),
            "stored priority list exceeds {MAX_PRIORITY_TASKS} entries, truncating"
        );
        merged.priority_tasks.truncate(MAX_PRIORITY_TASKS);
    }

    if !fields.is_empty() {
        let unknown: Vec<&String> = fields.keys().collect();
        debug!(keys = ?unknown, "ignoring unknown stored fields");
    }

    merged
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, name: &str, default: T) -> T {
    match fields.remove(name) {
        None | Some(Value::Null) => {
            debug!(field = name, "field missing from stored data, using default");
            default
        }
        Some(raw) => match serde_json::from_value(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(field = name, "stored field is malformed, using default: {e}");
                default
            }
        },
    }
}

/// Like [`take_field`] for arrays of records, but a malformed element is
/// dropped on its own instead of discarding the whole stored array.
fn take_records<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    name: &str,
    default: Vec<T>,
) -> Vec<T> {
    let raw = match fields.remove(name) {
        Some(Value::Array(raw)) => raw,
        Some(other) => {
            fields.insert(name.to_string(), other);
            return take_field(fields, name, default);
        }
        None => return take_field(fields, name, default),
    };
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(field = name, index, "dropping malformed stored record: {e}");
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(
            field = name,
            kept = records.len(),
            dropped = total - records.len(),
            "stored records lost; the next save will not include them"
        );
    }
    records
}
