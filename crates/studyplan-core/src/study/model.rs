//! Data shapes of the study store.
//!
//! Everything here serializes with camelCase field names, so the stored blob
//! reads `{"tasks": [...], "dDays": [...], "todayStudyTime": 0, ...}`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest the priority working set may grow.
pub const MAX_PRIORITY_TASKS: usize = 3;

/// Grades use a 1 (best) to 9 scale.
pub const GRADE_RANGE: std::ops::RangeInclusive<u8> = 1..=9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A task before the store has assigned it an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub subject: Option<String>,
    pub due_date: Option<String>,
    pub estimated_time: Option<u32>,
    pub priority: Option<TaskPriority>,
    pub description: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub(crate) fn with_id(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            completed: self.completed,
            subject: self.subject,
            due_date: self.due_date,
            estimated_time: self.estimated_time,
            priority: self.priority,
            description: self.description,
        }
    }
}

/// An exam or deadline countdown ("D-day").
///
/// `days_left` is a snapshot taken when the countdown was created or last
/// edited. It does not change as days pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub days_left: i64,
}

/// Whole days from `today` until `date`.
///
/// Both sides are calendar dates, so this equals rounding the exact
/// difference up to the next whole day.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// A validated countdown awaiting an id. Only constructible through
/// [`NewCountdown::new`], which refuses dates in the past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountdown {
    title: String,
    date: NaiveDate,
    days_left: i64,
}

impl NewCountdown {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let days_left = days_until(date, today);
        if days_left < 0 {
            return Err(ValidationError::DateInPast {
                date,
                days: -days_left,
            });
        }
        Ok(Self {
            title: title.into(),
            date,
            days_left,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn days_left(&self) -> i64 {
        self.days_left
    }

    pub(crate) fn with_id(self, id: String) -> Countdown {
        Countdown {
            id,
            title: self.title,
            date: self.date,
            days_left: self.days_left,
        }
    }
}

/// Partial edit of a countdown. A new date recomputes `days_left`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountdownPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PriorityTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// The whole study aggregate, persisted as a single blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyData {
    pub tasks: Vec<Task>,
    pub d_days: Vec<Countdown>,
    /// Minutes studied today.
    pub today_study_time: i64,
    /// Daily target in minutes.
    pub target_study_time: i64,
    /// Minutes studied this week.
    pub weekly_study_time: i64,
    /// Monthly goal in hours.
    pub monthly_goal: i64,
    pub subjects: Vec<String>,
    pub subject_grades: BTreeMap<String, u8>,
    pub visible_subjects: Vec<String>,
    pub priority_tasks: Vec<PriorityTask>,
}

impl StudyData {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn dday(&self, id: &str) -> Option<&Countdown> {
        self.d_days.iter().find(|d| d.id == id)
    }

    pub fn is_subject_visible(&self, subject: &str) -> bool {
        self.visible_subjects.iter().any(|s| s == subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn days_until_counts_calendar_days() {
        assert_eq!(days_until(date("2025-06-11"), date("2025-06-01")), 10);
        assert_eq!(days_until(date("2025-06-01"), date("2025-06-01")), 0);
        assert_eq!(days_until(date("2025-05-01"), date("2025-06-01")), -31);
    }

    #[test]
    fn new_countdown_rejects_past_dates() {
        let err = NewCountdown::new("Finals", date("2025-05-01"), date("2025-06-01")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DateInPast {
                date: date("2025-05-01"),
                days: 31
            }
        );
    }

    #[test]
    fn new_countdown_accepts_today() {
        let c = NewCountdown::new("Quiz", date("2025-06-01"), date("2025-06-01")).unwrap();
        assert_eq!(c.days_left(), 0);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("June 1st"),
            Err(ValidationError::InvalidDate(_))
        ));
    }

    #[test]
    fn task_json_uses_camel_case_and_skips_empty_options() {
        let task = NewTask {
            estimated_time: Some(30),
            due_date: Some("2025-06-02".into()),
            ..NewTask::new("Essay")
        }
        .priority(TaskPriority::High)
        .with_id("1".into());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["estimatedTime"], 30);
        assert_eq!(json["dueDate"], "2025-06-02");
        assert_eq!(json["priority"], "high");
        assert!(json.get("subject").is_none());
    }

    #[test]
    fn countdown_date_is_date_only() {
        let c = NewCountdown::new("Mock", date("2025-07-01"), date("2025-06-01"))
            .unwrap()
            .with_id("9".into());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["date"], "2025-07-01");
        assert_eq!(json["daysLeft"], 30);
    }
}
