//! Built-in starter dataset used when nothing is stored yet, and as the
//! per-field fallback when a stored blob is missing fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{Countdown, PriorityTask, StudyData, Task, TaskPriority};

pub const DEFAULT_SUBJECTS: [&str; 4] = ["Korean", "English", "Math", "Science"];

fn task(id: &str, title: &str, subject: &str, priority: Option<TaskPriority>) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        completed: false,
        subject: Some(subject.to_string()),
        due_date: None,
        estimated_time: None,
        priority,
        description: None,
    }
}

fn countdown(id: &str, title: &str, (y, m, d): (i32, u32, u32), days_left: i64) -> Countdown {
    Countdown {
        id: id.to_string(),
        title: title.to_string(),
        // Literal dates below are valid.
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
        days_left,
    }
}

impl StudyData {
    /// The starter dataset.
    pub fn default_dataset() -> Self {
        let subjects: Vec<String> = DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect();
        let subject_grades: BTreeMap<String, u8> =
            [("Korean", 2), ("English", 3), ("Math", 2), ("Science", 3)]
                .into_iter()
                .map(|(s, g)| (s.to_string(), g))
                .collect();

        let mut tasks = vec![
            task("1", "Solve math workbook p.40-45", "Math", Some(TaskPriority::High)),
            task("2", "Memorize 50 English words", "English", Some(TaskPriority::Medium)),
            task("3", "Read Korean literature passage", "Korean", None),
            task("4", "Review science chapter 3", "Science", Some(TaskPriority::Medium)),
            task("5", "English listening practice", "English", Some(TaskPriority::Low)),
            task("6", "Math wrong-answer notebook", "Math", None),
            task("7", "Summarize science lab report", "Science", Some(TaskPriority::Low)),
        ];
        tasks[0].estimated_time = Some(60);
        tasks[1].estimated_time = Some(30);
        tasks[4].estimated_time = Some(20);

        Self {
            tasks,
            d_days: vec![
                countdown("1", "Midterm Exam", (2025, 4, 21), 30),
                countdown("2", "Mock Exam", (2025, 6, 4), 74),
            ],
            today_study_time: 0,
            target_study_time: 360,
            weekly_study_time: 0,
            monthly_goal: 100,
            visible_subjects: subjects.clone(),
            subjects,
            subject_grades,
            priority_tasks: vec![
                PriorityTask {
                    title: "Finish math workbook chapter".to_string(),
                    description: Some("Pages 40-45, check answers".to_string()),
                },
                PriorityTask {
                    title: "English vocabulary test prep".to_string(),
                    description: None,
                },
                PriorityTask {
                    title: "Science review notes".to_string(),
                    description: None,
                },
            ],
        }
    }
}

impl Default for StudyData {
    fn default() -> Self {
        Self::default_dataset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::study::model::MAX_PRIORITY_TASKS;

    #[test]
    fn starter_dataset_shape() {
        let data = StudyData::default_dataset();
        assert_eq!(data.subjects, DEFAULT_SUBJECTS);
        assert_eq!(data.visible_subjects, DEFAULT_SUBJECTS);
        assert_eq!(data.tasks.len(), 7);
        assert_eq!(data.d_days.len(), 2);
        assert_eq!(data.priority_tasks.len(), MAX_PRIORITY_TASKS);
        assert_eq!(data.subject_grades.len(), 4);
        assert!(data.tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn starter_ids_are_unique() {
        let data = StudyData::default_dataset();
        let mut ids: Vec<_> = data.tasks.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), data.tasks.len());
    }

    #[test]
    fn starter_countdown_dates() {
        let data = StudyData::default_dataset();
        assert_eq!(data.d_days[0].date.to_string(), "2025-04-21");
        assert_eq!(data.d_days[1].date.to_string(), "2025-06-04");
    }
}
