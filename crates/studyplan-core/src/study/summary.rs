//! Dashboard figures derived from `StudyData`. Nothing here is stored.

use serde::Serialize;

use super::model::{Countdown, StudyData};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub today_minutes: i64,
    pub target_minutes: i64,
    /// 0.0 .. 1.0; zero when no target is set.
    pub today_progress: f64,
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    /// Grades of the visible subjects, in display order.
    pub visible_grades: Vec<SubjectGrade>,
    /// Countdown with the fewest non-negative days left.
    pub next_dday: Option<Countdown>,
}

impl StudyData {
    pub fn today_progress(&self) -> f64 {
        if self.target_study_time <= 0 {
            return 0.0;
        }
        (self.today_study_time.max(0) as f64 / self.target_study_time as f64).min(1.0)
    }

    pub fn summary(&self) -> StudySummary {
        let completed_tasks = self.tasks.iter().filter(|t| t.completed).count();
        StudySummary {
            today_minutes: self.today_study_time,
            target_minutes: self.target_study_time,
            today_progress: self.today_progress(),
            pending_tasks: self.tasks.len() - completed_tasks,
            completed_tasks,
            visible_grades: self
                .visible_subjects
                .iter()
                .map(|s| SubjectGrade {
                    subject: s.clone(),
                    grade: self.subject_grades.get(s).copied(),
                })
                .collect(),
            next_dday: self
                .d_days
                .iter()
                .filter(|d| d.days_left >= 0)
                .min_by_key(|d| d.days_left)
                .cloned(),
        }
    }
}
