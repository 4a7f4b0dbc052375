//! Persisted study data: tasks, countdowns, grades and the priority list.

mod defaults;
mod manager;
mod merge;
mod model;
mod summary;

pub use defaults::DEFAULT_SUBJECTS;
pub use manager::{StudyDataManager, STUDY_DATA_KEY};
pub use merge::merge_persisted;
pub use model::{
    days_until, parse_date, Countdown, CountdownPatch, NewCountdown, NewTask, PriorityTask,
    StudyData, Task, TaskPriority, GRADE_RANGE, MAX_PRIORITY_TASKS,
};
pub use summary::{StudySummary, SubjectGrade};
