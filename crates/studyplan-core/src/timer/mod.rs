mod engine;
mod mode;

pub use engine::{PomodoroTimer, StudyTimeRecorder};
pub use mode::{TimerDurations, TimerMode};
