use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// The UI renders from them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A mode ran out and the timer moved on to `next_mode`.
    TimerCompleted {
        mode: TimerMode,
        next_mode: TimerMode,
        completed_sessions: u32,
        /// Minutes credited to today's study time (0 for breaks).
        study_minutes: i64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: TimerMode,
        to: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        is_running: bool,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        completed_sessions: u32,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::TimerReset {
            mode: TimerMode::Focus,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TimerReset");
        assert_eq!(json["mode"], "focus");
    }
}
