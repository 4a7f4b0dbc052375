//! Pomodoro timer state machine.
//!
//! The timer does not own a thread. The caller drives it by calling
//! `tick()` once per second while it is running and stops calling when
//! `is_running()` turns false.
//!
//! ## Mode Transitions
//!
//! ```text
//! Focus --(done)--> ShortBreak | LongBreak (every 4th session)
//! ShortBreak | LongBreak --(done)--> Focus
//! ```
//!
//! Every transition, automatic or requested, goes through `switch_mode`,
//! which restores the full duration and stops the timer.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = PomodoroTimer::new(TimerDurations::default());
//! timer.start();
//! // Once per second:
//! timer.tick(&mut manager); // Some(Event) when a mode finishes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{TimerDurations, TimerMode};
use crate::events::Event;

/// Receives study minutes when a focus session finishes.
pub trait StudyTimeRecorder {
    fn record_study_minutes(&mut self, minutes: i64);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    durations: TimerDurations,
    mode: TimerMode,
    remaining_secs: u64,
    is_running: bool,
    /// Focus sessions finished since the timer was created.
    #[serde(default)]
    completed_sessions: u32,
}

impl PomodoroTimer {
    /// Create a stopped timer in `Focus` with the full focus duration.
    pub fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Focus,
            remaining_secs: durations.focus_secs,
            is_running: false,
            completed_sessions: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn durations(&self) -> &TimerDurations {
        &self.durations
    }

    pub fn total_secs(&self) -> u64 {
        self.durations.for_mode(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current mode.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        total.saturating_sub(self.remaining_secs) as f64 / total as f64
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            is_running: self.is_running,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress: self.progress(),
            completed_sessions: self.completed_sessions,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Jump to `target`, restore its full duration and stop.
    pub fn switch_mode(&mut self, target: TimerMode) -> Event {
        let from = self.mode;
        self.mode = target;
        self.remaining_secs = self.durations.for_mode(target);
        self.is_running = false;
        Event::ModeSwitched {
            from,
            to: target,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Replace the durations, e.g. after a configuration change.
    ///
    /// An untouched countdown picks up the new full length. One already in
    /// progress keeps its remaining time, capped at the new length.
    pub fn set_durations(&mut self, durations: TimerDurations) {
        let untouched = self.remaining_secs == self.total_secs();
        self.durations = durations;
        let total = self.total_secs();
        self.remaining_secs = if untouched {
            total
        } else {
            self.remaining_secs.min(total)
        };
    }

    /// Restore the current mode's full duration and stop.
    pub fn reset(&mut self) -> Event {
        self.switch_mode(self.mode);
        Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        }
    }

    /// Advance by one second. Returns `Some(Event::TimerCompleted)` when the
    /// current mode runs out.
    pub fn tick<R: StudyTimeRecorder + ?Sized>(&mut self, recorder: &mut R) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete(recorder));
        }
        None
    }

    /// Apply up to `secs` ticks, stopping early once the timer stops.
    pub fn advance<R: StudyTimeRecorder + ?Sized>(
        &mut self,
        secs: u64,
        recorder: &mut R,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..secs {
            if !self.is_running {
                break;
            }
            if let Some(event) = self.tick(recorder) {
                events.push(event);
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete<R: StudyTimeRecorder + ?Sized>(&mut self, recorder: &mut R) -> Event {
        let finished = self.mode;
        let mut study_minutes = 0;
        let next = match finished {
            TimerMode::Focus => {
                self.completed_sessions += 1;
                study_minutes = self.durations.focus_credit_minutes();
                recorder.record_study_minutes(study_minutes);
                let cadence = self.durations.sessions_before_long_break.max(1);
                if self.completed_sessions % cadence == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        };
        self.switch_mode(next);
        Event::TimerCompleted {
            mode: finished,
            next_mode: next,
            completed_sessions: self.completed_sessions,
            study_minutes,
            at: Utc::now(),
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Minutes(Vec<i64>);

    impl StudyTimeRecorder for Minutes {
        fn record_study_minutes(&mut self, minutes: i64) {
            self.0.push(minutes);
        }
    }

    fn run_to_completion(timer: &mut PomodoroTimer, rec: &mut Minutes) -> Event {
        timer.start();
        let total = timer.remaining_secs();
        let mut events = timer.advance(total, rec);
        assert_eq!(events.len(), 1);
        events.remove(0)
    }

    #[test]
    fn start_pause_toggle() {
        let mut timer = PomodoroTimer::default();
        assert!(!timer.is_running());
        assert!(timer.start().is_some());
        assert!(timer.start().is_none());
        assert!(timer.is_running());
        assert!(timer.pause().is_some());
        assert!(!timer.is_running());
        timer.toggle();
        assert!(timer.is_running());
    }

    #[test]
    fn tick_only_counts_while_running() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        assert!(timer.tick(&mut rec).is_none());
        assert_eq!(timer.remaining_secs(), 1500);

        timer.start();
        timer.tick(&mut rec);
        timer.tick(&mut rec);
        assert_eq!(timer.remaining_secs(), 1498);
    }

    #[test]
    fn switch_mode_resets_and_stops() {
        let mut timer = PomodoroTimer::default();
        timer.start();
        let event = timer.switch_mode(TimerMode::LongBreak);
        assert!(matches!(
            event,
            Event::ModeSwitched { from: TimerMode::Focus, to: TimerMode::LongBreak, duration_secs: 900, .. }
        ));
        assert_eq!(timer.mode(), TimerMode::LongBreak);
        assert_eq!(timer.remaining_secs(), 900);
        assert!(!timer.is_running());
    }

    #[test]
    fn focus_completion_records_minutes_and_goes_to_short_break() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        let event = run_to_completion(&mut timer, &mut rec);
        match event {
            Event::TimerCompleted { mode, next_mode, completed_sessions, study_minutes, .. } => {
                assert_eq!(mode, TimerMode::Focus);
                assert_eq!(next_mode, TimerMode::ShortBreak);
                assert_eq!(completed_sessions, 1);
                assert_eq!(study_minutes, 25);
            }
            other => panic!("Expected TimerCompleted, got {other:?}"),
        }
        assert_eq!(rec.0, vec![25]);
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn break_completion_returns_to_focus_without_credit() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        timer.switch_mode(TimerMode::ShortBreak);
        run_to_completion(&mut timer, &mut rec);
        assert_eq!(timer.mode(), TimerMode::Focus);
        assert_eq!(timer.completed_sessions(), 0);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn every_fourth_focus_session_earns_long_break() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        let mut breaks = Vec::new();
        for _ in 0..8 {
            run_to_completion(&mut timer, &mut rec);
            breaks.push(timer.mode());
            run_to_completion(&mut timer, &mut rec);
            assert_eq!(timer.mode(), TimerMode::Focus);
        }
        assert_eq!(
            breaks,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak,
            ]
        );
        assert_eq!(rec.0.iter().sum::<i64>(), 8 * 25);
    }

    #[test]
    fn set_durations_updates_untouched_countdown() {
        let mut timer = PomodoroTimer::default();
        let longer = TimerDurations {
            focus_secs: 3000,
            ..TimerDurations::default()
        };
        timer.set_durations(longer);
        assert_eq!(timer.remaining_secs(), 3000);
        assert_eq!(timer.durations().focus_secs, 3000);
    }

    #[test]
    fn set_durations_caps_countdown_in_progress() {
        let mut rec = Minutes::default();
        let mut timer = PomodoroTimer::default();
        timer.start();
        timer.advance(100, &mut rec);
        assert_eq!(timer.remaining_secs(), 1400);

        timer.set_durations(TimerDurations {
            focus_secs: 2000,
            ..TimerDurations::default()
        });
        assert_eq!(timer.remaining_secs(), 1400);

        timer.set_durations(TimerDurations {
            focus_secs: 600,
            ..TimerDurations::default()
        });
        assert_eq!(timer.remaining_secs(), 600);
        assert!(timer.is_running());
    }

    #[test]
    fn reset_restores_current_mode() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        timer.switch_mode(TimerMode::ShortBreak);
        timer.start();
        timer.advance(100, &mut rec);
        assert_eq!(timer.remaining_secs(), 200);
        timer.reset();
        assert_eq!(timer.mode(), TimerMode::ShortBreak);
        assert_eq!(timer.remaining_secs(), 300);
        assert!(!timer.is_running());
    }

    #[test]
    fn progress_fraction() {
        let mut timer = PomodoroTimer::default();
        let mut rec = Minutes::default();
        assert_eq!(timer.progress(), 0.0);
        timer.start();
        timer.advance(750, &mut rec);
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(timer.remaining_display(), "12:30");
    }

    #[test]
    fn survives_serde_roundtrip() {
        let mut timer = PomodoroTimer::default();
        timer.switch_mode(TimerMode::LongBreak);
        let json = serde_json::to_string(&timer).unwrap();
        let restored: PomodoroTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.mode(), TimerMode::LongBreak);
        assert_eq!(restored.remaining_secs(), 900);
    }
}
