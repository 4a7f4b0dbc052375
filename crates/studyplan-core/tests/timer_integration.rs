//! Integration tests for the Pomodoro timer feeding the study store.

use studyplan_core::storage::TimerConfig;
use studyplan_core::{Event, MemoryStore, PomodoroTimer, StudyDataManager, TimerMode};

#[test]
fn test_full_pomodoro_cycle_credits_study_time() {
    let mut manager = StudyDataManager::open(MemoryStore::new());
    let mut timer = PomodoroTimer::new(TimerConfig::default().durations());
    let mut completions = Vec::new();

    // Four focus sessions, each followed by its break.
    for _ in 0..4 {
        timer.start();
        completions.extend(timer.advance(timer.remaining_secs(), &mut manager));
        timer.start();
        completions.extend(timer.advance(timer.remaining_secs(), &mut manager));
    }

    assert_eq!(completions.len(), 8);
    assert_eq!(manager.data().today_study_time, 100);
    assert_eq!(timer.completed_sessions(), 4);
    assert_eq!(timer.mode(), TimerMode::Focus);

    let next_modes: Vec<_> = completions
        .iter()
        .filter_map(|e| match e {
            Event::TimerCompleted { mode: TimerMode::Focus, next_mode, .. } => Some(*next_mode),
            _ => None,
        })
        .collect();
    assert_eq!(
        next_modes,
        [
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::LongBreak
        ]
    );
}

#[test]
fn test_paused_timer_does_not_credit() {
    let mut manager = StudyDataManager::open(MemoryStore::new());
    let mut timer = PomodoroTimer::default();

    timer.start();
    timer.advance(1000, &mut manager);
    timer.pause();
    let events = timer.advance(1000, &mut manager);

    assert!(events.is_empty());
    assert_eq!(timer.remaining_secs(), 500);
    assert_eq!(manager.data().today_study_time, 0);
}

#[test]
fn test_configured_durations_drive_credit() {
    let mut config = TimerConfig::default();
    config.focus_duration = 50;
    config.pomodoros_before_long_break = 2;

    let mut manager = StudyDataManager::open(MemoryStore::new());
    let mut timer = PomodoroTimer::new(config.durations());

    timer.start();
    timer.advance(50 * 60, &mut manager);
    assert_eq!(manager.data().today_study_time, 50);
    assert_eq!(timer.mode(), TimerMode::ShortBreak);

    timer.switch_mode(TimerMode::Focus);
    timer.start();
    timer.advance(50 * 60, &mut manager);
    assert_eq!(timer.mode(), TimerMode::LongBreak);
    assert_eq!(manager.data().today_study_time, 100);
}
