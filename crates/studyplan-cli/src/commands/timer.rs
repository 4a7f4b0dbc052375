use clap::Subcommand;
use studyplan_core::{
    Config, Database, Event, KeyValueStore, PomodoroTimer, StudyDataManager, TimerMode,
};

use super::{open_database, print_json, CliResult};

const TIMER_KEY: &str = "timerState";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Restore the current mode's full duration
    Reset,
    /// Switch to focus, short-break or long-break
    Switch {
        mode: TimerMode,
    },
    /// Advance the timer by whole seconds
    Tick {
        #[arg(long, default_value = "1")]
        seconds: u64,
    },
}

/// Restore the stored timer, applying the durations currently configured.
fn load_timer(db: &Database, config: &Config) -> PomodoroTimer {
    match db.get(TIMER_KEY) {
        Ok(Some(json)) => match serde_json::from_str::<PomodoroTimer>(&json) {
            Ok(mut timer) => {
                timer.set_durations(config.timer.durations());
                return timer;
            }
            Err(e) => tracing::warn!("stored timer is unreadable, starting fresh: {e}"),
        },
        Ok(None) => {}
        Err(e) => tracing::warn!("failed to read timer: {e}"),
    }
    PomodoroTimer::new(config.timer.durations())
}

fn save_timer(db: &Database, timer: &PomodoroTimer) -> CliResult {
    let json = serde_json::to_string(timer)?;
    db.set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let config = Config::load_or_default();
    let db = open_database(&config)?;
    let mut timer = load_timer(&db, &config);

    let events: Vec<Event> = match action {
        TimerAction::Status => vec![timer.snapshot()],
        TimerAction::Start => timer.start().into_iter().collect(),
        TimerAction::Pause => timer.pause().into_iter().collect(),
        TimerAction::Reset => vec![timer.reset()],
        TimerAction::Switch { mode } => vec![timer.switch_mode(mode)],
        TimerAction::Tick { seconds } => {
            let mut study = StudyDataManager::open(&db);
            let mut events = timer.advance(seconds, &mut study);
            events.push(timer.snapshot());
            events
        }
    };

    save_timer(&db, &timer)?;
    if events.is_empty() {
        print_json(&timer.snapshot())?;
    } else {
        print_json(&events)?;
    }
    Ok(())
}
