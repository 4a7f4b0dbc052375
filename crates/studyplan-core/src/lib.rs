//! # Studyplan Core Library
//!
//! This library provides the core logic for Studyplan, a study planner with
//! tasks, exam countdowns, subject grades and a Pomodoro focus timer. The CLI
//! binary is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Study store**: the `StudyData` aggregate, loaded once from a
//!   key-value store, merged field by field with a starter dataset, and
//!   written back whole after every change
//! - **Timer**: a tick-driven Pomodoro state machine that credits finished
//!   focus sessions to today's study time
//! - **Storage**: a narrow key-value trait with SQLite and in-memory
//!   adapters, plus TOML-based configuration
//!
//! ## Key Components
//!
//! - [`StudyDataManager`]: owner of the study aggregate
//! - [`PomodoroTimer`]: focus / break timer
//! - [`KeyValueStore`]: persistence seam
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod ids;
pub mod lists;
pub mod storage;
pub mod study;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, StudyError, ValidationError};
pub use events::Event;
pub use lists::{BrainDumpItem, BrainDumpStore, CalendarEvent, CalendarStore, NewCalendarEvent};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use study::{
    Countdown, CountdownPatch, NewCountdown, NewTask, PriorityTask, StudyData, StudyDataManager,
    Task, TaskPriority,
};
pub use timer::{PomodoroTimer, StudyTimeRecorder, TimerDurations, TimerMode};
