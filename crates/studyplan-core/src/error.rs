//! Core error types for studyplan-core.
//!
//! This module defines the error hierarchy using thiserror. The study store
//! logs and swallows storage failures, so these surface mainly through the
//! adapters and the CLI, which reports every failure as a [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Rejected study-store mutations
    #[error("Study data error: {0}")]
    Study(#[from] StudyError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record addressed by id does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// The adapter refused the write (used by in-memory fakes)
    #[error("Write rejected for key '{key}'")]
    WriteRejected { key: String },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Countdown target date already passed
    #[error("Countdown date {date} is {days} day(s) in the past")]
    DateInPast { date: chrono::NaiveDate, days: i64 },

    /// Date string could not be parsed
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Grade outside the 1..=9 scale
    #[error("Grade {0} is outside the 1-9 scale")]
    GradeOutOfRange(u8),

    /// Subject not in the subject list
    #[error("Unknown subject '{0}'")]
    UnknownSubject(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Mutations the study store refused. The state is unchanged whenever one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// The priority working set is already full
    #[error("Priority list is full ({max} entries)")]
    PriorityCapacityExceeded { max: usize },

    /// Positional removal outside the collection
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    /// Caller-side validation failed
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_error_converts_into_core_error() {
        let err: CoreError = StudyError::PriorityCapacityExceeded { max: 3 }.into();
        assert_eq!(err.to_string(), "Study data error: Priority list is full (3 entries)");
    }

    #[test]
    fn not_found_names_the_record() {
        let err = CoreError::NotFound {
            kind: "task",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "task not found: 42");
    }

    #[test]
    fn validation_error_is_transparent_inside_study_error() {
        let err: StudyError = ValidationError::GradeOutOfRange(12).into();
        assert_eq!(err.to_string(), "Grade 12 is outside the 1-9 scale");
    }
}
