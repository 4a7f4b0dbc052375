pub mod braindump;
pub mod calendar;
pub mod config;
pub mod dday;
pub mod priority;
pub mod study;
pub mod subject;
pub mod task;
pub mod timer;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use studyplan_core::error::Result;
use studyplan_core::study::parse_date;
use studyplan_core::{Config, CoreError, Database, StudyDataManager};

pub type CliResult = Result<()>;

/// Open the configured database.
pub fn open_database(config: &Config) -> Result<Database> {
    Ok(Database::open(&config.storage.database_file)?)
}

/// Open the database and load the study aggregate from it.
pub fn open_study() -> Result<StudyDataManager<Database>> {
    let config = Config::load_or_default();
    Ok(StudyDataManager::open(open_database(&config)?))
}

/// `--today` override or the local calendar date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(raw) => Ok(parse_date(raw)?),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Error for a command addressing a record that does not exist.
pub fn not_found(kind: &'static str, id: String) -> CoreError {
    CoreError::NotFound { kind, id }
}
