use clap::Subcommand;
use studyplan_core::study::parse_date;
use studyplan_core::{CalendarStore, Config, NewCalendarEvent};

use super::{not_found, open_database, print_json, CliResult};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// List events, optionally only those on one date
    List {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Add an event
    Add {
        title: String,
        /// YYYY-MM-DD
        date: String,
        /// HH:MM, omit for all-day
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Remove {
        id: String,
    },
}

pub fn run(action: CalendarAction) -> CliResult {
    let db = open_database(&Config::load_or_default())?;
    let mut calendar = CalendarStore::open(&db);

    match action {
        CalendarAction::List { date: Some(date) } => {
            print_json(&calendar.events_on(parse_date(&date)?))?;
        }
        CalendarAction::List { date: None } => print_json(calendar.items())?,
        CalendarAction::Add {
            title,
            date,
            time,
            description,
        } => {
            let event =
                NewCalendarEvent::new(title, parse_date(&date)?, time.as_deref(), description)?;
            let id = calendar.add(event);
            if let Some(event) = calendar.get(&id) {
                print_json(event)?;
            }
        }
        CalendarAction::Remove { id } => {
            if !calendar.remove(&id) {
                return Err(not_found("event", id));
            }
            println!("removed {id}");
        }
    }
    Ok(())
}
