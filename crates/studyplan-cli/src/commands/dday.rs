//! Exam countdown commands.

use clap::Subcommand;
use studyplan_core::study::parse_date;
use studyplan_core::{CountdownPatch, NewCountdown};

use super::{not_found, open_study, print_json, resolve_today, CliResult};

#[derive(Subcommand)]
pub enum DdayAction {
    /// List countdowns
    List,
    /// Add a countdown
    Add {
        /// Exam or deadline name
        title: String,
        /// Target date (YYYY-MM-DD)
        date: String,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Edit a countdown
    Update {
        /// Countdown ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New target date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Delete a countdown
    Remove {
        /// Countdown ID
        id: String,
    },
    /// Recompute days left for every countdown
    Refresh {
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

pub fn run(action: DdayAction) -> CliResult {
    let mut study = open_study()?;

    match action {
        DdayAction::List => print_json(&study.data().d_days)?,
        DdayAction::Add { title, date, today } => {
            let today = resolve_today(today.as_deref())?;
            let countdown = NewCountdown::new(title, parse_date(&date)?, today)?;
            let id = study.add_dday(countdown);
            if let Some(c) = study.dday(&id) {
                print_json(c)?;
            }
        }
        DdayAction::Update {
            id,
            title,
            date,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            let patch = CountdownPatch {
                title,
                date: date.as_deref().map(parse_date).transpose()?,
            };
            if !study.update_dday(&id, patch, today)? {
                return Err(not_found("countdown", id));
            }
            if let Some(c) = study.dday(&id) {
                print_json(c)?;
            }
        }
        DdayAction::Remove { id } => {
            if !study.remove_dday(&id) {
                return Err(not_found("countdown", id));
            }
            println!("removed {id}");
        }
        DdayAction::Refresh { today } => {
            study.refresh_ddays(resolve_today(today.as_deref())?);
            print_json(&study.data().d_days)?;
        }
    }
    Ok(())
}
