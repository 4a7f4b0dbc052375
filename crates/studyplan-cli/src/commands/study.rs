use clap::Subcommand;

use super::{open_study, print_json, CliResult};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Add minutes to today's study time (negative to correct)
    AddTime {
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Print the dashboard summary
    Summary,
}

pub fn run(action: StudyAction) -> CliResult {
    let mut study = open_study()?;

    match action {
        StudyAction::AddTime { minutes } => {
            study.update_study_time(minutes);
            println!("today: {} min", study.data().today_study_time);
        }
        StudyAction::Summary => print_json(&study.data().summary())?,
    }
    Ok(())
}
