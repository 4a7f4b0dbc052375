use clap::Subcommand;
use studyplan_core::PriorityTask;

use super::{open_study, print_json, CliResult};

#[derive(Subcommand)]
pub enum PriorityAction {
    /// List the priority tasks
    List,
    /// Add a priority task (at most three)
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a priority task by position (0-based)
    Remove {
        index: usize,
    },
}

pub fn run(action: PriorityAction) -> CliResult {
    let mut study = open_study()?;

    match action {
        PriorityAction::List => print_json(&study.data().priority_tasks)?,
        PriorityAction::Add { title, description } => {
            study.add_priority_task(PriorityTask { title, description })?;
            print_json(&study.data().priority_tasks)?;
        }
        PriorityAction::Remove { index } => {
            let removed = study.remove_priority_task(index)?;
            println!("removed: {}", removed.title);
        }
    }
    Ok(())
}
