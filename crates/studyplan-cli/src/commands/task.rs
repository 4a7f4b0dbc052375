//! Task management commands for CLI.

use clap::Subcommand;
use studyplan_core::{NewTask, TaskPriority};

use super::{not_found, open_study, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks
    List {
        /// Only tasks not yet completed
        #[arg(long)]
        pending: bool,
        /// Filter by subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Subject the task belongs to
        #[arg(long)]
        subject: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Estimated minutes
        #[arg(long)]
        minutes: Option<u32>,
        /// Priority: high, medium or low
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut study = open_study()?;

    match action {
        TaskAction::List { pending, subject } => {
            let tasks: Vec<_> = study
                .data()
                .tasks
                .iter()
                .filter(|t| !pending || !t.completed)
                .filter(|t| subject.is_none() || t.subject == subject)
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Add {
            title,
            subject,
            due,
            minutes,
            priority,
            description,
        } => {
            let id = study.add_task(NewTask {
                title,
                completed: false,
                subject,
                due_date: due,
                estimated_time: minutes,
                priority,
                description,
            });
            eprintln!("Task created: {id}");
            if let Some(task) = study.data().task(&id) {
                print_json(task)?;
            }
        }
        TaskAction::Toggle { id } => {
            if !study.toggle_task(&id) {
                return Err(not_found("task", id));
            }
            if let Some(task) = study.data().task(&id) {
                print_json(task)?;
            }
        }
    }
    Ok(())
}
