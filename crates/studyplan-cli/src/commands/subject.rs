use clap::Subcommand;
use serde::Serialize;

use super::{open_study, print_json, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// List subjects with grade and visibility
    List,
    /// Set a subject's grade (1-9)
    Grade {
        subject: String,
        grade: u8,
    },
    /// Show or hide a subject on the dashboard
    Toggle {
        subject: String,
    },
}

#[derive(Serialize)]
struct SubjectRow<'a> {
    subject: &'a str,
    grade: Option<u8>,
    visible: bool,
}

pub fn run(action: SubjectAction) -> CliResult {
    let mut study = open_study()?;

    match action {
        SubjectAction::List => {
            let data = study.data();
            let rows: Vec<_> = data
                .subjects
                .iter()
                .map(|s| SubjectRow {
                    subject: s,
                    grade: data.subject_grades.get(s).copied(),
                    visible: data.is_subject_visible(s),
                })
                .collect();
            print_json(&rows)?;
        }
        SubjectAction::Grade { subject, grade } => {
            study.update_subject_grade(&subject, grade)?;
            print_json(&study.data().subject_grades)?;
        }
        SubjectAction::Toggle { subject } => {
            let visible = study.toggle_subject_visibility(&subject)?;
            println!("{subject}: {}", if visible { "visible" } else { "hidden" });
        }
    }
    Ok(())
}
