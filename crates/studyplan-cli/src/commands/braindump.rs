use chrono::Utc;
use clap::Subcommand;
use studyplan_core::{BrainDumpStore, Config};

use super::{not_found, open_database, print_json, CliResult};

#[derive(Subcommand)]
pub enum BrainDumpAction {
    /// List captured items
    List,
    /// Capture an item
    Add {
        title: String,
    },
    /// Mark an item done / not done
    Toggle {
        id: String,
    },
    /// Delete an item
    Remove {
        id: String,
    },
}

pub fn run(action: BrainDumpAction) -> CliResult {
    let db = open_database(&Config::load_or_default())?;
    let mut items = BrainDumpStore::open(&db);

    match action {
        BrainDumpAction::List => print_json(items.items())?,
        BrainDumpAction::Add { title } => {
            let id = items.add(&title, Utc::now());
            if let Some(item) = items.get(&id) {
                print_json(item)?;
            }
        }
        BrainDumpAction::Toggle { id } => {
            if !items.toggle(&id) {
                return Err(not_found("item", id));
            }
            if let Some(item) = items.get(&id) {
                print_json(item)?;
            }
        }
        BrainDumpAction::Remove { id } => {
            if !items.remove(&id) {
                return Err(not_found("item", id));
            }
            println!("removed {id}");
        }
    }
    Ok(())
}
