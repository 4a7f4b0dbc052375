use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studyplan-cli", version, about = "Studyplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Exam countdowns (D-days)
    Dday {
        #[command(subcommand)]
        action: commands::dday::DdayAction,
    },
    /// Subject grades and dashboard visibility
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Top-three priority list
    Priority {
        #[command(subcommand)]
        action: commands::priority::PriorityAction,
    },
    /// Study time and dashboard summary
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Brain dump notes
    Braindump {
        #[command(subcommand)]
        action: commands::braindump::BrainDumpAction,
    },
    /// Calendar events
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STUDYPLAN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Dday { action } => commands::dday::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Priority { action } => commands::priority::run(action),
        Commands::Study { action } => commands::study::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Braindump { action } => commands::braindump::run(action),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_subcommands() {
        let args = ["studyplan-cli", "task", "add", "Read Ch.3", "--subject", "English"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Task { .. }));

        let cli = Cli::try_parse_from(["studyplan-cli", "study", "add-time", "-15"]).unwrap();
        assert!(matches!(cli.command, Commands::Study { .. }));

        assert!(Cli::try_parse_from(["studyplan-cli", "timer", "switch", "nap"]).is_err());
    }
}
