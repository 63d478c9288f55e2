use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cogload-cli", version, about = "Cogload CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Budget reports
    Budget {
        #[command(subcommand)]
        action: commands::budget::BudgetAction,
    },
    /// Week optimization
    Optimize {
        #[command(subcommand)]
        action: commands::optimize::OptimizeAction,
    },
    /// Recovery suggestions
    Recovery {
        #[command(subcommand)]
        action: commands::recovery::RecoveryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Budget { action } => commands::budget::run(action),
        Commands::Optimize { action } => commands::optimize::run(action),
        Commands::Recovery { action } => commands::recovery::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
