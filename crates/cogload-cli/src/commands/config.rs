//! Configuration management commands for CLI.

use clap::Subcommand;
use cogload_core::AppConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Key: work_start_hour, work_end_hour, extended_end_hour, or daily_budget
        key: String,
        /// New value
        value: String,
    },
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = AppConfig::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Set { key, value } => {
            let mut config = AppConfig::load()?;
            match key.as_str() {
                "work_start_hour" => config.work_start_hour = value.parse()?,
                "work_end_hour" => config.work_end_hour = value.parse()?,
                "extended_end_hour" => config.extended_end_hour = value.parse()?,
                "daily_budget" => config.daily_budget = value.parse()?,
                _ => return Err(format!("unknown configuration key: {key}").into()),
            }
            config.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::Path => {
            println!("{}", AppConfig::path()?.display());
        }
    }

    Ok(())
}
