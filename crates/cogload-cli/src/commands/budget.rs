//! Budget report commands for CLI.

use clap::Subcommand;
use cogload_core::storage::events_db::EventsDb;
use cogload_core::{budget, AppConfig, EventStore};

use super::parse_date;

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Budget status for one day
    Daily {
        /// Date to report on (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Per-day totals for the whole collection
    Weekly,
}

pub fn run(action: BudgetAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let db = EventsDb::open()?;
    let mut store = EventStore::from_events(db.list_events()?);

    match action {
        BudgetAction::Daily { date } => {
            let day = match date {
                Some(raw) => parse_date(&raw)?,
                None => chrono::Utc::now().date_naive(),
            };
            let status = budget::daily_status(store.events_mut(), day, config.daily_budget);
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        BudgetAction::Weekly => {
            let (daily_totals, weekly_total) = budget::weekly_totals(store.events_mut());
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "daily_totals": daily_totals,
                    "weekly_total": weekly_total,
                }))?
            );
        }
    }

    Ok(())
}
