//! Recovery suggestion commands for CLI.

use clap::Subcommand;
use cogload_core::storage::events_db::EventsDb;
use cogload_core::{budget, recovery, AppConfig, EventStore};

#[derive(Subcommand)]
pub enum RecoveryAction {
    /// Suggest recovery activities with candidate slots
    Suggest,
}

pub fn run(action: RecoveryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let db = EventsDb::open()?;
    let mut store = EventStore::from_events(db.list_events()?);

    match action {
        RecoveryAction::Suggest => {
            let (daily_totals, weekly_total) = budget::weekly_totals(store.events_mut());

            let overloaded_days: Vec<&String> = daily_totals
                .iter()
                .filter(|(_, total)| **total > config.daily_budget)
                .map(|(day, _)| day)
                .collect();

            // five work days of budget
            let weekly_debt = weekly_total - config.daily_budget * 5;

            let mut activities = recovery::suggest_recovery_activities(weekly_debt.max(0));
            for activity in &mut activities {
                activity.suggested_slots = recovery::find_recovery_slots(
                    store.events(),
                    activity.duration_minutes,
                    true,
                    config.daily_budget,
                );
            }

            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "weekly_debt": weekly_debt,
                    "daily_budget": config.daily_budget,
                    "daily_costs": daily_totals,
                    "overloaded_days": overloaded_days,
                    "activities": activities,
                }))?
            );
        }
    }

    Ok(())
}
