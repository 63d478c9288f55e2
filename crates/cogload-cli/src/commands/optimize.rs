//! Week optimization commands for CLI.
//!
//! The latest proposal is kept as a JSON file next to the database so a
//! review/apply round trip can span two invocations. Every event mutation
//! deletes the file: a proposal computed against an older arrangement is
//! stale and must not be applied.

use std::path::PathBuf;

use clap::Subcommand;
use cogload_core::storage::{self, events_db::EventsDb};
use cogload_core::{
    apply_proposal, budget, recovery, AppConfig, EventStore, WeekOptimizationProposal,
    WeekOptimizer,
};

#[derive(Subcommand)]
pub enum OptimizeAction {
    /// Propose a redistribution of movable events across the week
    Week,
    /// Apply the pending proposal
    Apply {
        /// Comma-separated event IDs to apply (default: all)
        #[arg(long)]
        events: Option<String>,
    },
    /// Quick per-event suggestions (postpone/shorten)
    Suggest {
        /// Apply the suggestion for this event ID
        #[arg(long)]
        apply: Option<String>,
    },
}

fn pending_proposal_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(storage::data_dir()?.join("pending_proposal.json"))
}

/// Drop the pending proposal, if any. Called by every command that
/// changes the event collection.
pub fn invalidate_pending_proposal() -> Result<(), Box<dyn std::error::Error>> {
    let path = pending_proposal_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

pub fn run(action: OptimizeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let mut db = EventsDb::open()?;
    let mut store = EventStore::from_events(db.list_events()?);

    match action {
        OptimizeAction::Week => {
            let optimizer = WeekOptimizer::with_config(config.optimizer_config());
            let proposal = optimizer.optimize_week(store.events());

            std::fs::write(
                pending_proposal_path()?,
                serde_json::to_string_pretty(&proposal)?,
            )?;
            println!("{}", serde_json::to_string_pretty(&proposal)?);
        }
        OptimizeAction::Apply { events } => {
            let path = pending_proposal_path()?;
            if !path.exists() {
                return Err("no pending proposal; run `optimize week` first".into());
            }
            let mut proposal: WeekOptimizationProposal =
                serde_json::from_str(&std::fs::read_to_string(&path)?)?;

            let selected: Option<Vec<String>> = events.map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            });

            let applied = apply_proposal(
                store.events_mut(),
                &mut proposal,
                selected.as_deref(),
            );
            db.replace_all(store.events())?;
            // consumed either way; a partial apply changed the arrangement
            // underneath the remaining changes
            std::fs::remove_file(&path)?;
            println!(
                "Applied {applied} of {} proposed changes",
                proposal.changes.len()
            );
        }
        OptimizeAction::Suggest { apply } => {
            let (_, weekly_total) = budget::weekly_totals(store.events_mut());
            let weekly_debt = weekly_total - config.daily_budget * 7;
            let suggestions = recovery::generate_suggestions(store.events(), weekly_debt);

            match apply {
                Some(event_id) => {
                    let suggestion = suggestions
                        .iter()
                        .find(|s| s.event_id == event_id)
                        .ok_or_else(|| format!("no suggestion for event: {event_id}"))?;
                    if !recovery::apply_suggestion(store.events_mut(), suggestion) {
                        return Err(format!("event not found: {event_id}").into());
                    }
                    store.recompute_costs();
                    db.replace_all(store.events())?;
                    invalidate_pending_proposal()?;
                    println!("Applied suggestion for event {event_id}");
                }
                None => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "weekly_debt": weekly_debt,
                            "suggestions": suggestions,
                        }))?
                    );
                }
            }
        }
    }

    Ok(())
}
