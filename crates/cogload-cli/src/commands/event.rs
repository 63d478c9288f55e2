//! Event management commands for CLI.

use clap::Subcommand;
use cogload_core::storage::events_db::EventsDb;
use cogload_core::{cost, CalendarSource, DemoCalendar, Event, EventCategory, EventStore};

use super::{parse_date, parse_datetime};
use crate::commands::optimize::invalidate_pending_proposal;

#[derive(Subcommand)]
pub enum EventAction {
    /// Create a new event
    Add {
        /// Event title
        title: String,
        /// Start time (RFC 3339 or YYYY-MM-DDTHH:MM)
        start: String,
        /// End time (RFC 3339 or YYYY-MM-DDTHH:MM)
        end: String,
        /// Event description
        #[arg(long)]
        description: Option<String>,
        /// Participant count
        #[arg(long)]
        participants: Option<i32>,
        /// Whether the event has an agenda
        #[arg(long)]
        agenda: Option<bool>,
        /// Whether the event requires switching tools
        #[arg(long)]
        tool_switch: Option<bool>,
        /// Category: meeting, deep_work, recovery, or admin
        #[arg(long)]
        category: Option<String>,
        /// Whether the optimizer may move this event
        #[arg(long)]
        flexible: Option<bool>,
    },
    /// List events with fresh costs
    List,
    /// Get event details
    Get {
        /// Event ID
        id: String,
    },
    /// Show the cost breakdown for an event
    Cost {
        /// Event ID
        id: String,
    },
    /// Fill in meeting-specific fields
    Enrich {
        /// Event ID
        id: String,
        /// Participant count
        #[arg(long)]
        participants: Option<i32>,
        /// Whether the event has an agenda
        #[arg(long)]
        agenda: Option<bool>,
        /// Whether the event requires switching tools
        #[arg(long)]
        tool_switch: Option<bool>,
    },
    /// Set category and flexibility
    Classify {
        /// Event ID
        id: String,
        /// Category: meeting, deep_work, recovery, or admin
        #[arg(long)]
        category: Option<String>,
        /// Whether the optimizer may move this event
        #[arg(long)]
        flexible: Option<bool>,
    },
    /// Mark an event complete with a session-observed cost
    Complete {
        /// Event ID
        id: String,
        /// Observed cost for the session
        actual_cost: i32,
    },
    /// Delete an event
    Delete {
        /// Event ID
        id: String,
    },
    /// Import the demo week
    Seed {
        /// Any date inside the target week (default: this week)
        #[arg(long)]
        week_of: Option<String>,
    },
}

fn parse_category_arg(raw: &str) -> Result<EventCategory, Box<dyn std::error::Error>> {
    EventCategory::parse(raw)
        .ok_or_else(|| format!("unknown category '{raw}' (expected meeting, deep_work, recovery, or admin)").into())
}

/// Persist the store and drop any proposal computed against the old
/// arrangement.
fn save(db: &mut EventsDb, store: &mut EventStore) -> Result<(), Box<dyn std::error::Error>> {
    store.recompute_costs();
    db.replace_all(store.events())?;
    invalidate_pending_proposal()?;
    Ok(())
}

pub fn run(action: EventAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = EventsDb::open()?;
    let mut store = EventStore::from_events(db.list_events()?);

    match action {
        EventAction::Add {
            title,
            start,
            end,
            description,
            participants,
            agenda,
            tool_switch,
            category,
            flexible,
        } => {
            let start = parse_datetime(&start)?;
            let end = parse_datetime(&end)?;
            let mut event = Event::new(title, start, end)?;
            event.description = description;
            event.participants = participants;
            event.has_agenda = agenda;
            event.requires_tool_switch = tool_switch;
            event.category = category.as_deref().map(parse_category_arg).transpose()?;
            event.is_flexible = flexible;

            let id = event.id.clone();
            store.push(event);
            save(&mut db, &mut store)?;

            println!("Event created: {id}");
            if let Some(event) = store.get(&id) {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        EventAction::List => {
            store.recompute_costs();
            println!("{}", serde_json::to_string_pretty(store.events())?);
        }
        EventAction::Get { id } => {
            store.recompute_costs();
            match store.get(&id) {
                Some(event) => println!("{}", serde_json::to_string_pretty(event)?),
                None => return Err(format!("event not found: {id}").into()),
            }
        }
        EventAction::Cost { id } => {
            store.recompute_costs();
            let events = store.events();
            let index = events
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| format!("event not found: {id}"))?;
            // events are start-ordered after the recompute pass
            let previous_end = (index > 0).then(|| events[index - 1].end_time);
            let breakdown = cost::cost_breakdown(&events[index], previous_end);
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        EventAction::Enrich {
            id,
            participants,
            agenda,
            tool_switch,
        } => {
            let event = store
                .get_mut(&id)
                .ok_or_else(|| format!("event not found: {id}"))?;
            if let Some(participants) = participants {
                event.participants = Some(participants);
            }
            if let Some(agenda) = agenda {
                event.has_agenda = Some(agenda);
            }
            if let Some(tool_switch) = tool_switch {
                event.requires_tool_switch = Some(tool_switch);
            }
            save(&mut db, &mut store)?;
            if let Some(event) = store.get(&id) {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        EventAction::Classify {
            id,
            category,
            flexible,
        } => {
            let category = category.as_deref().map(parse_category_arg).transpose()?;
            let event = store
                .get_mut(&id)
                .ok_or_else(|| format!("event not found: {id}"))?;
            if category.is_some() {
                event.category = category;
            }
            if let Some(flexible) = flexible {
                event.is_flexible = Some(flexible);
            }
            save(&mut db, &mut store)?;
            if let Some(event) = store.get(&id) {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
        }
        EventAction::Complete { id, actual_cost } => {
            let event = store
                .get_mut(&id)
                .ok_or_else(|| format!("event not found: {id}"))?;
            event.actual_cost = Some(actual_cost);
            save(&mut db, &mut store)?;
            println!("Event completed: {id} (actual cost {actual_cost})");
        }
        EventAction::Delete { id } => {
            if store.remove(&id).is_none() {
                return Err(format!("event not found: {id}").into());
            }
            save(&mut db, &mut store)?;
            println!("Event deleted: {id}");
        }
        EventAction::Seed { week_of } => {
            let week_of = match week_of {
                Some(raw) => parse_date(&raw)?,
                None => chrono::Utc::now().date_naive(),
            };
            let source = DemoCalendar;
            let imported = source.fetch_events(week_of)?;
            let count = imported.len();
            for event in imported {
                store.push(event);
            }
            save(&mut db, &mut store)?;
            println!("Imported {count} events from {}", source.display_name());
        }
    }

    Ok(())
}
