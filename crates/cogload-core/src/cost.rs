//! Cognitive cost model.
//!
//! Maps an event (plus its temporal neighborhood) to an integer cost:
//! - recovery events carry a fixed negative value picked by duration bracket,
//! - deep work accrues at half the ordinary per-quarter-hour rate,
//! - ordinary events (meetings, admin, unclassified) accrue from duration,
//!   participants, tool switching, and missing agendas, with an afternoon
//!   discount,
//! - positive-cost events scheduled within an hour of the previous event
//!   take a flat proximity surcharge.
//!
//! Costs are integers at rest; intermediate arithmetic is `f64` and the
//! final value is rounded half-away-from-zero (`f64::round`). Every
//! reachable midpoint is on a non-negative total, so this is round-half-up
//! in practice (2.5 rounds to 3).

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{Event, EventCategory};

/// Maximum cumulative cost a day should carry before it is overloaded.
pub const DAILY_BUDGET: i32 = 20;

/// One cost point per started quarter hour for ordinary events.
pub const BASE_COST_PER_15MIN: f64 = 1.0;

/// Events starting within this many minutes of the previous event's end
/// take the proximity surcharge.
pub const PROXIMITY_THRESHOLD_MINUTES: i64 = 60;

/// Flat surcharge for back-to-back or near-back-to-back scheduling.
pub const PROXIMITY_INCREMENT: i32 = 2;

/// Recovery values by duration bracket (minutes -> points restored).
const RECOVERY_MICRO_BREAK: i32 = -5; // <= 15 min
const RECOVERY_SHORT_WALK: i32 = -10; // <= 30 min
const RECOVERY_FOCUS_HOUR: i32 = -12; // <= 60 min
const RECOVERY_EXERCISE: i32 = -15; // <= 90 min
const RECOVERY_EXTENDED: i32 = -20; // anything longer

/// Recovery value for a given duration. Independent of all other
/// event attributes.
pub fn recovery_value(duration_minutes: i64) -> i32 {
    if duration_minutes <= 15 {
        RECOVERY_MICRO_BREAK
    } else if duration_minutes <= 30 {
        RECOVERY_SHORT_WALK
    } else if duration_minutes <= 60 {
        RECOVERY_FOCUS_HOUR
    } else if duration_minutes <= 90 {
        RECOVERY_EXERCISE
    } else {
        RECOVERY_EXTENDED
    }
}

/// Base cost of an event, ignoring proximity to neighbors.
///
/// Unset meeting fields resolve to 1 participant, has agenda, no tool
/// switch. Unclassified events are costed as ordinary ones.
pub fn base_cost(event: &Event) -> i32 {
    match event.category {
        Some(EventCategory::Recovery) => recovery_value(event.duration_minutes),
        Some(EventCategory::DeepWork) => {
            // Focused solo work: half rate, no context-switch or participant
            // penalties.
            let cost = event.duration_minutes as f64 / 15.0 * BASE_COST_PER_15MIN * 0.5;
            cost.round() as i32
        }
        _ => {
            let participants = event.participants.unwrap_or(1);
            let has_agenda = event.has_agenda.unwrap_or(true);
            let requires_tool_switch = event.requires_tool_switch.unwrap_or(false);

            let mut cost = event.duration_minutes as f64 / 15.0 * BASE_COST_PER_15MIN;
            if requires_tool_switch {
                cost += 3.0;
            }
            cost += participants as f64 * 0.5;
            if !has_agenda {
                cost += 4.0;
            }
            if event.start_time.hour() >= 14 {
                cost *= 0.9;
            }
            cost.round() as i32
        }
    }
}

/// Cost of an event given the end time of the event before it.
///
/// Adds [`PROXIMITY_INCREMENT`] when the base cost is positive and the gap
/// to the previous event is between 0 and [`PROXIMITY_THRESHOLD_MINUTES`]
/// inclusive. Recovery events never take the surcharge: they offset load,
/// and back-to-back recovery is not penalized.
pub fn cost_with_proximity(event: &Event, previous_end: Option<DateTime<Utc>>) -> i32 {
    let base = base_cost(event);

    if base > 0 {
        if let Some(previous_end) = previous_end {
            let gap_minutes = (event.start_time - previous_end).num_minutes();
            if (0..=PROXIMITY_THRESHOLD_MINUTES).contains(&gap_minutes) {
                return base + PROXIMITY_INCREMENT;
            }
        }
    }

    base
}

/// Recompute every event's cost cache with proximity awareness.
///
/// Sorts the slice ascending by start time and walks it, carrying the
/// previous event's end time. This is the canonical way a collection's
/// costs are (re)computed and must be re-run whenever any event's timing
/// or attributes change, because proximity depends on neighbor ordering.
pub fn apply_proximity(events: &mut [Event]) {
    events.sort_by_key(|e| e.start_time);

    let mut previous_end: Option<DateTime<Utc>> = None;
    for event in events.iter_mut() {
        event.calculated_cost = Some(cost_with_proximity(event, previous_end));
        previous_end = Some(event.end_time);
    }
}

/// Total computed cost of a day's events, proximity-aware.
pub fn daily_total(events: &mut [Event]) -> i32 {
    apply_proximity(events);
    events.iter().map(|e| e.calculated_cost.unwrap_or(0)).sum()
}

/// Itemization of one event's cost, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub event_id: String,
    pub category: Option<EventCategory>,
    pub base: i32,
    pub duration_component: i32,
    pub tool_switch: i32,
    pub participants: i32,
    pub no_agenda: i32,
    pub afternoon_discount: i32,
    pub proximity_increment: i32,
    pub total: i32,
}

/// Detailed breakdown of how an event's cost is assembled.
pub fn cost_breakdown(event: &Event, previous_end: Option<DateTime<Utc>>) -> CostBreakdown {
    let mut breakdown = CostBreakdown {
        event_id: event.id.clone(),
        category: event.category,
        base: 0,
        duration_component: 0,
        tool_switch: 0,
        participants: 0,
        no_agenda: 0,
        afternoon_discount: 0,
        proximity_increment: 0,
        total: 0,
    };

    match event.category {
        Some(EventCategory::Recovery) => {
            breakdown.base = recovery_value(event.duration_minutes);
            breakdown.total = breakdown.base;
            breakdown
        }
        Some(EventCategory::DeepWork) => {
            let duration_cost =
                event.duration_minutes as f64 / 15.0 * BASE_COST_PER_15MIN * 0.5;
            breakdown.duration_component = duration_cost.round() as i32;
            breakdown.base = breakdown.duration_component;
            breakdown.proximity_increment = proximity_part(event, breakdown.base, previous_end);
            breakdown.total = breakdown.base + breakdown.proximity_increment;
            breakdown
        }
        _ => {
            let participants = event.participants.unwrap_or(1);
            let has_agenda = event.has_agenda.unwrap_or(true);
            let requires_tool_switch = event.requires_tool_switch.unwrap_or(false);

            let duration_cost = event.duration_minutes as f64 / 15.0 * BASE_COST_PER_15MIN;
            breakdown.duration_component = duration_cost.round() as i32;
            let mut running = duration_cost;

            if requires_tool_switch {
                breakdown.tool_switch = 3;
                running += 3.0;
            }

            let participant_cost = participants as f64 * 0.5;
            breakdown.participants = participant_cost.round() as i32;
            running += participant_cost;

            if !has_agenda {
                breakdown.no_agenda = 4;
                running += 4.0;
            }

            if event.start_time.hour() >= 14 {
                breakdown.afternoon_discount = -(running * 0.1).round() as i32;
                running *= 0.9;
            }

            breakdown.base = running.round() as i32;
            breakdown.proximity_increment = proximity_part(event, breakdown.base, previous_end);
            breakdown.total = breakdown.base + breakdown.proximity_increment;
            breakdown
        }
    }
}

fn proximity_part(event: &Event, base: i32, previous_end: Option<DateTime<Utc>>) -> i32 {
    if base <= 0 {
        return 0;
    }
    match previous_end {
        Some(previous_end) => {
            let gap_minutes = (event.start_time - previous_end).num_minutes();
            if (0..=PROXIMITY_THRESHOLD_MINUTES).contains(&gap_minutes) {
                PROXIMITY_INCREMENT
            } else {
                0
            }
        }
        None => 0,
    }
}
