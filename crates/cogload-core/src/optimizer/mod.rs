//! Week schedule optimizer.
//!
//! Redistributes movable events across the work week so no day exceeds the
//! daily cognitive budget where that is achievable, balancing load and
//! packing days early. Produces a [`WeekOptimizationProposal`] for review;
//! [`apply_proposal`] commits selected changes back onto the live
//! collection.
//!
//! The optimizer is a greedy single-pass heuristic: deterministic for
//! identical input, best-effort for events that fit nowhere. It performs no
//! I/O and relies on the caller to serialize access to the event collection
//! around an optimize-then-apply sequence.

mod scoring;
mod slot;

pub use scoring::{score_day, DayScore};
pub use slot::find_earliest_slot;

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost;
use crate::event::Event;

/// Kind of a proposed schedule change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Move,
}

/// One proposed reschedule of a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChange {
    pub event_id: String,
    /// Denormalized for display.
    pub event_title: Option<String>,
    pub kind: ChangeKind,
    pub original_time: DateTime<Utc>,
    pub new_time: Option<DateTime<Utc>>,
    pub applied: bool,
}

/// Output of one optimizer run: proposed moves plus before/after peak-load
/// statistics. Immutable once produced except for the `applied` flags
/// flipped by [`apply_proposal`]. A proposal generated before the event set
/// last changed is stale and must be discarded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekOptimizationProposal {
    pub proposal_id: String,
    pub changes: Vec<ScheduleChange>,
    pub current_max_daily_debt: i32,
    pub proposed_max_daily_debt: i32,
    pub total_debt_reduction: i32,
}

impl WeekOptimizationProposal {
    fn no_op(max_daily: i32) -> Self {
        Self {
            proposal_id: Uuid::new_v4().to_string(),
            changes: Vec::new(),
            current_max_daily_debt: max_daily,
            proposed_max_daily_debt: max_daily,
            total_debt_reduction: 0,
        }
    }
}

/// Optimizer configuration.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Start of the work day (hour).
    pub work_start_hour: u32,
    /// End of the standard work day (hour).
    pub work_end_hour: u32,
    /// End of the extended work day tried when standard hours fit nothing.
    pub extended_end_hour: u32,
    /// Maximum acceptable cost per day.
    pub daily_budget: i32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            work_start_hour: 9,
            work_end_hour: 17,
            extended_end_hour: 19,
            daily_budget: cost::DAILY_BUDGET,
        }
    }
}

/// Greedy week schedule optimizer.
pub struct WeekOptimizer {
    config: OptimizerConfig,
}

impl WeekOptimizer {
    /// Create an optimizer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: OptimizerConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Generate a proposal redistributing movable events across the week.
    ///
    /// An event is movable iff `is_flexible == Some(true)` and its base
    /// cost is strictly positive; everything else (explicitly unmovable,
    /// unclassified, recovery) stays fixed. Movable events are placed in
    /// descending base-cost order (event id breaks ties) so the ordering
    /// never depends on where earlier events landed. Events that fit
    /// nowhere, even with extended hours, are skipped without error.
    pub fn optimize_week(&self, events: &[Event]) -> WeekOptimizationProposal {
        let (movable, fixed): (Vec<&Event>, Vec<&Event>) = events
            .iter()
            .partition(|e| e.is_flexible == Some(true) && cost::base_cost(e) > 0);

        let current_daily = daily_costs(events);
        let current_max = current_daily.values().copied().max().unwrap_or(0);

        if movable.is_empty() {
            return WeekOptimizationProposal::no_op(current_max);
        }

        let week = match week_dates(events) {
            Some(week) => week,
            None => return WeekOptimizationProposal::no_op(current_max),
        };

        // Working schedules seeded with everything that cannot move. Fixed
        // events outside Mon-Fri keep their own bucket but are never
        // candidate placement days.
        let mut day_schedules: BTreeMap<String, Vec<Event>> = BTreeMap::new();
        for event in &fixed {
            day_schedules
                .entry(event.day_key())
                .or_default()
                .push((*event).clone());
        }
        for day in &week {
            day_schedules.entry(day_key(*day)).or_default();
        }

        // Highest base cost first; base cost is proximity-independent, so
        // this ordering cannot shift with placement decisions made earlier
        // in the same pass.
        let mut movable: Vec<Event> = movable.into_iter().cloned().collect();
        movable.sort_by_key(|e| (std::cmp::Reverse(cost::base_cost(e)), e.id.clone()));

        let mut placements: HashMap<String, (String, DateTime<Utc>)> = HashMap::new();

        for event in &movable {
            let mut best: Option<(DayScore, String, DateTime<Utc>)> = None;

            for &end_hour in [self.config.work_end_hour, self.config.extended_end_hour].iter() {
                for day in &week {
                    let key = day_key(*day);
                    let day_events = day_schedules.get(&key).map(Vec::as_slice).unwrap_or(&[]);
                    let (score, slot) = score_day(
                        day_events,
                        event,
                        *day,
                        self.config.work_start_hour,
                        end_hour,
                        self.config.daily_budget,
                    );
                    if let Some(slot) = slot {
                        if best.as_ref().is_none_or(|(b, _, _)| score < *b) {
                            best = Some((score, key, slot));
                        }
                    }
                }
                // Extended hours are a fallback, not an alternative.
                if best.is_some() {
                    break;
                }
            }

            if let Some((_, key, slot)) = best {
                placements.insert(event.id.clone(), (key.clone(), slot));
                // Subsequent placements must see this slot as occupied.
                let placed =
                    event.with_times(slot, slot + Duration::minutes(event.duration_minutes));
                day_schedules.entry(key).or_default().push(placed);
            }
        }

        // A placement that landed back on its original day and wall-clock
        // time is not a change.
        let mut changes = Vec::new();
        for event in &movable {
            let Some((new_day, new_start)) = placements.get(&event.id) else {
                continue;
            };
            let moved = event.day_key() != *new_day
                || event.start_time.hour() != new_start.hour()
                || event.start_time.minute() != new_start.minute();
            if moved {
                changes.push(ScheduleChange {
                    event_id: event.id.clone(),
                    event_title: Some(event.title.clone()),
                    kind: ChangeKind::Move,
                    original_time: event.start_time,
                    new_time: Some(*new_start),
                    applied: false,
                });
            }
        }

        let proposed_max = day_schedules
            .values_mut()
            .map(|day_events| cost::daily_total(day_events))
            .max()
            .unwrap_or(0);

        WeekOptimizationProposal {
            proposal_id: Uuid::new_v4().to_string(),
            changes,
            current_max_daily_debt: current_max,
            proposed_max_daily_debt: proposed_max,
            total_debt_reduction: (current_max - proposed_max).max(0),
        }
    }
}

impl Default for WeekOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Commit proposed changes onto the live event collection.
///
/// Applies each unapplied change whose event id is in `selected_ids` (all
/// changes when `selected_ids` is `None`), shifting the event while
/// preserving its duration. Changes already applied, or whose event has
/// vanished since the proposal was generated, are skipped silently. Ends by
/// recomputing proximity costs over the whole collection. Returns the
/// number of changes actually applied.
pub fn apply_proposal(
    events: &mut [Event],
    proposal: &mut WeekOptimizationProposal,
    selected_ids: Option<&[String]>,
) -> usize {
    let mut applied = 0;

    for change in proposal.changes.iter_mut() {
        if change.applied {
            continue;
        }
        if let Some(ids) = selected_ids {
            if !ids.contains(&change.event_id) {
                continue;
            }
        }
        let Some(new_time) = change.new_time else {
            continue;
        };

        if let Some(event) = events.iter_mut().find(|e| e.id == change.event_id) {
            let duration = event.end_time - event.start_time;
            event.start_time = new_time;
            event.end_time = new_time + duration;
            change.applied = true;
            applied += 1;
        }
    }

    cost::apply_proximity(events);
    applied
}

/// Per-day totals for the whole collection, proximity-aware.
fn daily_costs(events: &[Event]) -> BTreeMap<String, i32> {
    let mut simulated: Vec<Event> = events.to_vec();
    cost::apply_proximity(&mut simulated);

    let mut totals = BTreeMap::new();
    for event in &simulated {
        *totals.entry(event.day_key()).or_insert(0) += event.calculated_cost.unwrap_or(0);
    }
    totals
}

/// Mon-Fri of the week holding the earliest event.
fn week_dates(events: &[Event]) -> Option<Vec<NaiveDate>> {
    let min_date = events.iter().map(|e| e.start_time.date_naive()).min()?;
    let monday = min_date - Duration::days(min_date.weekday().num_days_from_monday() as i64);
    Some((0..5).map(|i| monday + Duration::days(i)).collect())
}

fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use chrono::TimeZone;

    fn meeting(day: u32, h: u32, m: u32, minutes: i64) -> Event {
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 8, day, h, m, 0).unwrap();
        let mut event =
            Event::new("Meeting", start, start + Duration::minutes(minutes)).unwrap();
        event.category = Some(EventCategory::Meeting);
        event
    }

    #[test]
    fn week_dates_anchor_to_monday() {
        // 2026-08-05 is a Wednesday
        let events = vec![meeting(5, 9, 0, 30)];
        let week = week_dates(&events).unwrap();
        assert_eq!(week.len(), 5);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(week[4], NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
    }

    #[test]
    fn unclassified_flexibility_is_fixed() {
        let mut movable = meeting(3, 9, 0, 60);
        movable.is_flexible = Some(true);
        let unclassified = meeting(3, 11, 0, 60);
        let mut unmovable = meeting(3, 13, 0, 60);
        unmovable.is_flexible = Some(false);

        let events = vec![movable.clone(), unclassified.clone(), unmovable.clone()];
        let proposal = WeekOptimizer::new().optimize_week(&events);

        for change in &proposal.changes {
            assert_eq!(change.event_id, movable.id);
        }
    }

    #[test]
    fn recovery_events_are_never_moved() {
        let mut recovery = meeting(3, 9, 0, 30);
        recovery.category = Some(EventCategory::Recovery);
        recovery.is_flexible = Some(true);

        let proposal = WeekOptimizer::new().optimize_week(&[recovery]);
        assert!(proposal.changes.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_proposal() {
        let proposal = WeekOptimizer::new().optimize_week(&[]);
        assert!(proposal.changes.is_empty());
        assert_eq!(proposal.current_max_daily_debt, 0);
        assert_eq!(proposal.proposed_max_daily_debt, 0);
        assert_eq!(proposal.total_debt_reduction, 0);
    }

    #[test]
    fn no_op_proposal_reports_observed_max() {
        let events = vec![meeting(3, 9, 0, 60), meeting(3, 10, 0, 60)];
        let proposal = WeekOptimizer::new().optimize_week(&events);
        assert!(proposal.changes.is_empty());
        // 5 + (5+2): back-to-back surcharge on the second
        assert_eq!(proposal.current_max_daily_debt, 12);
        assert_eq!(proposal.proposed_max_daily_debt, 12);
        assert_eq!(proposal.total_debt_reduction, 0);
    }
}
