//! Recovery suggestions and the quick suggestion generator.
//!
//! Simpler companions to the week optimizer: a catalogue of recovery
//! activities with candidate slots found in the gaps of the existing
//! schedule, and single-event postpone/shorten suggestions for weeks in
//! debt. Neither reshuffles the schedule; that is the optimizer's job.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cost;
use crate::event::Event;

/// Recovery slots may extend past work hours, up to this hour.
const RECOVERY_END_HOUR: u32 = 19;

/// Priority of a suggested time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPriority {
    /// On an over-budget day.
    High,
    Normal,
}

/// A candidate gap in the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Weekday name, for display.
    pub day: String,
    pub priority: SlotPriority,
}

/// A recovery activity from the fixed catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryActivity {
    pub activity_type: String,
    pub name: String,
    /// Negative: points restored.
    pub point_value: i32,
    pub duration_minutes: i64,
    pub description: String,
    #[serde(default)]
    pub suggested_slots: Vec<TimeSlot>,
}

/// The recovery catalogue, ordered most restorative first. Empty when
/// there is no overdraft to recover from.
pub fn suggest_recovery_activities(overdraft_amount: i32) -> Vec<RecoveryActivity> {
    if overdraft_amount <= 0 {
        return Vec::new();
    }

    let mut activities = vec![
        RecoveryActivity {
            activity_type: "micro_break".to_string(),
            name: "Micro Break".to_string(),
            point_value: -5,
            duration_minutes: 10,
            description: "Quick 5-10 minute reset to reduce overload.".to_string(),
            suggested_slots: Vec::new(),
        },
        RecoveryActivity {
            activity_type: "walk_30min".to_string(),
            name: "30 Min Walk".to_string(),
            point_value: -10,
            duration_minutes: 30,
            description: "Light movement to restore focus and reduce stress.".to_string(),
            suggested_slots: Vec::new(),
        },
        RecoveryActivity {
            activity_type: "deep_work_60min".to_string(),
            name: "Deep Work Block".to_string(),
            point_value: -12,
            duration_minutes: 60,
            description: "Protected focus time to rebuild cognitive surplus.".to_string(),
            suggested_slots: Vec::new(),
        },
        RecoveryActivity {
            activity_type: "exercise".to_string(),
            name: "Exercise Session".to_string(),
            point_value: -15,
            duration_minutes: 45,
            description: "Moderate workout to reset stress and recovery.".to_string(),
            suggested_slots: Vec::new(),
        },
        RecoveryActivity {
            activity_type: "nature_2hr".to_string(),
            name: "Nature Recharge".to_string(),
            point_value: -20,
            duration_minutes: 120,
            description: "Extended outdoor time for full mental reset.".to_string(),
            suggested_slots: Vec::new(),
        },
    ];

    activities.sort_by_key(|a| a.point_value);
    activities
}

/// Find gaps where a recovery activity of the given duration could go:
/// holes between a day's events and the end-of-day tail before 19:00.
/// Slots on over-budget days come first when `prioritize_overloaded`.
pub fn find_recovery_slots(
    events: &[Event],
    duration_minutes: i64,
    prioritize_overloaded: bool,
    daily_budget: i32,
) -> Vec<TimeSlot> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut day_events: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in events {
        day_events
            .entry(event.day_key())
            .or_default()
            .push(event.clone());
    }

    let mut slots = Vec::new();

    for bucket in day_events.values_mut() {
        let day_cost = cost::daily_total(bucket);
        let priority = if day_cost > daily_budget {
            SlotPriority::High
        } else {
            SlotPriority::Normal
        };
        // daily_total left the bucket sorted by start time

        for pair in bucket.windows(2) {
            let gap = (pair[1].start_time - pair[0].end_time).num_minutes();
            if gap >= duration_minutes {
                slots.push(TimeSlot {
                    start_time: pair[0].end_time,
                    end_time: pair[0].end_time + Duration::minutes(duration_minutes),
                    day: pair[0].end_time.format("%A").to_string(),
                    priority,
                });
            }
        }

        if let Some(last_end) = bucket.iter().map(|e| e.end_time).max() {
            if let Some(end_of_day) = last_end
                .date_naive()
                .and_hms_opt(RECOVERY_END_HOUR, 0, 0)
                .map(|t| t.and_utc())
            {
                if (end_of_day - last_end).num_minutes() >= duration_minutes {
                    slots.push(TimeSlot {
                        start_time: last_end,
                        end_time: last_end + Duration::minutes(duration_minutes),
                        day: last_end.format("%A").to_string(),
                        priority,
                    });
                }
            }
        }
    }

    if prioritize_overloaded {
        slots.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.start_time.cmp(&b.start_time))
        });
    } else {
        slots.sort_by_key(|s| s.start_time);
    }

    slots
}

/// Kind of a quick suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Postpone,
    Shorten,
}

/// A single-event suggestion, cheaper than a full optimizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    pub suggestion_id: String,
    pub event_id: String,
    pub kind: SuggestionKind,
    pub new_time: Option<DateTime<Utc>>,
    pub debt_reduction: i32,
    pub reason: String,
}

/// Quick per-event suggestions for a week carrying `debt_amount` points of
/// debt. Only movable, positive-cost events are considered; costs are read
/// from the cache, so run the proximity pass first.
pub fn generate_suggestions(events: &[Event], debt_amount: i32) -> Vec<OptimizationSuggestion> {
    let mut suggestions = Vec::new();
    if debt_amount <= 0 {
        return suggestions;
    }

    for event in events {
        if event.is_flexible != Some(true) {
            continue;
        }
        let cached = event.calculated_cost.unwrap_or(0);
        if cached <= 0 {
            continue;
        }

        // Morning events can take the afternoon discount.
        if event.start_time.hour() < 14 {
            let Some(new_time) = event
                .start_time
                .with_hour(15)
                .and_then(|t| t.with_minute(0))
            else {
                continue;
            };
            suggestions.push(OptimizationSuggestion {
                suggestion_id: Uuid::new_v4().to_string(),
                event_id: event.id.clone(),
                kind: SuggestionKind::Postpone,
                new_time: Some(new_time),
                debt_reduction: (cached as f64 * 0.1).round() as i32,
                reason: "Moving to afternoon reduces cognitive cost by 10%.".to_string(),
            });
        }
    }

    if suggestions.is_empty() {
        for event in events {
            if event.is_flexible == Some(true)
                && event.category == Some(crate::event::EventCategory::Meeting)
                && event.duration_minutes > 30
            {
                suggestions.push(OptimizationSuggestion {
                    suggestion_id: Uuid::new_v4().to_string(),
                    event_id: event.id.clone(),
                    kind: SuggestionKind::Shorten,
                    new_time: None,
                    debt_reduction: (event.calculated_cost.unwrap_or(0) as f64 * 0.2).round()
                        as i32,
                    reason: "Shortening long meetings reduces fatigue.".to_string(),
                });
                break;
            }
        }
    }

    suggestions
}

/// Apply one quick suggestion to the live collection. Returns false when
/// the target event no longer exists. The caller re-runs the proximity
/// pass afterwards.
pub fn apply_suggestion(events: &mut [Event], suggestion: &OptimizationSuggestion) -> bool {
    let Some(event) = events.iter_mut().find(|e| e.id == suggestion.event_id) else {
        return false;
    };

    match suggestion.kind {
        SuggestionKind::Postpone => {
            let Some(new_time) = suggestion.new_time else {
                return false;
            };
            let duration = event.end_time - event.start_time;
            event.start_time = new_time;
            event.end_time = new_time + duration;
        }
        SuggestionKind::Shorten => {
            let shortened = ((event.duration_minutes as f64 * 0.8).round() as i64).max(15);
            event.duration_minutes = shortened;
            event.end_time = event.start_time + Duration::minutes(shortened);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use chrono::TimeZone;

    fn meeting(day: u32, h: u32, minutes: i64) -> Event {
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 8, day, h, 0, 0).unwrap();
        let mut event =
            Event::new("Meeting", start, start + Duration::minutes(minutes)).unwrap();
        event.category = Some(EventCategory::Meeting);
        event
    }

    #[test]
    fn catalogue_empty_without_overdraft() {
        assert!(suggest_recovery_activities(0).is_empty());
        assert!(suggest_recovery_activities(-3).is_empty());
    }

    #[test]
    fn catalogue_ordered_most_restorative_first() {
        let activities = suggest_recovery_activities(8);
        assert_eq!(activities.len(), 5);
        assert_eq!(activities[0].activity_type, "nature_2hr");
        assert_eq!(activities[0].point_value, -20);
        assert_eq!(activities[4].activity_type, "micro_break");
        assert_eq!(activities[4].point_value, -5);
    }

    #[test]
    fn slots_found_in_gaps_and_day_tail() {
        let events = vec![meeting(3, 9, 60), meeting(3, 13, 60)];
        let slots = find_recovery_slots(&events, 30, true, 20);

        // one gap 10:00-13:00, one tail 14:00-19:00
        assert_eq!(slots.len(), 2);
        assert_eq!(
            slots[0].start_time,
            Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap()
        );
        assert_eq!(slots[1].start_time, Utc.with_ymd_and_hms(2026, 8, 3, 14, 0, 0).unwrap());
        assert_eq!(slots[0].day, "Monday");
    }

    #[test]
    fn overloaded_days_rank_first() {
        // Tuesday is quiet; Monday is stacked far over budget.
        let mut events = vec![
            meeting(3, 9, 120),
            meeting(3, 11, 120),
            meeting(3, 15, 60),
            meeting(4, 9, 30),
        ];
        for event in &mut events {
            event.participants = Some(6);
        }
        let slots = find_recovery_slots(&events, 20, true, 20);
        assert!(!slots.is_empty());
        assert_eq!(slots[0].priority, SlotPriority::High);
        assert_eq!(slots[0].day, "Monday");
    }

    #[test]
    fn suggestions_need_debt() {
        let mut events = vec![meeting(3, 9, 60)];
        events[0].is_flexible = Some(true);
        cost::apply_proximity(&mut events);
        assert!(generate_suggestions(&events, 0).is_empty());
    }

    #[test]
    fn postpone_suggested_for_morning_movables() {
        let mut events = vec![meeting(3, 9, 60), meeting(3, 15, 60)];
        events[0].is_flexible = Some(true);
        events[1].is_flexible = Some(false);
        cost::apply_proximity(&mut events);

        let suggestions = generate_suggestions(&events, 10);
        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.kind, SuggestionKind::Postpone);
        assert_eq!(suggestion.event_id, events[0].id);
        assert_eq!(
            suggestion.new_time,
            Some(Utc.with_ymd_and_hms(2026, 8, 3, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn shorten_suggested_when_nothing_to_postpone() {
        let mut events = vec![meeting(3, 15, 90)];
        events[0].is_flexible = Some(true);
        cost::apply_proximity(&mut events);

        let suggestions = generate_suggestions(&events, 10);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::Shorten);
    }

    #[test]
    fn apply_postpone_preserves_duration() {
        let mut events = vec![meeting(3, 9, 60)];
        events[0].is_flexible = Some(true);
        cost::apply_proximity(&mut events);
        let suggestions = generate_suggestions(&events, 10);

        assert!(apply_suggestion(&mut events, &suggestions[0]));
        assert_eq!(events[0].start_time.hour(), 15);
        assert_eq!((events[0].end_time - events[0].start_time).num_minutes(), 60);
    }

    #[test]
    fn apply_shorten_floors_at_15_minutes() {
        let mut events = vec![meeting(3, 15, 90)];
        events[0].is_flexible = Some(true);
        cost::apply_proximity(&mut events);
        let suggestions = generate_suggestions(&events, 10);

        assert!(apply_suggestion(&mut events, &suggestions[0]));
        assert_eq!(events[0].duration_minutes, 72);

        let mut tiny = vec![meeting(3, 15, 31)];
        tiny[0].is_flexible = Some(true);
        cost::apply_proximity(&mut tiny);
        let suggestions = generate_suggestions(&tiny, 10);
        assert!(apply_suggestion(&mut tiny, &suggestions[0]));
        assert_eq!(tiny[0].duration_minutes, 25);
    }

    #[test]
    fn vanished_event_is_not_applied() {
        let mut events = vec![meeting(3, 9, 60)];
        events[0].is_flexible = Some(true);
        cost::apply_proximity(&mut events);
        let suggestions = generate_suggestions(&events, 10);

        let mut other = vec![meeting(4, 9, 60)];
        assert!(!apply_suggestion(&mut other, &suggestions[0]));
    }
}
