//! Candidate-day scoring for one event placement.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

use crate::cost;
use crate::event::Event;

use super::slot::find_earliest_slot;

/// Ordering key for a (day, slot) candidate. Lower is better; fields are
/// compared lexicographically:
///
/// 1. `exceeds_budget` -- staying under the daily budget beats everything;
/// 2. `daily_cost` -- prefer the day with more remaining capacity;
/// 3. `finish_score` -- prefer the earlier finish (pack days compactly);
/// 4. `day_key` -- earlier calendar date, purely for determinism.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct DayScore {
    pub exceeds_budget: u8,
    pub daily_cost: f64,
    pub finish_score: f64,
    pub day_key: String,
}

impl DayScore {
    /// Key for a day that cannot take the event at all.
    pub fn unplaceable(day_key: String) -> Self {
        Self {
            exceeds_budget: 2,
            daily_cost: f64::INFINITY,
            finish_score: f64::INFINITY,
            day_key,
        }
    }
}

/// Score placing `event` on `day`, returning the ordering key and the found
/// slot (or `None` when the day has no room).
///
/// Simulates the placement on clones of the day's schedule and runs the
/// full proximity recomputation over the simulated day, so the key reflects
/// surcharges the newcomer introduces or avoids. The real schedule is never
/// mutated.
pub fn score_day(
    day_events: &[Event],
    event: &Event,
    day: NaiveDate,
    work_start_hour: u32,
    work_end_hour: u32,
    daily_budget: i32,
) -> (DayScore, Option<DateTime<Utc>>) {
    let day_key = day.format("%Y-%m-%d").to_string();

    let slot = match find_earliest_slot(
        day_events,
        event.duration_minutes,
        day,
        work_start_hour,
        work_end_hour,
        true,
    ) {
        Some(slot) => slot,
        None => return (DayScore::unplaceable(day_key), None),
    };

    let candidate = event.with_times(slot, slot + Duration::minutes(event.duration_minutes));
    let mut simulated: Vec<Event> = day_events.to_vec();
    simulated.push(candidate);
    cost::apply_proximity(&mut simulated);

    let daily_cost: i32 = simulated
        .iter()
        .map(|e| e.calculated_cost.unwrap_or(0))
        .sum();
    let exceeds_budget = u8::from(daily_cost > daily_budget);

    // apply_proximity sorted the simulation, but the latest *end* can still
    // belong to any entry.
    let finish_score = simulated
        .iter()
        .map(|e| e.end_time)
        .max()
        .map(|finish| finish.hour() as f64 + finish.minute() as f64 / 60.0)
        .unwrap_or(f64::INFINITY);

    (
        DayScore {
            exceeds_budget,
            daily_cost: daily_cost as f64,
            finish_score,
            day_key,
        },
        Some(slot),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;
    use chrono::TimeZone;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn meeting(d: u32, h: u32, minutes: i64) -> Event {
        let start: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 8, d, h, 0, 0).unwrap();
        let mut event =
            Event::new("Meeting", start, start + Duration::minutes(minutes)).unwrap();
        event.category = Some(EventCategory::Meeting);
        event
    }

    #[test]
    fn score_ordering_is_lexicographic() {
        let under = DayScore {
            exceeds_budget: 0,
            daily_cost: 18.0,
            finish_score: 16.0,
            day_key: "2026-08-03".into(),
        };
        let over = DayScore {
            exceeds_budget: 1,
            daily_cost: 4.0,
            finish_score: 10.0,
            day_key: "2026-08-03".into(),
        };
        // budget flag dominates even a much lower cost
        assert!(under < over);

        let cheaper = DayScore { daily_cost: 6.0, ..under.clone() };
        assert!(cheaper < under);

        let earlier_finish = DayScore { finish_score: 12.0, ..under.clone() };
        assert!(earlier_finish < under);

        let earlier_day = DayScore { day_key: "2026-08-01".into(), ..under.clone() };
        assert!(earlier_day < under);

        // an unplaceable day loses to any real candidate
        assert!(over < DayScore::unplaceable("2026-08-01".into()));
    }

    #[test]
    fn empty_day_scores_its_own_cost() {
        let event = meeting(3, 9, 60);
        let (score, slot) = score_day(&[], &event, day(3), 9, 17, 20);
        assert_eq!(slot, Some(Utc.with_ymd_and_hms(2026, 8, 3, 9, 0, 0).unwrap()));
        assert_eq!(score.exceeds_budget, 0);
        assert_eq!(score.daily_cost, 5.0);
        assert_eq!(score.finish_score, 10.0);
    }

    #[test]
    fn full_day_is_unplaceable() {
        let wall = vec![meeting(3, 9, 240), meeting(3, 13, 240)];
        let event = meeting(3, 9, 30);
        let (score, slot) = score_day(&wall, &event, day(3), 9, 17, 20);
        assert!(slot.is_none());
        assert_eq!(score.exceeds_budget, 2);
    }

    #[test]
    fn budget_flag_set_when_simulated_day_overflows() {
        let busy = vec![meeting(3, 9, 120), meeting(3, 12, 120)];
        let event = meeting(3, 9, 120);
        let (score, slot) = score_day(&busy, &event, day(3), 9, 19, 20);
        assert!(slot.is_some());
        assert_eq!(score.exceeds_budget, 1);
    }

    #[test]
    fn simulation_leaves_inputs_untouched() {
        let existing = vec![meeting(3, 9, 60)];
        let event = meeting(3, 10, 30);
        let before = existing[0].clone();
        let _ = score_day(&existing, &event, day(3), 9, 17, 20);
        assert_eq!(existing[0].start_time, before.start_time);
        assert_eq!(existing[0].calculated_cost, before.calculated_cost);
    }
}
