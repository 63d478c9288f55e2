//! Earliest-slot search within a day's work window.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::cost::PROXIMITY_THRESHOLD_MINUTES;
use crate::event::Event;

/// Anchor a wall-clock hour onto a date, in UTC.
fn at_hour(day: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    Some(day.and_hms_opt(hour, 0, 0)?.and_utc())
}

/// Find the earliest start time for a `duration_minutes`-long event on
/// `day`, given the events already placed there.
///
/// Two passes:
/// 1. (only if `prefer_gap`) require just over an hour of clearance on both
///    sides of the candidate, so the placed event dodges the proximity
///    surcharge entirely;
/// 2. tight packing with no clearance requirement.
///
/// `day_events` is the authoritative, non-overlapping schedule for the day
/// at call time; overlaps are not validated here. Returns `None` when
/// neither pass finds room inside the window.
pub fn find_earliest_slot(
    day_events: &[Event],
    duration_minutes: i64,
    day: NaiveDate,
    work_start_hour: u32,
    work_end_hour: u32,
    prefer_gap: bool,
) -> Option<DateTime<Utc>> {
    let mut sorted: Vec<&Event> = day_events.iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    let day_start = at_hour(day, work_start_hour)?;
    let end_of_day = at_hour(day, work_end_hour)?;

    // Clearance that puts the neighbor just outside the proximity window.
    let buffer = Duration::minutes(PROXIMITY_THRESHOLD_MINUTES + 1);
    let duration = Duration::minutes(duration_minutes);

    // PASS 1: a slot with clearance on both sides.
    if prefer_gap && !sorted.is_empty() {
        let mut cursor = day_start;

        for (i, event) in sorted.iter().enumerate() {
            if i > 0 {
                let earliest_with_gap = sorted[i - 1].end_time + buffer;
                cursor = cursor.max(earliest_with_gap);
            }

            // Room before this event, keeping clearance before it too?
            let latest_start = event.start_time - buffer - duration;
            if cursor <= latest_start {
                return Some(cursor);
            }
        }

        // After the last event, with clearance from it.
        if let Some(last) = sorted.last() {
            let cursor = last.end_time + buffer;
            if (end_of_day - cursor).num_minutes() >= duration_minutes {
                return Some(cursor);
            }
        }
    }

    // PASS 2: tight packing.
    let mut cursor = day_start;
    for event in &sorted {
        let gap_before = (event.start_time - cursor).num_minutes();
        if gap_before >= duration_minutes {
            return Some(cursor);
        }
        cursor = cursor.max(event.end_time);
    }

    if (end_of_day - cursor).num_minutes() >= duration_minutes {
        return Some(cursor);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 3, h, m, 0).unwrap()
    }

    fn event(start: DateTime<Utc>, minutes: i64) -> Event {
        Event::new("Block", start, start + Duration::minutes(minutes)).unwrap()
    }

    #[test]
    fn empty_day_starts_at_work_start() {
        let slot = find_earliest_slot(&[], 60, day(), 9, 17, true);
        assert_eq!(slot, Some(at(9, 0)));
    }

    #[test]
    fn gap_pass_keeps_clearance_after_existing_event() {
        let existing = vec![event(at(9, 0), 60)];
        let slot = find_earliest_slot(&existing, 30, day(), 9, 17, true);
        // 10:00 end + 61 minute clearance
        assert_eq!(slot, Some(at(11, 1)));
    }

    #[test]
    fn gap_pass_fits_before_a_late_event() {
        let existing = vec![event(at(13, 0), 60)];
        let slot = find_earliest_slot(&existing, 30, day(), 9, 17, true);
        // 9:00 + 30 min + 61 min clearance = 10:31 <= 13:00, so 9:00 works
        assert_eq!(slot, Some(at(9, 0)));
    }

    #[test]
    fn falls_back_to_tight_packing() {
        // Events every two hours leave no 61-minute-buffered hole for a
        // 90 minute block, but tight packing slides it in.
        let existing = vec![
            event(at(9, 0), 60),
            event(at(11, 0), 60),
            event(at(13, 0), 60),
            event(at(15, 0), 60),
        ];
        let slot = find_earliest_slot(&existing, 90, day(), 9, 17, true);
        assert_eq!(slot, None); // 90 min does not fit tightly either

        let slot = find_earliest_slot(&existing, 60, day(), 9, 17, true);
        // tight packing: the 10:00-11:00 hole
        assert_eq!(slot, Some(at(10, 0)));
    }

    #[test]
    fn tight_packing_only_when_gap_not_preferred() {
        let existing = vec![event(at(9, 0), 60)];
        let slot = find_earliest_slot(&existing, 30, day(), 9, 17, false);
        assert_eq!(slot, Some(at(10, 0)));
    }

    #[test]
    fn full_day_yields_none() {
        let existing = vec![event(at(9, 0), 240), event(at(13, 0), 240)];
        assert_eq!(find_earliest_slot(&existing, 15, day(), 9, 17, true), None);
    }

    #[test]
    fn extended_window_admits_evening_slot() {
        let existing = vec![event(at(9, 0), 240), event(at(13, 0), 240)];
        let slot = find_earliest_slot(&existing, 30, day(), 9, 19, true);
        // clearance after the 17:00 end
        assert_eq!(slot, Some(at(18, 1)));
    }
}
