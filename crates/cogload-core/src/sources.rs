//! Calendar source seam.
//!
//! Synchronization backends live outside this crate; they only have to
//! produce events. The one implementation shipped here is a fixed demo
//! week for first-run exploration.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::Result;
use crate::event::Event;

/// A producer of calendar events for a given week.
pub trait CalendarSource {
    /// Unique identifier (e.g. "demo", "google").
    fn name(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Fetch raw events for the week containing `week_of`. Raw means
    /// category, meeting fields, and flexibility may all be unset,
    /// pending classification and enrichment.
    fn fetch_events(&self, week_of: NaiveDate) -> Result<Vec<Event>>;
}

/// Built-in source producing a small, fixed demo week.
pub struct DemoCalendar;

/// (title, description, duration minutes, day offset from Monday, start hour)
const DEMO_WEEK: &[(&str, &str, i64, i64, u32)] = &[
    (
        "Weekly Team Standup",
        "Regular team sync to discuss blockers and progress",
        30,
        0,
        9,
    ),
    (
        "Deep Focus: Feature Development",
        "Uninterrupted coding time for the new dashboard feature",
        120,
        0,
        14,
    ),
    (
        "Client Strategy Call",
        "Quarterly review call with the client stakeholders",
        60,
        1,
        10,
    ),
    (
        "Lunch Walk",
        "Quick walk around the block to recharge",
        30,
        2,
        12,
    ),
    (
        "Sprint Planning",
        "Planning session for the upcoming two-week sprint",
        90,
        3,
        9,
    ),
];

impl CalendarSource for DemoCalendar {
    fn name(&self) -> &str {
        "demo"
    }

    fn display_name(&self) -> &str {
        "Demo Calendar"
    }

    fn fetch_events(&self, week_of: NaiveDate) -> Result<Vec<Event>> {
        let monday = week_of - Duration::days(week_of.weekday().num_days_from_monday() as i64);

        let mut events = Vec::with_capacity(DEMO_WEEK.len());
        for &(title, description, duration, day_offset, start_hour) in DEMO_WEEK {
            let day = monday + Duration::days(day_offset);
            let Some(start) = day.and_hms_opt(start_hour, 0, 0).map(|t| t.and_utc()) else {
                continue;
            };
            let mut event = Event::new(title, start, start + Duration::minutes(duration))?;
            event.description = Some(description.to_string());
            events.push(event);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn demo_week_anchors_to_monday() {
        // a Thursday
        let week_of = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let events = DemoCalendar.fetch_events(week_of).unwrap();
        assert_eq!(events.len(), 5);

        let standup = &events[0];
        assert_eq!(
            standup.start_time.date_naive(),
            NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
        );
        assert_eq!(standup.start_time.hour(), 9);
        assert_eq!(standup.duration_minutes, 30);
        // raw: awaiting classification and enrichment
        assert!(standup.category.is_none());
        assert!(standup.is_flexible.is_none());
        assert!(standup.participants.is_none());
    }
}
