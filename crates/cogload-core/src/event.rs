//! Calendar event model.
//!
//! Events arrive from a calendar source with only title and times; category,
//! meeting attributes, and flexibility are filled in later by classification
//! and enrichment. The cost model resolves unset meeting fields to defaults
//! instead of every call site carrying its own fallback literals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Category of a calendar event, assigned by the (external) classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Meeting,
    DeepWork,
    Recovery,
    Admin,
}

impl EventCategory {
    /// Parse a category from its wire/storage string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "meeting" => Some(EventCategory::Meeting),
            "deep_work" => Some(EventCategory::DeepWork),
            "recovery" => Some(EventCategory::Recovery),
            "admin" => Some(EventCategory::Admin),
            _ => None,
        }
    }

    /// Storage string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::DeepWork => "deep_work",
            EventCategory::Recovery => "recovery",
            EventCategory::Admin => "admin",
        }
    }
}

/// A scheduled block of time on the calendar.
///
/// Invariants enforced by [`Event::new`]: `end_time` strictly after
/// `start_time`, `duration_minutes` equal to the span and positive.
/// Code that constructs events by struct literal (tests, storage reads)
/// is responsible for upholding them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Meeting-specific fields. Unset on incomplete events; the cost model
    /// treats them as 1 participant, has agenda, no tool switch.
    pub participants: Option<i32>,
    pub has_agenda: Option<bool>,
    pub requires_tool_switch: Option<bool>,
    pub category: Option<EventCategory>,
    /// Cost cache, set by the proximity recomputation pass.
    pub calculated_cost: Option<i32>,
    /// Session-observed override. Preferred by budget reporting, never by
    /// the optimizer (not predictable in advance).
    pub actual_cost: Option<i32>,
    /// `Some(true)` = movable, `Some(false)` = unmovable, `None` = not yet
    /// classified (the optimizer treats unclassified as unmovable).
    pub is_flexible: Option<bool>,
}

impl Event {
    /// Create a new event with a fresh id, validating the time range.
    pub fn new(
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if end_time <= start_time {
            return Err(ValidationError::InvalidTimeRange {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            start_time,
            end_time,
            duration_minutes: (end_time - start_time).num_minutes(),
            participants: None,
            has_agenda: None,
            requires_tool_switch: None,
            category: None,
            calculated_cost: None,
            actual_cost: None,
            is_flexible: None,
        })
    }

    /// Clone this event repositioned to a new time range.
    ///
    /// Pure value constructor used for placement simulation: the original
    /// is never touched, so scoring a candidate slot has no side effects on
    /// the real schedule. The cost cache is cleared since it no longer
    /// reflects the new neighborhood.
    pub fn with_times(&self, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            duration_minutes: (end_time - start_time).num_minutes(),
            calculated_cost: None,
            ..self.clone()
        }
    }

    /// Calendar-day key (`%Y-%m-%d`) of this event's start.
    pub fn day_key(&self) -> String {
        self.start_time.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 3, h, m, 0).unwrap()
    }

    #[test]
    fn new_event_derives_duration() {
        let event = Event::new("Standup", at(9, 0), at(9, 30)).unwrap();
        assert_eq!(event.duration_minutes, 30);
        assert!(event.category.is_none());
        assert!(event.is_flexible.is_none());
    }

    #[test]
    fn new_event_rejects_inverted_range() {
        assert!(Event::new("Bad", at(10, 0), at(9, 0)).is_err());
        assert!(Event::new("Empty", at(10, 0), at(10, 0)).is_err());
    }

    #[test]
    fn with_times_is_pure() {
        let mut event = Event::new("Standup", at(9, 0), at(9, 30)).unwrap();
        event.calculated_cost = Some(5);

        let moved = event.with_times(at(11, 0), at(11, 30));
        assert_eq!(moved.id, event.id);
        assert_eq!(moved.duration_minutes, 30);
        assert_eq!(moved.calculated_cost, None);
        // original untouched
        assert_eq!(event.start_time, at(9, 0));
        assert_eq!(event.calculated_cost, Some(5));
    }

    #[test]
    fn category_round_trip() {
        for category in [
            EventCategory::Meeting,
            EventCategory::DeepWork,
            EventCategory::Recovery,
            EventCategory::Admin,
        ] {
            assert_eq!(EventCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(EventCategory::parse("karaoke"), None);
    }

    #[test]
    fn event_serialization() {
        let event = Event::new("Planning", at(9, 0), at(10, 30)).unwrap();
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.duration_minutes, 90);
    }
}
